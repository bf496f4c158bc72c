/// CSS length. Only `px` and `auto` are understood.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
}

/// Parse `<number>px`, a bare `0`, or `auto`. Negative offsets are allowed.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("auto") {
        return Some(Length::Auto);
    }
    let num = match v.strip_suffix("px") {
        Some(px) => px.trim().parse::<f32>().ok()?,
        None if v == "0" => 0.0,
        None => return None,
    };
    num.is_finite().then_some(Length::Px(num))
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "none" => Some(Display::None),
        _ => None,
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        _ => None,
    }
}

/// `normal`, `bold` or a numeric weight in 1..=1000.
pub fn parse_font_weight(value: &str) -> Option<u16> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(400),
        "bold" => Some(700),
        v => v.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)),
    }
}

/// `normal` or a px length.
pub fn parse_letter_spacing(value: &str) -> Option<f32> {
    if value.trim().eq_ignore_ascii_case("normal") {
        return Some(0.0);
    }
    match parse_length(value)? {
        Length::Px(px) => Some(px),
        Length::Auto => None,
    }
}

/// Format a px value the way it is written back into inline style.
pub fn format_px(px: f32) -> String {
    if px.fract() == 0.0 {
        format!("{}px", px as i64)
    } else {
        format!("{px}px")
    }
}
