use crate::values::{
    Display, Length, Position, parse_display, parse_font_weight, parse_length,
    parse_letter_spacing, parse_position,
};
use html::{Document, Id, NodeKind};

pub const DEFAULT_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Inherited. px.
    pub font_size: f32,
    /// Inherited. First family of the list, unquoted.
    pub font_family: String,
    /// Inherited. 400 = normal.
    pub font_weight: u16,
    /// Inherited. Extra px added after every character.
    pub letter_spacing: f32,
    /// Inherited.
    pub nowrap: bool,

    pub display: Display,
    pub position: Position,
    /// `None` means `auto`.
    pub width: Option<f32>,
    pub max_width: Option<f32>,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: 400,
            letter_spacing: 0.0,
            nowrap: false,
            display: Display::Inline,
            position: Position::Static,
            width: None,
            max_width: None,
        }
    }

    pub fn is_monospace(&self) -> bool {
        self.font_family.eq_ignore_ascii_case("monospace")
    }
}

fn default_display(name: &str) -> Display {
    match name {
        "div" | "form" | "p" | "ul" | "li" | "section" | "body" | "html" => Display::Block,
        "input" | "button" | "select" | "textarea" => Display::InlineBlock,
        _ => Display::Inline,
    }
}

fn first_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    let unquoted = first.trim_matches(|c| c == '"' || c == '\'').trim();
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}

/// Compute the style of one element from its inline declarations and its
/// parent's computed style.
pub fn compute_style(
    name: &str,
    specified: &[(String, String)],
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let mut result = ComputedStyle::initial();
    result.display = default_display(name);

    if let Some(p) = parent {
        result.font_size = p.font_size;
        result.font_family = p.font_family.clone();
        result.font_weight = p.font_weight;
        result.letter_spacing = p.letter_spacing;
        result.nowrap = p.nowrap;
    }

    for (prop, value) in specified {
        match prop.as_str() {
            "font-size" => {
                if let Some(Length::Px(px)) = parse_length(value)
                    && px > 0.0
                {
                    result.font_size = px;
                }
            }
            "font-family" => {
                if let Some(family) = first_family(value) {
                    result.font_family = family;
                }
            }
            "font-weight" => {
                if let Some(w) = parse_font_weight(value) {
                    result.font_weight = w;
                }
            }
            "letter-spacing" => {
                if let Some(px) = parse_letter_spacing(value) {
                    result.letter_spacing = px;
                }
            }
            "white-space" => {
                result.nowrap = value.trim().eq_ignore_ascii_case("nowrap");
            }
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
            }
            "position" => {
                if let Some(p) = parse_position(value) {
                    result.position = p;
                }
            }
            "width" => match parse_length(value) {
                Some(Length::Px(px)) => result.width = Some(px.max(0.0)),
                Some(Length::Auto) => result.width = None,
                None => {}
            },
            "max-width" => {
                if let Some(Length::Px(px)) = parse_length(value) {
                    result.max_width = Some(px.max(0.0));
                }
            }
            // Unknown properties are ignored.
            _ => {}
        }
    }

    result
}

/// Computed style of `id`, resolving inheritance through its ancestors.
///
/// Text nodes take their parent's style.
pub fn computed_style(doc: &Document, id: Id) -> ComputedStyle {
    let mut chain = Vec::new();
    let mut current = Some(id);
    while let Some(node) = current {
        if doc.tag_name(node).is_some() {
            chain.push(node);
        }
        current = doc.parent(node);
    }

    let mut style: Option<ComputedStyle> = None;
    for node in chain.into_iter().rev() {
        let Some(NodeKind::Element { name, style: decls, .. }) = doc.kind(node) else {
            continue;
        };
        style = Some(compute_style(name, decls, style.as_ref()));
    }
    style.unwrap_or_else(ComputedStyle::initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_properties_inherit_but_width_does_not() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.append_child(doc.root(), outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        doc.set_style(outer, "font-size", "12px").unwrap();
        doc.set_style(outer, "font-family", "'Fira Sans', sans-serif").unwrap();
        doc.set_style(outer, "letter-spacing", "1px").unwrap();
        doc.set_style(outer, "width", "300px").unwrap();

        let style = computed_style(&doc, inner);
        assert_eq!(style.font_size, 12.0);
        assert_eq!(style.font_family, "Fira Sans");
        assert_eq!(style.letter_spacing, 1.0);
        assert_eq!(style.width, None);
        assert_eq!(style.display, Display::Inline);
        assert_eq!(computed_style(&doc, outer).width, Some(300.0));
    }

    #[test]
    fn width_auto_resets_an_earlier_declaration() {
        let style = compute_style(
            "div",
            &[
                ("width".to_string(), "0".to_string()),
                ("width".to_string(), "auto".to_string()),
            ],
            None,
        );
        assert_eq!(style.width, None);
        assert_eq!(style.display, Display::Block);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let style = compute_style(
            "span",
            &[
                ("font-size".to_string(), "-3px".to_string()),
                ("display".to_string(), "grid".to_string()),
                ("font-weight".to_string(), "bold".to_string()),
            ],
            None,
        );
        assert_eq!(style.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(style.display, Display::Inline);
        assert_eq!(style.font_weight, 700);
    }
}
