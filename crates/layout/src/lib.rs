//! Width resolution for widget elements.
//!
//! There is no box tree: widths are resolved on demand from inline style and
//! measured text, which is all a single-line widget needs.

use css::{ComputedStyle, Display, Position, computed_style};
use html::{Document, Id, NodeKind};

/// Width a text input gets when nothing sets one, roughly 20 average glyphs.
pub const INPUT_INTRINSIC_WIDTH: f32 = 150.0;

/// Measures unwrapped text in px for a given style.
///
/// Implementations measure glyph advances only; letter spacing is added by
/// [`measure_text`].
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32;
    fn line_height(&self, style: &ComputedStyle) -> f32;
}

/// Every glyph advances by `ratio * font_size`.
///
/// Useful headless and in tests, where real font metrics are unavailable.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasurer {
    pub ratio: f32,
}

impl MonospaceMeasurer {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        text.chars().count() as f32 * style.font_size * self.ratio
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        style.font_size * 1.2
    }
}

/// Measure `text` including letter spacing.
pub fn measure_text(measurer: &dyn TextMeasurer, text: &str, style: &ComputedStyle) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let spacing = style.letter_spacing * text.chars().count() as f32;
    (measurer.measure(text, style) + spacing).max(0.0)
}

/// Used width of an element.
///
/// An explicit `width` wins; inputs fall back to [`INPUT_INTRINSIC_WIDTH`];
/// everything else shrinks to fit its inline content on one line.
pub fn content_width(doc: &Document, id: Id, measurer: &dyn TextMeasurer) -> f32 {
    let style = computed_style(doc, id);
    resolve_width(doc, id, &style, measurer)
}

fn resolve_width(doc: &Document, id: Id, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> f32 {
    if style.display == Display::None {
        return 0.0;
    }
    let cap = style.max_width.unwrap_or(f32::INFINITY);
    if let Some(w) = style.width {
        return w.min(cap);
    }
    if doc.tag_name(id) == Some("input") {
        return INPUT_INTRINSIC_WIDTH.min(cap);
    }
    inline_width(doc, id, style, measurer).min(cap)
}

fn inline_width(doc: &Document, id: Id, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> f32 {
    let mut total = 0.0;
    for child in doc.children(id) {
        match doc.kind(*child) {
            Some(NodeKind::Text { text }) => total += measure_text(measurer, text, style),
            Some(NodeKind::Element { name, style: decls, .. }) => {
                let child_style = css::compute_style(name, decls, Some(style));
                // Out of flow.
                if child_style.position == Position::Absolute {
                    continue;
                }
                total += resolve_width(doc, *child, &child_style, measurer);
            }
            _ => {}
        }
    }
    total
}

/// Width available inside a block container: its own `width`/`max-width`,
/// else the nearest constraining block ancestor. `None` when unconstrained.
pub fn available_width(doc: &Document, id: Id) -> Option<f32> {
    let mut current = Some(id);
    while let Some(node) = current {
        if doc.tag_name(node).is_some() {
            let style = computed_style(doc, node);
            match (style.width, style.max_width) {
                (Some(w), Some(m)) => return Some(w.min(m)),
                (Some(w), None) | (None, Some(w)) => return Some(w),
                (None, None) if style.display != Display::Block => return None,
                (None, None) => {}
            }
        }
        current = doc.parent(node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(parent_style: &[(&str, &str)]) -> (Document, Id) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div).unwrap();
        for (k, v) in parent_style {
            doc.set_style(div, k, v).unwrap();
        }
        (doc, div)
    }

    #[test]
    fn shrink_to_fit_sums_inline_children() {
        let (mut doc, div) = doc_with(&[("font-size", "10px")]);
        let span = doc.create_element("span");
        doc.append_child(div, span).unwrap();
        doc.set_text_content(span, "abcd").unwrap();
        let bold = doc.create_element("b");
        doc.append_child(span, bold).unwrap();
        doc.set_text_content(bold, "xy").unwrap();
        doc.set_style(bold, "font-size", "20px").unwrap();

        let m = MonospaceMeasurer::new(0.5);
        // "abcd" at 5px per glyph; "xy" at 10px per glyph.
        assert_eq!(content_width(&doc, span, &m), 20.0 + 20.0);
    }

    #[test]
    fn letter_spacing_adds_per_character() {
        let (mut doc, div) = doc_with(&[("font-size", "10px"), ("letter-spacing", "2px")]);
        let span = doc.create_element("span");
        doc.append_child(div, span).unwrap();
        doc.set_text_content(span, "abc").unwrap();
        assert_eq!(content_width(&doc, span, &MonospaceMeasurer::new(0.5)), 15.0 + 6.0);
    }

    #[test]
    fn explicit_width_and_input_fallback() {
        let (mut doc, div) = doc_with(&[]);
        let input = doc.create_element("input");
        doc.append_child(div, input).unwrap();
        let m = MonospaceMeasurer::default();
        assert_eq!(content_width(&doc, input, &m), INPUT_INTRINSIC_WIDTH);
        doc.set_style(input, "width", "42px").unwrap();
        assert_eq!(content_width(&doc, input, &m), 42.0);
        doc.set_style(input, "display", "none").unwrap();
        assert_eq!(content_width(&doc, input, &m), 0.0);
    }

    #[test]
    fn absolutely_positioned_children_take_no_inline_space() {
        let (mut doc, div) = doc_with(&[("font-size", "10px")]);
        let span = doc.create_element("span");
        doc.append_child(div, span).unwrap();
        doc.set_text_content(span, "ab").unwrap();
        let probe = doc.create_element("div");
        doc.append_child(span, probe).unwrap();
        doc.set_style(probe, "position", "absolute").unwrap();
        doc.set_text_content(probe, "long probe text").unwrap();
        let m = MonospaceMeasurer::new(0.5);
        assert_eq!(content_width(&doc, span, &m), 10.0);
        assert_eq!(content_width(&doc, probe, &m), 75.0);
    }

    #[test]
    fn available_width_walks_block_ancestors() {
        let (mut doc, outer) = doc_with(&[("width", "400px"), ("max-width", "320px")]);
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();
        assert_eq!(available_width(&doc, inner), Some(320.0));

        let (mut doc, outer) = doc_with(&[]);
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();
        assert_eq!(available_width(&doc, inner), None);
    }
}
