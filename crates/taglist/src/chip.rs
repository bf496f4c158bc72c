//! Chip rendering and label elision.

use html::{Document, DomError, Id};
use layout::TextMeasurer;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::model::ChipHandle;

/// Bytes `encodeURIComponent` leaves untouched, besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const CLOSE_GLYPH: &str = "\u{2715}";
pub const ELLIPSIS: char = '\u{2026}';

/// Room subtracted from the label budget for the close control and padding.
pub const CHIP_PADDING: f32 = 10.0;

pub fn chip_href(prefix_url: Option<&str>, tag: &str) -> String {
    let encoded = utf8_percent_encode(tag, URI_COMPONENT);
    match prefix_url {
        Some(prefix) => format!("{prefix}{encoded}"),
        None => encoded.to_string(),
    }
}

fn span_with_text(doc: &mut Document, class: Option<&str>, text: &str) -> Result<Id, DomError> {
    let span = doc.create_element("span");
    if let Some(class) = class {
        doc.set_attr(span, "class", class)?;
    }
    doc.set_text_content(span, text)?;
    Ok(span)
}

/// Build a chip for `tag` and insert it into `parent` right before `before`.
///
/// ```text
/// <a class="tag" href="…" onclick="return false" title="tag">
///   <span class="tagclose">✕</span><span class="tagname">tag</span>
/// </a><span> </span>
/// ```
pub(crate) fn render_chip(
    doc: &mut Document,
    parent: Id,
    before: Id,
    class_name: &str,
    prefix_url: Option<&str>,
    tag: &str,
) -> Result<ChipHandle, DomError> {
    let anchor = doc.create_element("a");
    doc.set_attr(anchor, "class", class_name)?;
    doc.set_attr(anchor, "href", &chip_href(prefix_url, tag))?;
    doc.set_attr(anchor, "onclick", "return false")?;
    doc.set_attr(anchor, "title", tag)?;

    let close = span_with_text(doc, Some("tagclose"), CLOSE_GLYPH)?;
    let label = span_with_text(doc, Some("tagname"), tag)?;
    doc.append_child(anchor, close)?;
    doc.append_child(anchor, label)?;

    let spacer = span_with_text(doc, None, " ")?;
    doc.insert_before(parent, anchor, before)?;
    doc.insert_before(parent, spacer, before)?;

    Ok(ChipHandle {
        anchor,
        close,
        label,
        spacer,
    })
}

pub(crate) fn remove_chip(doc: &mut Document, chip: &ChipHandle) -> Result<(), DomError> {
    doc.remove(chip.anchor)?;
    doc.remove(chip.spacer)
}

/// Shorten the label of a freshly rendered chip until it fits `budget` px.
///
/// Each step drops one more trailing character of `tag` and appends `…`,
/// re-measuring in between. The loop is monotonic and stops once the label
/// fits or only one character is left, so it relabels at most
/// `tag.chars().count()` times. Returns the number of relabels.
pub(crate) fn elide_label(
    doc: &mut Document,
    label: Id,
    tag: &str,
    budget: f32,
    measurer: &dyn TextMeasurer,
) -> Result<usize, DomError> {
    let len = tag.chars().count();
    let mut elided = 0;
    loop {
        if layout::content_width(doc, label, measurer) <= budget {
            break;
        }
        if elided >= len {
            break;
        }
        let mut abbrev: String = tag.chars().take(len - elided).collect();
        abbrev.push(ELLIPSIS);
        elided += 1;
        doc.set_text_content(label, &abbrev)?;
    }
    if elided > 0 {
        log::trace!(target: "taglist.model", "elided chip label for {tag:?} in {elided} steps");
    }
    Ok(elided)
}
