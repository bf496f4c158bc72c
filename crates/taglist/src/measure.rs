//! Keeps the entry element as wide as the text typed into it.

use css::{computed_style, format_px};
use html::{Document, DomError, Id, escape_for_measurement};
use layout::{TextMeasurer, content_width};

/// Whether a proposed entry width may replace the current one.
///
/// Shrinking is allowed down to zero; growing only while the result stays
/// strictly below the container's capacity `max`. Equal widths never apply.
///
/// ```
/// use taglist::is_valid_width_change;
///
/// assert!(is_valid_width_change(40.0, 60.0, 100.0));
/// assert!(is_valid_width_change(80.0, 60.0, 100.0));
/// assert!(!is_valid_width_change(60.0, 60.0, 100.0));
/// assert!(!is_valid_width_change(100.0, 60.0, 100.0));
/// ```
pub fn is_valid_width_change(new: f32, current: f32, max: f32) -> bool {
    (new < current && new >= 0.0) || (new > current && new < max)
}

/// Off-screen probe used to measure the entry text with the entry's font.
#[derive(Debug)]
pub(crate) struct AutoSizer {
    probe: Id,
    last_value: Option<String>,
    comfort: f32,
}

impl AutoSizer {
    /// Create the probe and insert it right after `input`.
    pub(crate) fn new(doc: &mut Document, input: Id, comfort: f32) -> Result<Self, DomError> {
        let probe = doc.create_element("div");
        doc.set_attr(probe, "class", "test")?;

        let font = computed_style(doc, input);
        doc.set_style(probe, "position", "absolute")?;
        doc.set_style(probe, "top", "-9999px")?;
        doc.set_style(probe, "left", "-9999px")?;
        doc.set_style(probe, "width", "auto")?;
        doc.set_style(probe, "font-size", &format_px(font.font_size))?;
        doc.set_style(probe, "font-family", &font.font_family)?;
        doc.set_style(probe, "font-weight", &font.font_weight.to_string())?;
        doc.set_style(probe, "letter-spacing", &format_px(font.letter_spacing))?;
        doc.set_style(probe, "white-space", "nowrap")?;
        doc.insert_after(input, probe)?;

        Ok(Self {
            probe,
            last_value: None,
            comfort,
        })
    }

    pub(crate) fn probe(&self) -> Id {
        self.probe
    }

    /// Re-measure `value` and resize `input` when the change is valid.
    ///
    /// Returns the applied width, or `None` when the value was unchanged since
    /// the previous check or the guard rejected the new width. `max` of `None`
    /// means the container is unbounded.
    pub(crate) fn check(
        &mut self,
        doc: &mut Document,
        input: Id,
        value: &str,
        max: Option<f32>,
        measurer: &dyn TextMeasurer,
    ) -> Result<Option<f32>, DomError> {
        if self.last_value.as_deref() == Some(value) {
            return Ok(None);
        }
        self.last_value = Some(value.to_string());

        doc.set_inner_html(self.probe, &escape_for_measurement(value))?;
        doc.set_style(self.probe, "width", "auto")?;
        let new = content_width(doc, self.probe, measurer) + self.comfort;
        let current = content_width(doc, input, measurer);

        if !is_valid_width_change(new, current, max.unwrap_or(f32::INFINITY)) {
            log::trace!(
                target: "taglist.measure",
                "kept entry width {current}px (proposed {new}px, max {max:?})"
            );
            return Ok(None);
        }
        doc.set_style(input, "width", &format_px(new))?;
        log::trace!(target: "taglist.measure", "entry width {current}px -> {new}px");
        Ok(Some(new))
    }
}
