use std::cell::RefCell;
use std::collections::HashMap;

use css::ComputedStyle;
use egui::{Color32, Context, FontId};
use layout::TextMeasurer;

/// `egui`-backed adapter for measuring text during layout.
pub struct EguiTextMeasurer {
    ctx: Context,
    blank_width_cache: RefCell<HashMap<(u32, bool), f32>>,
}

pub fn font_id(style: &ComputedStyle) -> FontId {
    if style.is_monospace() {
        FontId::monospace(style.font_size)
    } else {
        FontId::proportional(style.font_size)
    }
}

impl EguiTextMeasurer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            blank_width_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn layout_width(&self, text: &str, font: FontId) -> f32 {
        // Color does not affect metrics.
        self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), font, Color32::PLACEHOLDER)
                .rect
                .width()
        })
    }

    /// Advance of one blank, cached per font size.
    ///
    /// A lone blank can lay out to an empty rect, so the width is taken from
    /// NBSP first and from the `x x` minus `xx` difference as a fallback.
    fn blank_width(&self, style: &ComputedStyle) -> f32 {
        let key = (style.font_size.round().max(0.0) as u32, style.is_monospace());
        if let Some(w) = self.blank_width_cache.borrow().get(&key).copied() {
            return w;
        }

        let font = font_id(style);
        let w_nbsp = self.layout_width("\u{00A0}", font.clone());
        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            let w_with = self.layout_width("x\u{00A0}x", font.clone());
            let w_without = self.layout_width("xx", font);
            let w = (w_with - w_without).max(0.0);
            if w.is_finite() && w > 0.0 {
                w
            } else {
                (style.font_size * 0.33).max(1.0)
            }
        };

        self.blank_width_cache.borrow_mut().insert(key, w);
        w
    }
}

impl TextMeasurer for EguiTextMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        // Whitespace-only probe text, e.g. a few typed spaces.
        if text.chars().all(char::is_whitespace) {
            return self.blank_width(style) * text.chars().count() as f32;
        }
        self.layout_width(text, font_id(style))
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        self.ctx.fonts(|f| f.row_height(&font_id(style)))
    }
}
