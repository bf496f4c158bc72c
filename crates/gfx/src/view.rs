//! Paints a mounted tag list with egui and feeds it egui input.

use css::computed_style;
use egui::{
    Color32, CornerRadius, CursorIcon, EventFilter, Frame, Id as EguiId, Margin, Rect, Response,
    RichText, Sense, Stroke, StrokeKind, Ui, pos2, vec2,
};
use html::Document;
use taglist::{CLOSE_GLYPH, TagList, TagListEvent};

use crate::keys::translate_events;
use crate::text_measurer::font_id;

const CHIP_FILL: Color32 = Color32::from_rgb(0xdd, 0xe8, 0xf6);
const CHIP_TEXT: Color32 = Color32::from_rgb(0x1f, 0x3b, 0x5c);
const ENTRY_PADDING: f32 = 2.0;

struct ChipView {
    close: html::Id,
    label: html::Id,
    text: String,
    title: String,
    font_size: f32,
}

/// Host-side state of one rendered tag list.
pub struct TagListView {
    entry_id: EguiId,
    had_focus: bool,
    last_rect: Option<Rect>,
}

impl TagListView {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            entry_id: EguiId::new(("taglist-entry", id_salt)),
            had_focus: false,
            last_rect: None,
        }
    }

    /// egui id of the entry; its focus mirrors the document focus.
    pub fn entry_id(&self) -> EguiId {
        self.entry_id
    }

    /// Paint `list` and route this frame's input into it.
    ///
    /// Returns the response of the frame around chips and entry.
    pub fn show(&mut self, ui: &mut Ui, doc: &mut Document, list: &mut TagList) -> Response {
        let chips: Vec<ChipView> = list
            .chips()
            .iter()
            .zip(list.tags())
            .map(|(chip, tag)| ChipView {
                close: chip.close,
                label: chip.label,
                text: doc.text_content(chip.label),
                title: tag.clone(),
                font_size: computed_style(doc, chip.label).font_size,
            })
            .collect();
        let entry_style = computed_style(doc, list.input());
        let entry_width = list.entry_width(doc);

        let mut events = Vec::new();
        let has_focus = ui.memory(|m| m.has_focus(self.entry_id));
        match (self.had_focus, has_focus) {
            (false, true) => events.push(TagListEvent::Focus),
            (true, false) => events.push(TagListEvent::Blur),
            _ => {}
        }
        self.had_focus = has_focus;
        if has_focus {
            // Escape belongs to the widget while it has focus; Tab still moves focus.
            let filter = EventFilter {
                tab: false,
                horizontal_arrows: true,
                vertical_arrows: false,
                escape: true,
            };
            ui.memory_mut(|m| m.set_focus_lock_filter(self.entry_id, filter));
            events.extend(ui.input(|i| translate_events(&i.events)));
        }

        // Registered ahead of the chips so that they stay on top for clicks.
        let entry_id = self.entry_id;
        if let Some(rect) = self.last_rect {
            let area = ui.interact(rect, entry_id.with("area"), Sense::click());
            if area.clicked() {
                ui.memory_mut(|m| m.request_focus(entry_id));
                events.push(TagListEvent::Click {
                    target: list.container(),
                });
            }
        }

        let max_width = list.max_width().unwrap_or_else(|| ui.available_width());
        let frame = Frame::new()
            .stroke(Stroke::new(1.0, ui.visuals().widgets.inactive.bg_stroke.color))
            .corner_radius(CornerRadius::same(3))
            .inner_margin(Margin::same(4));
        let inner = frame.show(ui, |ui| {
            ui.set_width(max_width);
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = vec2(4.0, 4.0);
                for chip in &chips {
                    if let Some(event) = chip_ui(ui, chip) {
                        events.push(event);
                    }
                }

                let font = font_id(&entry_style);
                let row_height = ui.fonts(|f| f.row_height(&font));
                let size = vec2(entry_width, row_height + 2.0 * ENTRY_PADDING);
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                let response = ui
                    .interact(rect, entry_id, Sense::click())
                    .on_hover_cursor(CursorIcon::Text);
                if response.clicked() {
                    response.request_focus();
                    events.push(TagListEvent::Click {
                        target: list.input(),
                    });
                }
                paint_entry(ui, rect, list, font, has_focus);
            });
        });

        self.last_rect = Some(inner.response.rect);

        let mut changed = false;
        for event in &events {
            let response = list.handle_event(doc, event);
            log::trace!(target: "taglist.events", "{event:?} -> {response:?}");
            changed = true;
        }

        // The document decides focus, e.g. Escape blurs the entry.
        let doc_focus = doc.focused() == Some(list.input());
        if doc_focus != ui.memory(|m| m.has_focus(self.entry_id)) {
            ui.memory_mut(|m| {
                if doc_focus {
                    m.request_focus(self.entry_id);
                } else {
                    m.surrender_focus(self.entry_id);
                }
            });
        }
        if changed {
            ui.ctx().request_repaint();
        }
        inner.response
    }
}

fn chip_ui(ui: &mut Ui, chip: &ChipView) -> Option<TagListEvent> {
    let mut event = None;
    Frame::new()
        .fill(CHIP_FILL)
        .corner_radius(CornerRadius::same(4))
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                let close = ui.add(
                    egui::Button::new(RichText::new(CLOSE_GLYPH).size(chip.font_size * 0.8))
                        .frame(false)
                        .small(),
                );
                if close.clicked() {
                    event = Some(TagListEvent::Click { target: chip.close });
                }
                let label = ui
                    .add(
                        egui::Label::new(RichText::new(&chip.text).size(chip.font_size).color(CHIP_TEXT))
                            .sense(Sense::click())
                            .selectable(false),
                    )
                    .on_hover_text(&chip.title);
                if label.clicked() {
                    event = Some(TagListEvent::Click { target: chip.label });
                }
            });
        });
    event
}

fn paint_entry(ui: &Ui, rect: Rect, list: &TagList, font: egui::FontId, focused: bool) {
    let painter = ui.painter_at(rect.expand(1.0));
    let visuals = ui.visuals();
    if focused {
        painter.rect_stroke(
            rect,
            CornerRadius::same(2),
            visuals.selection.stroke,
            StrokeKind::Inside,
        );
    }

    let text_color = visuals.text_color();
    let value = list.entry_value();
    let origin = pos2(rect.left() + ENTRY_PADDING, rect.top() + ENTRY_PADDING);
    let prefix_width = |end: usize| -> f32 {
        ui.fonts(|f| {
            f.layout_no_wrap(value[..end].to_owned(), font.clone(), text_color)
                .rect
                .width()
        })
    };

    let buffer = list.entry_buffer();
    if let Some(sel) = buffer.selection() {
        let x0 = origin.x + prefix_width(sel.start);
        let x1 = origin.x + prefix_width(sel.end);
        let sel_rect = Rect::from_min_max(pos2(x0, rect.top() + 1.0), pos2(x1, rect.bottom() - 1.0));
        painter.rect_filled(sel_rect, CornerRadius::ZERO, visuals.selection.bg_fill);
    }

    let galley = ui.fonts(|f| f.layout_no_wrap(value.to_owned(), font.clone(), text_color));
    painter.galley(origin, galley, text_color);

    if focused {
        let x = origin.x + prefix_width(buffer.caret());
        painter.line_segment(
            [pos2(x, rect.top() + 1.0), pos2(x, rect.bottom() - 1.0)],
            Stroke::new(1.0, text_color),
        );
    }
}
