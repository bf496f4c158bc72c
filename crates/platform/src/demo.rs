//! The demo form: one tag field enhanced by a tag list.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use egui::{CentralPanel, Context, RichText, TextEdit};
use gfx::{EguiTextMeasurer, TagListView};
use html::{Document, DomError, Id};
use layout::TextMeasurer;
use taglist::{Hooks, OPTIONS_ATTRIBUTE, TagList, TagListConfig};

const FIELD_OPTIONS: &str = r#"{"className": "tag", "prefixUrl": "https://crates.io/keywords/"}"#;
const HOOK_LOG_LINES: usize = 8;

pub struct Demo {
    doc: Document,
    field: Id,
    list: Option<TagList>,
    view: TagListView,
    hook_log: Rc<RefCell<VecDeque<String>>>,
    /// Field value while the widget is detached.
    raw_value: String,
    submitted: Option<String>,
    auto_mounted: bool,
}

impl Demo {
    pub fn new() -> Result<Self, DomError> {
        let (doc, field) = build_document()?;
        Ok(Self {
            doc,
            field,
            list: None,
            view: TagListView::new("demo-tags"),
            hook_log: Rc::default(),
            raw_value: String::new(),
            submitted: None,
            auto_mounted: false,
        })
    }

    pub fn field_value(&self) -> &str {
        self.doc.attr(self.field, "value").unwrap_or_default()
    }

    pub fn is_mounted(&self) -> bool {
        self.list.is_some()
    }

    /// Enhance the field with a tag list using the options it carries.
    pub fn mount(&mut self, measurer: Rc<dyn TextMeasurer>) {
        if self.list.is_some() {
            return;
        }
        let config = TagListConfig::from_element(&self.doc, self.field).unwrap_or_else(|err| {
            log::warn!(target: "demo", "ignoring {OPTIONS_ATTRIBUTE}: {err}");
            TagListConfig::default()
        });

        let added = Rc::clone(&self.hook_log);
        let removed = Rc::clone(&self.hook_log);
        let hooks = Hooks::new()
            .on_add(move |list, tag| {
                push_line(&added, format!("added {tag:?} ({} tags)", list.len()));
            })
            .on_remove(move |list, tag| {
                push_line(&removed, format!("removed {tag:?} ({} tags)", list.len()));
            });

        match TagList::attach(
            &mut self.doc,
            self.field,
            Vec::<String>::new(),
            config,
            hooks,
            measurer,
        ) {
            Ok(list) => self.list = Some(list),
            Err(err) => log::error!(target: "demo", "could not attach the tag list: {err}"),
        }
    }

    /// Tear the tag list down, leaving the plain field.
    pub fn unmount(&mut self) {
        let Some(list) = self.list.take() else {
            return;
        };
        if let Err(err) = list.dispose(&mut self.doc) {
            log::error!(target: "demo", "dispose failed: {err}");
        }
        self.raw_value = self.field_value().to_string();
    }

    pub fn ui(&mut self, ctx: &Context) {
        if !self.auto_mounted {
            // Fonts exist from the first pass on.
            self.auto_mounted = true;
            self.mount(Rc::new(EguiTextMeasurer::new(ctx)));
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Tags");
            ui.label("Type a tag and press comma, space or enter. Backspace removes the last one.");
            ui.add_space(8.0);

            match self.list.as_mut() {
                Some(list) => {
                    self.view.show(ui, &mut self.doc, list);
                }
                None => {
                    let edit = ui.add(TextEdit::singleline(&mut self.raw_value).desired_width(480.0));
                    if edit.changed()
                        && let Err(err) = self.doc.set_attr(self.field, "value", &self.raw_value)
                    {
                        log::error!(target: "demo", "field update failed: {err}");
                    }
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Field value:");
                ui.label(RichText::new(self.field_value()).monospace());
            });

            ui.horizontal(|ui| {
                if ui.button("Submit").clicked() {
                    self.submitted = Some(self.field_value().to_string());
                }
                let toggle = if self.is_mounted() { "Detach" } else { "Attach" };
                if ui.button(toggle).clicked() {
                    if self.is_mounted() {
                        self.unmount();
                    } else {
                        self.mount(Rc::new(EguiTextMeasurer::new(ui.ctx())));
                    }
                }
            });
            if let Some(submitted) = &self.submitted {
                ui.label(format!("submitted tags={submitted}"));
            }

            ui.separator();
            let lines = self.hook_log.borrow();
            for line in lines.iter().rev() {
                ui.label(RichText::new(line).small());
            }
        });
    }
}

/// Append to the hook log, keeping only the lines shown.
fn push_line(log: &RefCell<VecDeque<String>>, line: String) {
    let mut log = log.borrow_mut();
    if log.len() == HOOK_LOG_LINES {
        log.pop_front();
    }
    log.push_back(line);
}

fn build_document() -> Result<(Document, Id), DomError> {
    let mut doc = Document::new();
    let page = doc.create_element("div");
    doc.append_child(doc.root(), page)?;
    doc.set_style(page, "width", "480px")?;
    doc.set_style(page, "font-size", "16px")?;

    let form = doc.create_element("form");
    doc.append_child(page, form)?;
    doc.set_attr(form, "method", "post")?;

    let field = doc.create_element("input");
    doc.append_child(form, field)?;
    doc.set_attr(field, "type", "text")?;
    doc.set_attr(field, "name", "tags")?;
    doc.set_attr(field, "value", "rust egui widgets")?;
    doc.set_attr(field, OPTIONS_ATTRIBUTE, FIELD_OPTIONS)?;
    Ok((doc, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::MonospaceMeasurer;

    fn measurer() -> Rc<dyn TextMeasurer> {
        Rc::new(MonospaceMeasurer::default())
    }

    #[test]
    fn mounting_seeds_tags_from_the_field() {
        let mut demo = Demo::new().unwrap();
        demo.mount(measurer());
        let list = demo.list.as_ref().unwrap();
        assert_eq!(list.tags(), ["rust", "egui", "widgets"]);
        assert_eq!(
            demo.doc.attr(list.chips()[0].anchor, "href"),
            Some("https://crates.io/keywords/rust")
        );
        assert_eq!(demo.hook_log.borrow().len(), 3);
    }

    #[test]
    fn hook_log_keeps_only_the_visible_lines() {
        let mut demo = Demo::new().unwrap();
        demo.mount(measurer());
        let list = demo.list.as_mut().unwrap();
        for i in 0..20 {
            list.add_tag(&mut demo.doc, &format!("t{i}"));
        }
        let log = demo.hook_log.borrow();
        assert_eq!(log.len(), HOOK_LOG_LINES);
        assert_eq!(log.back().map(String::as_str), Some("added \"t19\" (23 tags)"));
    }

    #[test]
    fn detach_and_reattach_round_trips_the_field() {
        let mut demo = Demo::new().unwrap();
        demo.mount(measurer());
        let list = demo.list.as_mut().unwrap();
        list.remove_tag(&mut demo.doc, "egui");
        demo.unmount();
        assert!(!demo.is_mounted());
        assert_eq!(demo.raw_value, "rust widgets");
        assert_eq!(demo.doc.style(demo.field, "display"), None);

        demo.doc.set_attr(demo.field, "value", "rust  gui").unwrap();
        demo.mount(measurer());
        assert_eq!(demo.list.as_ref().unwrap().tags(), ["rust", "gui"]);
        assert_eq!(demo.field_value(), "rust gui");
    }
}
