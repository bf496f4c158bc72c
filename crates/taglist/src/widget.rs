use std::fmt;
use std::rc::Rc;

use core_types::{KeyCode, Modifiers};
use html::{Document, DomError, Id};
use input_core::EntryBuffer;
use layout::{TextMeasurer, available_width, content_width};

use crate::chip::{CHIP_PADDING, elide_label, remove_chip, render_chip};
use crate::config::TagListConfig;
use crate::error::TagListError;
use crate::events::{EventResponse, TagListEvent};
use crate::field::FieldFormat;
use crate::hooks::Hooks;
use crate::measure::AutoSizer;
use crate::model::{ChipHandle, TagModel, normalize_tag};

enum Mode {
    /// Mounted into an element that now holds only the widget.
    Container,
    /// Enhancing a hidden `<input>` whose value mirrors the tags.
    BoundField {
        field: Id,
        format: FieldFormat,
        /// Inline `display` of the field before it was hidden.
        display: Option<String>,
    },
}

/// A tag list mounted into a [`Document`].
///
/// The widget owns the nodes it creates; every operation takes the document
/// explicitly. Invalid tag input is ignored and reported as `None` or an
/// empty vector.
pub struct TagList {
    config: TagListConfig,
    hooks: Hooks,
    measurer: Rc<dyn TextMeasurer>,
    mode: Mode,
    container: Id,
    entry: Id,
    input: Id,
    buffer: EntryBuffer,
    synced_revision: Option<u64>,
    suppress_text: bool,
    sizer: AutoSizer,
    model: TagModel,
    max_width: Option<f32>,
}

fn dom_failure(op: &str, err: DomError) {
    log::error!(target: "taglist.model", "{op} failed on a widget-owned node: {err}");
}

impl TagList {
    /// Mount a tag list on `target`.
    ///
    /// An `<input>` target switches to bound-field mode: the field is hidden,
    /// a `div.taglist` container is inserted right after it, and the field's
    /// current value seeds the tags ahead of `initial`. Any other element is
    /// emptied and used as the container. Seeding goes through
    /// [`TagList::add_tag`], so hooks observe seeded tags too.
    pub fn attach<I, S>(
        doc: &mut Document,
        target: Id,
        initial: I,
        config: TagListConfig,
        hooks: Hooks,
        measurer: Rc<dyn TextMeasurer>,
    ) -> Result<Self, TagListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(name) = doc.tag_name(target) else {
            return Err(TagListError::MissingTarget(target));
        };

        let mut seeds = Vec::new();
        let (mode, container) = if name == "input" {
            let format = FieldFormat::for_config(&config);
            seeds.extend(format.decode(doc.attr(target, "value").unwrap_or_default()));
            let display = doc.style(target, "display").map(str::to_string);

            let container = doc.create_element("div");
            doc.set_attr(container, "class", "taglist")?;
            doc.insert_after(target, container)?;
            doc.set_style(target, "display", "none")?;
            (
                Mode::BoundField {
                    field: target,
                    format,
                    display,
                },
                container,
            )
        } else {
            doc.clear_children(target)?;
            (Mode::Container, target)
        };
        seeds.extend(initial.into_iter().map(|t| t.as_ref().to_string()));

        let entry = doc.create_element("span");
        doc.set_attr(entry, "class", "taginput")?;
        let input = doc.create_element("input");
        doc.set_attr(input, "type", &config.input_type)?;
        doc.append_child(container, entry)?;
        doc.append_child(entry, input)?;

        let sizer = AutoSizer::new(doc, input, config.input_comfort)?;
        let max_width = available_width(doc, container);

        log::debug!(
            target: "taglist.model",
            "attached to node {} ({} mode, max width {max_width:?}, {} seed tags)",
            target.0,
            if matches!(mode, Mode::Container) { "container" } else { "bound-field" },
            seeds.len()
        );

        let mut list = TagList {
            config,
            hooks,
            measurer,
            mode,
            container,
            entry,
            input,
            buffer: EntryBuffer::new(),
            synced_revision: None,
            suppress_text: false,
            sizer,
            model: TagModel::default(),
            max_width,
        };
        for seed in &seeds {
            list.add_tag(doc, seed);
        }
        list.sync_field(doc);
        list.refresh_entry(doc);
        Ok(list)
    }

    /// Commit one tag. Returns its chip, or `None` when `raw` is blank after
    /// trimming or already present.
    pub fn add_tag(&mut self, doc: &mut Document, raw: &str) -> Option<ChipHandle> {
        let tag = normalize_tag(raw)?;
        if self.model.contains(tag) {
            log::trace!(target: "taglist.model", "ignoring duplicate tag {tag:?}");
            return None;
        }

        let chip = match render_chip(
            doc,
            self.container,
            self.entry,
            &self.config.class_name,
            self.config.prefix_url.as_deref(),
            tag,
        ) {
            Ok(chip) => chip,
            Err(err) => {
                dom_failure("rendering a chip", err);
                return None;
            }
        };
        if let Some(max) = self.max_width {
            let budget = max - self.config.input_comfort - CHIP_PADDING;
            if let Err(err) = elide_label(doc, chip.label, tag, budget, self.measurer.as_ref()) {
                dom_failure("eliding a chip label", err);
            }
        }

        let tag = tag.to_string();
        self.model.push(tag.clone(), chip);
        log::debug!(target: "taglist.model", "added tag {tag:?} ({} total)", self.model.len());

        if let Some(mut hook) = self.hooks.on_add.take() {
            hook(self, &tag);
            self.hooks.on_add = Some(hook);
        }
        self.sync_field(doc);
        Some(chip)
    }

    /// Remove one tag. Returns the removed chip, or `None` when `raw` is blank
    /// after trimming or not present.
    pub fn remove_tag(&mut self, doc: &mut Document, raw: &str) -> Option<ChipHandle> {
        let index = self.model.position(normalize_tag(raw)?)?;
        let (tag, chip) = self.model.remove(index);
        if let Err(err) = remove_chip(doc, &chip) {
            dom_failure("removing a chip", err);
        }
        log::debug!(target: "taglist.model", "removed tag {tag:?} ({} left)", self.model.len());

        if let Some(mut hook) = self.hooks.on_remove.take() {
            hook(self, &tag);
            self.hooks.on_remove = Some(hook);
        }
        self.sync_field(doc);
        Some(chip)
    }

    /// Commit raw entry text.
    ///
    /// An `on_process` hook replaces the default entirely. Otherwise a bound
    /// field with a delimiter splits `raw` and adds each fragment in order,
    /// and everything else adds `raw` as one tag. Returns the chips created.
    pub fn process_tag(&mut self, doc: &mut Document, raw: &str) -> Vec<ChipHandle> {
        if let Some(mut hook) = self.hooks.on_process.take() {
            let before: Vec<Id> = self.model.chips().iter().map(|c| c.anchor).collect();
            hook(self, doc, raw);
            self.hooks.on_process = Some(hook);
            return self
                .model
                .chips()
                .iter()
                .filter(|c| !before.contains(&c.anchor))
                .copied()
                .collect();
        }

        match self.split_delimiter() {
            Some(delimiter) => raw
                .split(delimiter.as_str())
                .filter_map(|fragment| self.add_tag(doc, fragment))
                .collect(),
            None => self.add_tag(doc, raw).into_iter().collect(),
        }
    }

    fn split_delimiter(&self) -> Option<String> {
        match self.mode {
            Mode::BoundField { .. } => self.config.active_delimiter().map(str::to_string),
            Mode::Container => None,
        }
    }

    /// Route one host event through key dispatch, editing and auto-sizing.
    pub fn handle_event(&mut self, doc: &mut Document, event: &TagListEvent) -> EventResponse {
        log::trace!(target: "taglist.events", "{event:?}");
        // Only the text event right after a commit key can be its character.
        let suppress = std::mem::take(&mut self.suppress_text);
        let response = match event {
            TagListEvent::KeyDown { code, modifiers } => self.on_key_down(doc, *code, *modifiers),
            TagListEvent::KeyUp { .. } => EventResponse::default(),
            TagListEvent::Text(text) => {
                if suppress && text.chars().count() == 1 {
                    log::trace!(target: "taglist.events", "dropped text {text:?} of a commit key");
                } else {
                    self.buffer.insert_text(text);
                }
                EventResponse::default()
            }
            TagListEvent::Focus => {
                if let Err(err) = doc.focus(self.input) {
                    dom_failure("focusing the entry", err);
                }
                EventResponse::default()
            }
            TagListEvent::Blur => {
                if doc.focused() == Some(self.input) {
                    doc.blur();
                }
                if !self.buffer.is_empty() {
                    self.commit(doc);
                }
                EventResponse::default()
            }
            TagListEvent::Click { target } => self.on_click(doc, *target),
        };
        self.refresh_entry(doc);
        response
    }

    fn on_key_down(&mut self, doc: &mut Document, code: KeyCode, modifiers: Modifiers) -> EventResponse {
        match code {
            KeyCode::ENTER => {
                self.commit(doc);
                EventResponse::prevented()
            }
            KeyCode::ESCAPE => {
                self.buffer.clear();
                if doc.focused() == Some(self.input) {
                    doc.blur();
                }
                EventResponse::default()
            }
            KeyCode::TAB => {
                // The host moves focus on; pending text is committed first.
                if !self.buffer.is_empty() {
                    self.commit(doc);
                }
                if doc.focused() == Some(self.input) {
                    doc.blur();
                }
                EventResponse::default()
            }
            KeyCode::BACKSPACE if self.buffer.is_empty() => {
                if let Some(last) = self.model.tags().last().cloned() {
                    self.remove_tag(doc, &last);
                }
                EventResponse::default()
            }
            code if matches!(self.mode, Mode::BoundField { .. }) && self.config.commits_on(code) => {
                self.commit(doc);
                self.suppress_text = code.produces_text();
                EventResponse::prevented()
            }
            code => {
                self.edit(code, modifiers);
                EventResponse::default()
            }
        }
    }

    fn edit(&mut self, code: KeyCode, modifiers: Modifiers) {
        match code {
            KeyCode::BACKSPACE => self.buffer.backspace(),
            KeyCode::DELETE => self.buffer.delete_forward(),
            KeyCode::LEFT => self.buffer.move_left(modifiers.shift),
            KeyCode::RIGHT => self.buffer.move_right(modifiers.shift),
            KeyCode::HOME => self.buffer.move_home(modifiers.shift),
            KeyCode::END => self.buffer.move_end(modifiers.shift),
            KeyCode(65) if modifiers.ctrl => self.buffer.select_all(),
            _ => {}
        }
    }

    fn on_click(&mut self, doc: &mut Document, target: Id) -> EventResponse {
        let in_container = doc.contains(self.container, target);
        let mut response = EventResponse::default();

        if let Some(index) = self.model.position_of_chip(|c| doc.contains(c.close, target)) {
            let tag = self.model.tags()[index].clone();
            self.remove_tag(doc, &tag);
            response = EventResponse::prevented();
        } else if self.model.position_of_chip(|c| doc.contains(c.anchor, target)).is_some() {
            response = EventResponse::prevented();
        }

        if in_container && let Err(err) = doc.focus(self.input) {
            dom_failure("focusing the entry", err);
        }
        response
    }

    fn commit(&mut self, doc: &mut Document) {
        let value = self.buffer.value().to_string();
        self.process_tag(doc, &value);
        self.buffer.clear();
    }

    /// Mirror the entry buffer into the input's `value` and re-run auto-size.
    fn refresh_entry(&mut self, doc: &mut Document) {
        let revision = self.buffer.revision();
        if self.synced_revision != Some(revision) {
            if let Err(err) = doc.set_attr(self.input, "value", self.buffer.value()) {
                dom_failure("updating the entry value", err);
            }
            self.synced_revision = Some(revision);
        }
        let measured = self.sizer.check(
            doc,
            self.input,
            self.buffer.value(),
            self.max_width,
            self.measurer.as_ref(),
        );
        if let Err(err) = measured {
            dom_failure("sizing the entry", err);
        }
    }

    fn sync_field(&self, doc: &mut Document) {
        let Mode::BoundField { field, format, .. } = &self.mode else {
            return;
        };
        let value = format.encode(self.model.tags());
        match doc.set_attr(*field, "value", &value) {
            Ok(()) => log::trace!(target: "taglist.model", "field value is now {value:?}"),
            Err(err) => log::warn!(target: "taglist.model", "bound field is gone: {err}"),
        }
    }

    /// Tear the widget down.
    ///
    /// Chips, the entry and its probe are removed. A container is left empty;
    /// a bound field gets its inserted container removed and is shown again
    /// with its last serialized value.
    pub fn dispose(mut self, doc: &mut Document) -> Result<(), TagListError> {
        for chip in self.model.drain() {
            remove_chip(doc, &chip)?;
        }
        doc.remove(self.entry)?;
        if let Mode::BoundField { field, display, .. } = &self.mode {
            doc.remove(self.container)?;
            match display {
                Some(display) => doc.set_style(*field, "display", display)?,
                None => doc.remove_style(*field, "display")?,
            }
        }
        log::debug!(target: "taglist.model", "disposed tag list on node {}", self.container.0);
        Ok(())
    }

    pub fn tags(&self) -> &[String] {
        self.model.tags()
    }

    pub fn chips(&self) -> &[ChipHandle] {
        self.model.chips()
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.len() == 0
    }

    pub fn config(&self) -> &TagListConfig {
        &self.config
    }

    pub fn bound_field(&self) -> Option<Id> {
        match self.mode {
            Mode::BoundField { field, .. } => Some(field),
            Mode::Container => None,
        }
    }

    pub fn field_format(&self) -> Option<&FieldFormat> {
        match &self.mode {
            Mode::BoundField { format, .. } => Some(format),
            Mode::Container => None,
        }
    }

    pub fn container(&self) -> Id {
        self.container
    }

    /// The `span.taginput` wrapping the entry input.
    pub fn entry(&self) -> Id {
        self.entry
    }

    pub fn input(&self) -> Id {
        self.input
    }

    pub fn entry_value(&self) -> &str {
        self.buffer.value()
    }

    pub fn entry_buffer(&self) -> &EntryBuffer {
        &self.buffer
    }

    /// Used width of the entry input in px.
    pub fn entry_width(&self, doc: &Document) -> f32 {
        content_width(doc, self.input, self.measurer.as_ref())
    }

    /// Width chips and entry must fit in; `None` when unbounded.
    pub fn max_width(&self) -> Option<f32> {
        self.max_width
    }
}

impl fmt::Debug for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagList")
            .field("tags", &self.model.tags())
            .field("container", &self.container)
            .field("bound_field", &self.bound_field())
            .field("entry_value", &self.buffer.value())
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
