use html::Document;

use crate::widget::TagList;

pub type TagHook = Box<dyn FnMut(&TagList, &str)>;
pub type ProcessHook = Box<dyn FnMut(&mut TagList, &mut Document, &str)>;

/// Optional callbacks of a tag list, all invoked synchronously.
///
/// `on_add` and `on_remove` run after the model and the DOM changed, and
/// before the bound field is re-serialized. `on_process` replaces the default
/// commit entirely: it receives the raw entry text and usually calls
/// [`TagList::add_tag`] itself.
#[derive(Default)]
pub struct Hooks {
    pub(crate) on_add: Option<TagHook>,
    pub(crate) on_remove: Option<TagHook>,
    pub(crate) on_process: Option<ProcessHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_add(mut self, hook: impl FnMut(&TagList, &str) + 'static) -> Self {
        self.on_add = Some(Box::new(hook));
        self
    }

    pub fn on_remove(mut self, hook: impl FnMut(&TagList, &str) + 'static) -> Self {
        self.on_remove = Some(Box::new(hook));
        self
    }

    pub fn on_process(
        mut self,
        hook: impl FnMut(&mut TagList, &mut Document, &str) + 'static,
    ) -> Self {
        self.on_process = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_add", &self.on_add.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .field("on_process", &self.on_process.is_some())
            .finish()
    }
}
