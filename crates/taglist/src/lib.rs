//! # taglist
//!
//! A tag input widget over an arena [`html::Document`]: committed tags are
//! rendered as removable chips in front of a live entry field.
//!
//! - [`TagList`]: the mounted widget with `add_tag`, `remove_tag`,
//!   `process_tag`, event dispatch and disposal
//! - [`TagListConfig`]: options, deserializable from a JSON options object
//! - [`Hooks`]: optional `on_add`/`on_remove`/`on_process` callbacks
//! - [`FieldFormat`]: delimited or JSON serialization into a bound field
//!
//! Mounting on an `<input>` hides the field and keeps its `value` in sync with
//! the tags, so a plain form submission still carries them:
//!
//! ```
//! use std::rc::Rc;
//!
//! use html::Document;
//! use layout::MonospaceMeasurer;
//! use taglist::{Hooks, TagList, TagListConfig};
//!
//! let mut doc = Document::new();
//! let field = doc.create_element("input");
//! doc.append_child(doc.root(), field).unwrap();
//! doc.set_attr(field, "value", "red").unwrap();
//!
//! let mut list = TagList::attach(
//!     &mut doc,
//!     field,
//!     ["green"],
//!     TagListConfig::default(),
//!     Hooks::new(),
//!     Rc::new(MonospaceMeasurer::default()),
//! )
//! .unwrap();
//! list.process_tag(&mut doc, "blue red");
//! assert_eq!(doc.attr(field, "value"), Some("red green blue"));
//! ```

mod chip;
mod config;
mod error;
mod events;
mod field;
mod hooks;
mod measure;
mod model;
mod widget;

pub use chip::{CHIP_PADDING, CLOSE_GLYPH, ELLIPSIS, chip_href};
pub use config::{OPTIONS_ATTRIBUTE, TagListConfig};
pub use error::TagListError;
pub use events::{EventResponse, TagListEvent};
pub use field::FieldFormat;
pub use hooks::{Hooks, ProcessHook, TagHook};
pub use measure::is_valid_width_change;
pub use model::{ChipHandle, normalize_tag};
pub use widget::TagList;
