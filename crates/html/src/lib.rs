//! Arena DOM used by the tag list widget and its hosts.
//!
//! Only what an interactive widget needs: elements with attributes and inline
//! style, text nodes, focus, entity escaping and deterministic serialization.

mod document;
mod entities;
mod serialize;
mod types;

pub use crate::document::Document;
pub use crate::entities::{escape_attr, escape_for_measurement, escape_text};
pub use crate::types::{DomError, Id, NodeId, NodeKind};
