use std::collections::HashMap;

use crate::entities::decode_entities;
use crate::types::{DomError, Id, NodeId, NodeKind};

struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

/// Mutable arena DOM.
///
/// Ids are handed out monotonically and never reused, so a stale [`Id`] held
/// after [`Document::remove`] reports [`DomError::UnknownNode`] instead of
/// aliasing a newer node. Only live nodes are stored; removal frees them.
pub struct Document {
    live: HashMap<Id, NodeRecord>,
    next_id: NodeId,
    focused: Option<Id>,
}

impl Document {
    pub fn new() -> Self {
        let root = NodeRecord {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            live: HashMap::from([(Id::ROOT, root)]),
            next_id: Id::ROOT.0 + 1,
            focused: None,
        }
    }

    /// Number of live nodes, the document node included.
    pub fn node_count(&self) -> usize {
        self.live.len()
    }

    pub fn root(&self) -> Id {
        Id::ROOT
    }

    /// Create a detached element. Names are stored lowercase.
    pub fn create_element(&mut self, name: &str) -> Id {
        self.alloc(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> Id {
        self.alloc(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn alloc(&mut self, kind: NodeKind) -> Id {
        let id = Id(self.next_id);
        self.next_id += 1;
        self.live.insert(
            id,
            NodeRecord {
                kind,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    pub fn is_live(&self, id: Id) -> bool {
        self.record(id).is_ok()
    }

    fn record(&self, id: Id) -> Result<&NodeRecord, DomError> {
        self.live.get(&id).ok_or(DomError::UnknownNode(id))
    }

    fn record_mut(&mut self, id: Id) -> Result<&mut NodeRecord, DomError> {
        self.live.get_mut(&id).ok_or(DomError::UnknownNode(id))
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.record(id).ok().map(|r| &r.kind)
    }

    /// Lowercase element name, `None` for text, document and dead nodes.
    pub fn tag_name(&self, id: Id) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).ok().and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Inclusive ancestry check: a node contains itself.
    pub fn contains(&self, ancestor: Id, node: Id) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn check_insert(&self, parent: Id, child: Id) -> Result<(), DomError> {
        if !self.record(parent)?.kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        let child_record = self.record(child)?;
        if child == Id::ROOT {
            return Err(DomError::CycleDetected { parent, child });
        }
        if child_record.parent.is_some() {
            return Err(DomError::InvalidParent(child));
        }
        if self.contains(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        Ok(())
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert a detached node into `parent` right before `reference`.
    pub fn insert_before(&mut self, parent: Id, child: Id, reference: Id) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        let pos = self
            .record(parent)?
            .children
            .iter()
            .position(|k| *k == reference)
            .ok_or(DomError::InvalidSibling { parent, reference })?;
        self.record_mut(parent)?.children.insert(pos, child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert a detached node as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: Id, child: Id) -> Result<(), DomError> {
        let parent = self
            .parent(reference)
            .ok_or(DomError::InvalidParent(reference))?;
        self.check_insert(parent, child)?;
        let pos = self
            .record(parent)?
            .children
            .iter()
            .position(|k| *k == reference)
            .ok_or(DomError::InvalidSibling { parent, reference })?;
        self.record_mut(parent)?.children.insert(pos + 1, child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach a node from its parent, keeping its subtree alive.
    pub fn detach(&mut self, id: Id) -> Result<(), DomError> {
        let Some(parent) = self.record_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.record_mut(parent)?.children.retain(|k| *k != id);
        Ok(())
    }

    /// Detach and free a node together with its whole subtree.
    ///
    /// Focus held inside the removed subtree is dropped.
    pub fn remove(&mut self, id: Id) -> Result<(), DomError> {
        if id == Id::ROOT {
            return Err(DomError::RootRemoval);
        }
        if self.focused.is_some_and(|f| self.contains(id, f)) {
            self.focused = None;
        }
        self.detach(id)?;

        let mut stack = vec![id];
        let mut freed = 0usize;
        while let Some(current) = stack.pop() {
            if let Some(record) = self.live.remove(&current) {
                stack.extend(record.children);
                freed += 1;
            }
        }
        log::trace!(target: "html.dom", "removed node {} ({freed} nodes freed)", id.0);
        Ok(())
    }

    /// Free every child of `id`.
    pub fn clear_children(&mut self, id: Id) -> Result<(), DomError> {
        let children = self.record(id)?.children.clone();
        for child in children {
            self.remove(child)?;
        }
        Ok(())
    }

    fn element_parts(
        &self,
        id: Id,
    ) -> Result<(&Vec<(String, Option<String>)>, &Vec<(String, String)>), DomError> {
        match &self.record(id)?.kind {
            NodeKind::Element {
                attributes, style, ..
            } => Ok((attributes, style)),
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    fn element_parts_mut(
        &mut self,
        id: Id,
    ) -> Result<(&mut Vec<(String, Option<String>)>, &mut Vec<(String, String)>), DomError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element {
                attributes, style, ..
            } => Ok((attributes, style)),
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    pub fn attributes(&self, id: Id) -> &[(String, Option<String>)] {
        self.element_parts(id)
            .map(|(attrs, _)| attrs.as_slice())
            .unwrap_or(&[])
    }

    /// Attribute value; boolean attributes without a value read as `""`.
    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn set_attr(&mut self, id: Id, name: &str, value: &str) -> Result<(), DomError> {
        let (attrs, _) = self.element_parts_mut(id)?;
        match attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attrs.push((name.to_ascii_lowercase(), Some(value.to_string()))),
        }
        Ok(())
    }

    pub fn remove_attr(&mut self, id: Id, name: &str) -> Result<(), DomError> {
        let (attrs, _) = self.element_parts_mut(id)?;
        attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        Ok(())
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn inline_style(&self, id: Id) -> &[(String, String)] {
        self.element_parts(id)
            .map(|(_, style)| style.as_slice())
            .unwrap_or(&[])
    }

    pub fn style(&self, id: Id, property: &str) -> Option<&str> {
        self.inline_style(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    /// Set one inline declaration, replacing an existing one in place.
    pub fn set_style(&mut self, id: Id, property: &str, value: &str) -> Result<(), DomError> {
        let (_, style) = self.element_parts_mut(id)?;
        match style
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
        {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((property.to_ascii_lowercase(), value.to_string())),
        }
        Ok(())
    }

    pub fn remove_style(&mut self, id: Id, property: &str) -> Result<(), DomError> {
        let (_, style) = self.element_parts_mut(id)?;
        style.retain(|(k, _)| !k.eq_ignore_ascii_case(property));
        Ok(())
    }

    /// Concatenated text of every text node below `id` (or of `id` itself).
    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: Id, out: &mut String) {
        let Ok(record) = self.record(id) else {
            return;
        };
        match &record.kind {
            NodeKind::Text { text } => out.push_str(text),
            _ => {
                for child in &record.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Replace the children of an element (or the data of a text node) with `text`.
    ///
    /// An element whose only child is a text node keeps that node and has its
    /// data rewritten, so repeated updates allocate nothing.
    pub fn set_text_content(&mut self, id: Id, text: &str) -> Result<(), DomError> {
        let record = self.record_mut(id)?;
        if let NodeKind::Text { text: existing } = &mut record.kind {
            existing.clear();
            existing.push_str(text);
            return Ok(());
        }
        let only_child = match record.children[..] {
            [only] => Some(only),
            _ => None,
        };
        if let Some(only) = only_child
            && !text.is_empty()
            && let Some(NodeRecord {
                kind: NodeKind::Text { text: existing },
                ..
            }) = self.live.get_mut(&only)
        {
            existing.clear();
            existing.push_str(text);
            return Ok(());
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Replace the children of `id` with the character data in `markup`.
    ///
    /// Entity references are decoded; tags are not parsed, so markup-significant
    /// characters must arrive escaped.
    pub fn set_inner_html(&mut self, id: Id, markup: &str) -> Result<(), DomError> {
        let decoded = decode_entities(markup);
        self.set_text_content(id, &decoded)
    }

    pub fn focused(&self) -> Option<Id> {
        self.focused
    }

    pub fn focus(&mut self, id: Id) -> Result<(), DomError> {
        self.record(id)?;
        self.focused = Some(id);
        Ok(())
    }

    /// Drop focus, returning the node that had it.
    pub fn blur(&mut self) -> Option<Id> {
        self.focused.take()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
