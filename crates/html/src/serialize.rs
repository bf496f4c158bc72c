use crate::document::Document;
use crate::entities::{escape_attr, escape_text};
use crate::types::{Id, NodeKind};

const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta"];

impl Document {
    /// Serialize `id` and its subtree.
    ///
    /// Output is deterministic: attributes keep insertion order and inline
    /// style is emitted last as a `style` attribute.
    pub fn outer_html(&self, id: Id) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: Id) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: Id, out: &mut String) {
        let Some(kind) = self.kind(id) else {
            return;
        };
        match kind {
            NodeKind::Document => {
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text { text } => out.push_str(&escape_text(text)),
            NodeKind::Element {
                name,
                attributes,
                style,
            } => {
                out.push('<');
                out.push_str(name);
                for (k, v) in attributes {
                    out.push(' ');
                    out.push_str(k);
                    if let Some(v) = v {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(v));
                        out.push('"');
                    }
                }
                if !style.is_empty() {
                    let decls = style
                        .iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    out.push_str(" style=\"");
                    out.push_str(&escape_attr(&decls));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn serializes_attributes_style_and_void_elements() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        let input = doc.create_element("input");
        let text = doc.create_text("a < b");
        doc.append_child(doc.root(), p).unwrap();
        doc.set_attr(p, "title", "\"q\" & co").unwrap();
        doc.set_style(p, "width", "20px").unwrap();
        doc.set_style(p, "font-weight", "bold").unwrap();
        doc.append_child(p, text).unwrap();
        doc.append_child(p, input).unwrap();
        doc.set_attr(input, "type", "text").unwrap();

        assert_eq!(
            doc.outer_html(p),
            r#"<p title="&quot;q&quot; &amp; co" style="width: 20px; font-weight: bold">a &lt; b<input type="text"></p>"#
        );
        assert_eq!(doc.inner_html(doc.root()), doc.outer_html(p));
    }

    #[test]
    fn dead_nodes_serialize_to_nothing() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_child(doc.root(), p).unwrap();
        doc.remove(p).unwrap();
        assert_eq!(doc.outer_html(p), "");
    }
}
