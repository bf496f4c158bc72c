pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    /// The document node of every [`Document`](crate::Document).
    pub const ROOT: Id = Id(0);
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        style: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
}

impl NodeKind {
    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(Id),
    WrongNodeKind(Id),
    InvalidParent(Id),
    InvalidSibling { parent: Id, reference: Id },
    CycleDetected { parent: Id, child: Id },
    RootRemoval,
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "node {} is not live", id.0),
            DomError::WrongNodeKind(id) => write!(f, "node {} has the wrong kind", id.0),
            DomError::InvalidParent(id) => write!(f, "node {} cannot be used as a parent", id.0),
            DomError::InvalidSibling { parent, reference } => write!(
                f,
                "node {} is not a child of node {}",
                reference.0, parent.0
            ),
            DomError::CycleDetected { parent, child } => write!(
                f,
                "inserting node {} under node {} would create a cycle",
                child.0, parent.0
            ),
            DomError::RootRemoval => f.write_str("the document node cannot be removed"),
        }
    }
}

impl std::error::Error for DomError {}
