use html::{DomError, Id};

#[derive(Debug)]
pub enum TagListError {
    /// The target id does not name a live element.
    MissingTarget(Id),
    Dom(DomError),
    InvalidOptions(serde_json::Error),
}

impl std::fmt::Display for TagListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagListError::MissingTarget(id) => {
                write!(f, "node {} is not a live element", id.0)
            }
            TagListError::Dom(err) => write!(f, "dom error: {err}"),
            TagListError::InvalidOptions(err) => write!(f, "invalid tag list options: {err}"),
        }
    }
}

impl std::error::Error for TagListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TagListError::MissingTarget(_) => None,
            TagListError::Dom(err) => Some(err),
            TagListError::InvalidOptions(err) => Some(err),
        }
    }
}

impl From<DomError> for TagListError {
    fn from(err: DomError) -> Self {
        TagListError::Dom(err)
    }
}

impl From<serde_json::Error> for TagListError {
    fn from(err: serde_json::Error) -> Self {
        TagListError::InvalidOptions(err)
    }
}
