//! Tag list serialization into a bound form field.

use crate::config::TagListConfig;
use crate::model::normalize_tag;

/// How tags are stored in the `value` of a bound field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldFormat {
    /// Tags joined by the delimiter, e.g. `red green`.
    Delimited(String),
    /// A JSON array of strings, e.g. `["red","green"]`.
    Json,
}

impl FieldFormat {
    pub fn for_config(config: &TagListConfig) -> Self {
        match config.active_delimiter() {
            Some(delimiter) => FieldFormat::Delimited(delimiter.to_string()),
            None => FieldFormat::Json,
        }
    }

    pub fn encode(&self, tags: &[String]) -> String {
        match self {
            FieldFormat::Delimited(delimiter) => tags.join(delimiter),
            // A slice of strings always serializes.
            FieldFormat::Json => serde_json::to_string(tags).unwrap_or_default(),
        }
    }

    /// Seed tags from a field value, in order. Blank entries are dropped;
    /// duplicates are left for `add_tag` to ignore.
    pub fn decode(&self, value: &str) -> Vec<String> {
        match self {
            FieldFormat::Delimited(delimiter) => value
                .split(delimiter.as_str())
                .filter_map(normalize_tag)
                .map(str::to_string)
                .collect(),
            FieldFormat::Json => {
                if value.trim().is_empty() {
                    return Vec::new();
                }
                match serde_json::from_str::<Vec<String>>(value) {
                    Ok(tags) => tags
                        .iter()
                        .filter_map(|t| normalize_tag(t))
                        .map(str::to_string)
                        .collect(),
                    Err(err) => {
                        log::warn!(
                            target: "taglist.model",
                            "field value is not a JSON array of strings ({err}); seeding it as one tag"
                        );
                        normalize_tag(value).map(str::to_string).into_iter().collect()
                    }
                }
            }
        }
    }
}
