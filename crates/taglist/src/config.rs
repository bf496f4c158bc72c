use core_types::KeyCode;
use html::{Document, Id};
use serde::{Deserialize, Deserializer};

use crate::error::TagListError;

/// Attribute a bound field may carry its options in, as a JSON object.
pub const OPTIONS_ATTRIBUTE: &str = "data-taglist";

/// Options of one tag list instance. Immutable once the widget is attached.
///
/// Deserializes from the same option object a page script would pass:
///
/// ```
/// use taglist::TagListConfig;
///
/// let config = TagListConfig::from_json(r#"{"className": "chip", "keyCodes": null}"#).unwrap();
/// assert_eq!(config.class_name, "chip");
/// assert_eq!(config.key_codes, None);
/// assert_eq!(config.delimiter.as_deref(), Some(" "));
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagListConfig {
    /// Class of every chip anchor.
    #[serde(alias = "cssClass")]
    pub class_name: String,
    /// `type` of the generated entry input.
    #[serde(alias = "inputKind")]
    pub input_type: String,
    /// Prepended to the percent-encoded tag to build each chip's `href`.
    pub prefix_url: Option<String>,
    /// Keys that commit the entry instead of typing their character.
    /// Bound-field mode only; `None` disables them.
    #[serde(alias = "commitKeyCodes", deserialize_with = "key_codes")]
    pub key_codes: Option<Vec<KeyCode>>,
    /// Splits committed text and joins the serialized field value.
    /// Bound-field mode only; `None` switches the field to JSON arrays.
    pub delimiter: Option<String>,
    /// px added to the measured entry text; must exceed one glyph.
    pub input_comfort: f32,
}

impl Default for TagListConfig {
    fn default() -> Self {
        Self {
            class_name: "tag".to_string(),
            input_type: "text".to_string(),
            prefix_url: None,
            key_codes: Some(vec![KeyCode::COMMA, KeyCode::SPACE]),
            delimiter: Some(" ".to_string()),
            input_comfort: 20.0,
        }
    }
}

fn key_codes<'de, D>(deserializer: D) -> Result<Option<Vec<KeyCode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<u32>>::deserialize(deserializer)?;
    Ok(raw.map(|codes| codes.into_iter().map(KeyCode).collect()))
}

impl TagListConfig {
    pub fn from_json(json: &str) -> Result<Self, TagListError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options stored on an element in [`OPTIONS_ATTRIBUTE`], or the defaults
    /// when the attribute is absent.
    pub fn from_element(doc: &Document, id: Id) -> Result<Self, TagListError> {
        match doc.attr(id, OPTIONS_ATTRIBUTE) {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }

    /// Delimiter in effect; an empty string counts as disabled.
    pub fn active_delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref().filter(|d| !d.is_empty())
    }

    pub fn commits_on(&self, code: KeyCode) -> bool {
        self.key_codes
            .as_deref()
            .is_some_and(|codes| codes.contains(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_takes_every_default() {
        assert_eq!(TagListConfig::from_json("{}").unwrap(), TagListConfig::default());
    }

    #[test]
    fn null_disables_key_codes_and_delimiter() {
        let config = TagListConfig::from_json(r#"{"keyCodes": null, "delimiter": null}"#).unwrap();
        assert_eq!(config.key_codes, None);
        assert_eq!(config.active_delimiter(), None);
        assert!(!config.commits_on(KeyCode::COMMA));
    }

    #[test]
    fn option_aliases_are_accepted() {
        let config = TagListConfig::from_json(
            r#"{"cssClass": "chip", "inputKind": "search", "commitKeyCodes": [59],
                "prefixUrl": "/tags/", "inputComfort": 24}"#,
        )
        .unwrap();
        assert_eq!(config.class_name, "chip");
        assert_eq!(config.input_type, "search");
        assert_eq!(config.key_codes, Some(vec![KeyCode(59)]));
        assert_eq!(config.prefix_url.as_deref(), Some("/tags/"));
        assert_eq!(config.input_comfort, 24.0);
    }

    #[test]
    fn empty_delimiter_is_inactive() {
        let config = TagListConfig {
            delimiter: Some(String::new()),
            ..TagListConfig::default()
        };
        assert_eq!(config.active_delimiter(), None);
    }

    #[test]
    fn malformed_options_are_reported() {
        let err = TagListConfig::from_json(r#"{"keyCodes": "comma"}"#).unwrap_err();
        assert!(matches!(err, TagListError::InvalidOptions(_)));
    }

    #[test]
    fn options_are_read_from_the_data_attribute() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        assert_eq!(
            TagListConfig::from_element(&doc, input).unwrap(),
            TagListConfig::default()
        );
        doc.set_attr(input, OPTIONS_ATTRIBUTE, r#"{"delimiter": ","}"#)
            .unwrap();
        let config = TagListConfig::from_element(&doc, input).unwrap();
        assert_eq!(config.active_delimiter(), Some(","));
    }
}
