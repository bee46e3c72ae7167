//! Typed wire model for the Notion API.
//!
//! Property values are a closed set of tagged variants rather than loose JSON
//! maps: writes can only construct the shapes the gateway supports, and reads
//! of anything else degrade to `Unsupported` instead of failing, since the
//! backing databases are user-editable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Properties keyed by their Notion property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

// ###################################
// ->   STRUCTS
// ###################################

/// Identifier of one Notion database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub struct DatabaseId(String);

/// One Notion record: its id plus the typed property map.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichTextFragment> },
    RichText { rich_text: Vec<RichTextFragment> },
    Number { number: Option<f64> },
    Date { date: Option<DateValue> },
    /// Catch-all for property types this gateway never writes. Only ever
    /// produced by deserialization.
    #[serde(other)]
    Unsupported,
}

/// A single rich-text fragment. Reads carry `plain_text`; writes only need
/// `text.content`. Fragments of other kinds (mentions, equations) come back
/// with neither and are skipped by `as_str`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBody {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Body of a `query_database` call. The default value serializes to `{}`,
/// which Notion treats as an unfiltered query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<Sort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

// ###################################
// ->   IMPLs
// ###################################

impl DatabaseId {
    pub fn new(id: impl Into<String>) -> Self {
        DatabaseId(id.into())
    }
}

impl PropertyValue {
    pub fn title(text: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichTextFragment::text(text)],
        }
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        PropertyValue::RichText {
            rich_text: vec![RichTextFragment::text(text)],
        }
    }

    pub fn date(start: impl Into<String>) -> Self {
        PropertyValue::Date {
            date: Some(DateValue {
                start: start.into(),
                end: None,
            }),
        }
    }
}

impl RichTextFragment {
    pub fn text(content: impl Into<String>) -> Self {
        RichTextFragment {
            text: Some(TextBody {
                content: content.into(),
            }),
            plain_text: None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
    }
}

impl Page {
    /// Text of the first fragment of a title-typed property, if any.
    pub fn title_text(&self, property: &str) -> Option<&str> {
        match self.properties.get(property)? {
            PropertyValue::Title { title } => title.first()?.as_str(),
            _ => None,
        }
    }

    /// Text of the first fragment of a rich-text-typed property, if any.
    pub fn rich_text(&self, property: &str) -> Option<&str> {
        match self.properties.get(property)? {
            PropertyValue::RichText { rich_text } => rich_text.first()?.as_str(),
            _ => None,
        }
    }

    pub fn number(&self, property: &str) -> Option<f64> {
        match self.properties.get(property)? {
            PropertyValue::Number { number } => *number,
            _ => None,
        }
    }

    pub fn date_start(&self, property: &str) -> Option<&str> {
        match self.properties.get(property)? {
            PropertyValue::Date { date } => date.as_ref().map(|d| d.start.as_str()),
            _ => None,
        }
    }
}

impl QueryRequest {
    /// Query for the single most recent record by the given date property.
    pub fn most_recent(date_property: impl Into<String>) -> Self {
        QueryRequest {
            sorts: Some(vec![Sort {
                property: date_property.into(),
                direction: SortDirection::Descending,
            }]),
            page_size: Some(1),
        }
    }
}
