//! Caller-facing record shapes and their mapping onto the Notion property schema.
//!
//! Outbound: a flat update description becomes a typed property map, unknown
//! keys are dropped, and an update that maps to nothing is rejected before any
//! remote call. Inbound: Notion pages become flat records, with every missing
//! or differently shaped property degrading to a sentinel value instead of an
//! error. The backing databases are user-editable, so read paths never fail on
//! schema drift.

use serde::{Deserialize, Serialize};

use crate::notion::types::{Page, PropertyMap, PropertyValue};

/// Property names this gateway expects on the remote databases.
pub const PROP_NAME: &str = "Name";
pub const PROP_AMOUNT: &str = "Amount";
pub const PROP_WHATSAPP: &str = "WhatsApp";
pub const PROP_RENEWAL_DATE: &str = "Renewal Date";
pub const PROP_BIGGEST_WIN: &str = "Biggest Win";
pub const PROP_REFLECTION: &str = "Reflection";
pub const PROP_DATE: &str = "Date";

const DEFAULT_SUBSCRIPTION_NAME: &str = "Unnamed";
const DEFAULT_RESET_TITLE: &str = "Untitled Reset";
const DEFAULT_BIGGEST_WIN: &str = "Not specified.";
const DEFAULT_REFLECTION: &str = "No reflection recorded.";

// ###################################
// ->   STRUCTS
// ###################################
/// One subscription, flattened out of a Notion page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<String>,
}

/// The single most recent "daily reset" journal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResetRecord {
    pub id: String,
    pub title: String,
    pub biggest_win: String,
    pub reflection: String,
}

/// The recognized subset of a subscription update. Anything else in the
/// incoming JSON is dropped on deserialization, and `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<String>,
}

/// Validated task title.
#[derive(Debug, Clone)]
pub struct TaskTitle(String);

#[derive(Deserialize, Debug)]
pub struct CreateTaskBody {
    pub title: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateSubscriptionBody {
    pub updates: Option<PropertyUpdate>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ArchiveSubscriptionBody {
    pub reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChatBody {
    pub message: Option<String>,
}

// ###################################
// ->   IMPLS
// ###################################
impl SubscriptionRecord {
    pub fn from_page(page: &Page) -> Self {
        SubscriptionRecord {
            id: page.id.clone(),
            name: page
                .title_text(PROP_NAME)
                .unwrap_or(DEFAULT_SUBSCRIPTION_NAME)
                .to_owned(),
            amount: page.number(PROP_AMOUNT).unwrap_or(0.0),
            whatsapp: page.rich_text(PROP_WHATSAPP).map(str::to_owned),
            renewal_date: page.date_start(PROP_RENEWAL_DATE).map(str::to_owned),
        }
    }
}

impl DailyResetRecord {
    pub fn from_page(page: &Page) -> Self {
        DailyResetRecord {
            id: page.id.clone(),
            title: page
                .title_text(PROP_NAME)
                .unwrap_or(DEFAULT_RESET_TITLE)
                .to_owned(),
            biggest_win: page
                .rich_text(PROP_BIGGEST_WIN)
                .unwrap_or(DEFAULT_BIGGEST_WIN)
                .to_owned(),
            reflection: page
                .rich_text(PROP_REFLECTION)
                .unwrap_or(DEFAULT_REFLECTION)
                .to_owned(),
        }
    }
}

impl PropertyUpdate {
    /// Maps the recognized keys onto their remote properties. Each rule is
    /// independent and additive; an empty name is still a valid title write,
    /// and the renewal date is passed through verbatim.
    pub fn to_properties(&self) -> Result<PropertyMap, DataParsingError> {
        let mut properties = PropertyMap::new();

        if let Some(name) = &self.name {
            properties.insert(PROP_NAME.to_owned(), PropertyValue::title(name.as_str()));
        }
        if let Some(whatsapp) = &self.whatsapp {
            properties.insert(
                PROP_WHATSAPP.to_owned(),
                PropertyValue::rich_text(whatsapp.as_str()),
            );
        }
        if let Some(renewal_date) = &self.renewal_date {
            properties.insert(
                PROP_RENEWAL_DATE.to_owned(),
                PropertyValue::date(renewal_date.as_str()),
            );
        }

        if properties.is_empty() {
            return Err(DataParsingError::NoValidProperties);
        }

        Ok(properties)
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TaskTitle {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.trim().is_empty() {
            return Err(DataParsingError::TaskTitleMissing);
        }

        Ok(TaskTitle(value.to_owned()))
    }

    pub fn to_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert(PROP_NAME.to_owned(), PropertyValue::title(self.0.as_str()));
        properties
    }
}

// ###################################
// ->   ERROR
// ###################################
/// The fixed 400 messages. `Display` output goes to the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("Task title is required.")]
    TaskTitleMissing,
    #[error("Missing subscription id or updates.")]
    UpdatesMissing,
    #[error("No valid properties to update.")]
    NoValidProperties,
}
