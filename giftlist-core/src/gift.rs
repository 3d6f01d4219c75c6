//! The gift record and its validation rules.
//!
//! A `Gift` is never edited in place: the collection replaces it with a new
//! record (new id, new `date_added`) whenever its fields change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::reminder::parse_reminder_date;

/// Identifier of a gift, unique within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftId(pub i64);

impl fmt::Display for GiftId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GiftId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(GiftId)
            .map_err(|_| format!("Invalid gift id '{}'", s))
    }
}

/// A gift as stored in the collection and serialized to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: GiftId,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    pub recipient: String,
    /// Kept verbatim; may be unparsable in imported data.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reminder_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_type: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl Gift {
    /// The reminder date, if present and parsable.
    pub fn reminder_on(&self) -> Option<NaiveDate> {
        self.reminder_date.as_deref().and_then(parse_reminder_date)
    }

    pub fn event_kind(&self) -> EventKind {
        EventKind::from_tag(self.event_type.as_deref())
    }

    /// Event type as shown in messages, "event" when unset.
    pub fn event_label(&self) -> &str {
        self.event_type.as_deref().unwrap_or("event")
    }

    /// Check the required fields of an already-built gift (e.g. from an import).
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.recipient.trim().is_empty() {
            return Err(ValidationError::MissingRecipient);
        }
        Ok(())
    }
}

impl fmt::Display for Gift {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} for {}", self.name, self.recipient)
    }
}

/// Event categories with their own iconography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Birthday,
    Anniversary,
    Holiday,
    Other,
}

impl EventKind {
    /// Map a stored tag to a kind. Unknown or absent tags are `Other`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("birthday") => EventKind::Birthday,
            Some("anniversary") => EventKind::Anniversary,
            Some("holiday") => EventKind::Holiday,
            _ => EventKind::Other,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            EventKind::Birthday => "🎂",
            EventKind::Anniversary => "💕",
            EventKind::Holiday => "🎄",
            EventKind::Other => "⏰",
        }
    }
}

/// User-supplied gift fields, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub recipient: String,
    #[serde(default)]
    pub reminder_date: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

impl GiftInput {
    pub fn new(name: impl Into<String>, recipient: impl Into<String>) -> Self {
        GiftInput {
            name: name.into(),
            recipient: recipient.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn reminder_date(mut self, date: impl Into<String>) -> Self {
        self.reminder_date = Some(date.into());
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Normalize and check the payload.
    ///
    /// Name and recipient are required. Empty optional fields become absent.
    /// A reminder date must be a valid calendar date; the event type is kept
    /// as given even when it is not one of the known kinds.
    pub fn validate(self) -> Result<GiftDraft, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let recipient = self.recipient.trim().to_string();
        if recipient.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }

        let reminder_date = match non_empty(self.reminder_date) {
            Some(raw) => {
                let date = parse_reminder_date(&raw)
                    .ok_or(ValidationError::InvalidReminderDate(raw))?;
                Some(date.format("%Y-%m-%d").to_string())
            }
            None => None,
        };

        Ok(GiftDraft {
            name,
            description: non_empty(self.description),
            recipient,
            reminder_date,
            event_type: non_empty(self.event_type),
        })
    }
}

impl From<&Gift> for GiftInput {
    fn from(gift: &Gift) -> Self {
        GiftInput {
            name: gift.name.clone(),
            description: gift.description.clone(),
            recipient: gift.recipient.clone(),
            reminder_date: gift.reminder_date.clone(),
            event_type: gift.event_type.clone(),
        }
    }
}

/// Validated gift fields, waiting for an id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftDraft {
    pub name: String,
    pub description: Option<String>,
    pub recipient: String,
    pub reminder_date: Option<String>,
    pub event_type: Option<String>,
}

impl GiftDraft {
    pub fn into_gift(self, id: GiftId, date_added: DateTime<Utc>) -> Gift {
        Gift {
            id,
            name: self.name,
            description: self.description,
            recipient: self.recipient,
            reminder_date: self.reminder_date,
            event_type: self.event_type,
            date_added,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Browser-era documents store unset form fields as "".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
