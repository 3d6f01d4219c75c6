use anyhow::{Result, bail};
use giftlist_core::{GiftId, GiftInput, GiftList};
use owo_colors::OwoColorize;

use crate::dates::{parse_date_input, to_iso};

/// Fields to change. `None` keeps the current value; an empty string
/// clears an optional field.
#[derive(Debug, Default)]
pub struct Changes {
    pub name: Option<String>,
    pub recipient: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub remind: Option<String>,
}

impl Changes {
    fn apply(self, mut input: GiftInput) -> Result<GiftInput> {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(recipient) = self.recipient {
            input.recipient = recipient;
        }
        if let Some(description) = self.description {
            input.description = Some(description);
        }
        if let Some(event_type) = self.event_type {
            input.event_type = Some(event_type);
        }
        if let Some(remind) = self.remind {
            input.reminder_date = if remind.trim().is_empty() {
                None
            } else {
                Some(to_iso(parse_date_input(&remind)?))
            };
        }
        Ok(input)
    }
}

pub fn run(list: &mut GiftList, id: GiftId, changes: Changes) -> Result<()> {
    let Some(current) = list.get(id) else {
        bail!("No gift with id {}", id);
    };

    let input = changes.apply(GiftInput::from(current))?;
    let gift = list.edit(id, input)?;
    println!("  {} {}", gift.to_string().bold(), format!("#{}", gift.id).dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> GiftInput {
        GiftInput::new("Scarf", "Ann")
            .description("Wool")
            .event_type("holiday")
            .reminder_date("2024-12-20")
    }

    #[test]
    fn untouched_fields_keep_their_values() {
        let changes = Changes {
            name: Some("Gloves".into()),
            ..Default::default()
        };
        let input = changes.apply(current()).unwrap();
        assert_eq!(input.name, "Gloves");
        assert_eq!(input.recipient, "Ann");
        assert_eq!(input.description.as_deref(), Some("Wool"));
        assert_eq!(input.reminder_date.as_deref(), Some("2024-12-20"));
    }

    #[test]
    fn empty_strings_clear_optional_fields() {
        let changes = Changes {
            description: Some(String::new()),
            remind: Some(String::new()),
            ..Default::default()
        };
        let draft = changes.apply(current()).unwrap().validate().unwrap();
        assert_eq!(draft.description, None);
        assert_eq!(draft.reminder_date, None);
        assert_eq!(draft.event_type.as_deref(), Some("holiday"));
    }

    #[test]
    fn new_reminder_is_normalized() {
        let changes = Changes {
            remind: Some("2025-01-05".into()),
            ..Default::default()
        };
        let input = changes.apply(current()).unwrap();
        assert_eq!(input.reminder_date.as_deref(), Some("2025-01-05"));
    }
}
