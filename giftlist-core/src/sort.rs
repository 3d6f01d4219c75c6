//! Display orderings for gifts.
//!
//! Sorting produces a view; the collection itself stays in insertion order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::gift::Gift;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Recipient,
    /// Newest first.
    DateAdded,
    /// Soonest first; gifts without a reminder date last.
    Reminder,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "recipient" => Ok(SortKey::Recipient),
            "date" | "date-added" | "added" => Ok(SortKey::DateAdded),
            "reminder" | "reminder-date" => Ok(SortKey::Reminder),
            other => Err(format!(
                "Unknown sort key '{}'. Expected one of: name, recipient, date, reminder",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SortKey::Name => "name",
            SortKey::Recipient => "recipient",
            SortKey::DateAdded => "date",
            SortKey::Reminder => "reminder",
        };
        write!(f, "{}", name)
    }
}

/// Stable sort of `gifts` by `key`.
pub fn sort_gifts(gifts: &mut [Gift], key: SortKey) {
    gifts.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Gift, b: &Gift, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Recipient => a.recipient.to_lowercase().cmp(&b.recipient.to_lowercase()),
        SortKey::DateAdded => b.date_added.cmp(&a.date_added),
        SortKey::Reminder => match (a.reminder_on(), b.reminder_on()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gift::GiftId;
    use chrono::{TimeZone, Utc};

    fn gift(id: i64, name: &str, recipient: &str, added_day: u32, reminder: Option<&str>) -> Gift {
        Gift {
            id: GiftId(id),
            name: name.to_string(),
            description: None,
            recipient: recipient.to_string(),
            reminder_date: reminder.map(String::from),
            event_type: None,
            date_added: Utc.with_ymd_and_hms(2024, 1, added_day, 0, 0, 0).unwrap(),
        }
    }

    fn ids(gifts: &[Gift]) -> Vec<i64> {
        gifts.iter().map(|g| g.id.0).collect()
    }

    fn sample() -> Vec<Gift> {
        vec![
            gift(1, "scarf", "Zoe", 3, Some("2024-12-25")),
            gift(2, "Book", "alice", 1, None),
            gift(3, "candle", "Mark", 2, Some("2024-06-01")),
            gift(4, "Atlas", "bob", 4, Some("not a date")),
        ]
    }

    #[test]
    fn sorts_by_name_ignoring_case() {
        let mut gifts = sample();
        sort_gifts(&mut gifts, SortKey::Name);
        assert_eq!(ids(&gifts), vec![4, 2, 3, 1]);
    }

    #[test]
    fn sorts_by_recipient_ignoring_case() {
        let mut gifts = sample();
        sort_gifts(&mut gifts, SortKey::Recipient);
        assert_eq!(ids(&gifts), vec![2, 4, 3, 1]);
    }

    #[test]
    fn sorts_newest_first() {
        let mut gifts = sample();
        sort_gifts(&mut gifts, SortKey::DateAdded);
        assert_eq!(ids(&gifts), vec![4, 1, 3, 2]);
    }

    #[test]
    fn sorts_by_reminder_with_missing_last() {
        let mut gifts = sample();
        sort_gifts(&mut gifts, SortKey::Reminder);
        // Unparsable dates count as missing; ties keep their order.
        assert_eq!(ids(&gifts), vec![3, 1, 2, 4]);
    }

    #[test]
    fn parses_keys() {
        assert_eq!("date".parse::<SortKey>(), Ok(SortKey::DateAdded));
        assert_eq!("Reminder".parse::<SortKey>(), Ok(SortKey::Reminder));
        assert!("price".parse::<SortKey>().is_err());
    }
}
