//! TUI rendering for gifts.
//!
//! Adds colored terminal rendering to giftlist-core types using owo_colors.

use chrono::NaiveDate;
use giftlist_core::Gift;
use giftlist_core::reminder::{icon, reminder_label, reminder_state};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

/// A gift as shown in listings, relative to `today`.
pub struct GiftCard<'a> {
    pub gift: &'a Gift,
    pub today: NaiveDate,
}

impl Render for GiftCard<'_> {
    fn render(&self) -> String {
        let gift = self.gift;
        let mut header = format!("{} {}", gift.name.bold(), format!("#{}", gift.id).dimmed());
        if let Some(badge) = reminder_badge(gift, self.today) {
            header = format!("{}  {}", header, badge);
        }

        [
            header,
            format!("   {}", description_text(gift)),
            format!("   {} {}", "For:".dimmed(), gift.recipient),
            format!("   {} {}", "Event:".dimmed(), event_text(gift)),
        ]
        .join("\n")
    }
}

/// Glyph and countdown for gifts whose reminder is coming up.
fn reminder_badge(gift: &Gift, today: NaiveDate) -> Option<String> {
    let label = reminder_label(gift, today)?;
    let badge = format!("{} {}", icon(gift), label);
    if reminder_state(gift, today).is_urgent() {
        Some(badge.red().bold().to_string())
    } else {
        Some(badge.yellow().to_string())
    }
}

fn description_text(gift: &Gift) -> &str {
    gift.description.as_deref().unwrap_or("No description")
}

/// e.g. "Birthday - Jun 1, 2024", "Birthday", or "No event set".
pub fn event_text(gift: &Gift) -> String {
    let date = gift.reminder_date.as_deref().map(|raw| match gift.reminder_on() {
        Some(d) => format_date(d),
        None => raw.to_string(),
    });

    match (&gift.event_type, date) {
        (Some(event), Some(date)) => format!("{} - {}", capitalize_first(event), date),
        (Some(event), None) => capitalize_first(event),
        (None, Some(date)) => format!("Reminder - {}", date),
        (None, None) => "No event set".to_string(),
    }
}

/// Case-insensitive match against everything a card shows.
pub fn matches_query(gift: &Gift, query: &str) -> bool {
    let query = query.to_lowercase();
    [
        gift.name.as_str(),
        description_text(gift),
        gift.recipient.as_str(),
        event_text(gift).as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use giftlist_core::GiftId;

    fn make_test_gift() -> Gift {
        Gift {
            id: GiftId(1717243200000),
            name: "Tea set".to_string(),
            description: Some("Green, from the market".to_string()),
            recipient: "Mum".to_string(),
            reminder_date: Some("2024-06-01".to_string()),
            event_type: Some("birthday".to_string()),
            date_added: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn event_text_variants() {
        let mut gift = make_test_gift();
        assert_eq!(event_text(&gift), "Birthday - Jun 1, 2024");

        gift.reminder_date = None;
        assert_eq!(event_text(&gift), "Birthday");

        gift.event_type = None;
        assert_eq!(event_text(&gift), "No event set");

        gift.reminder_date = Some("someday".to_string());
        assert_eq!(event_text(&gift), "Reminder - someday");
    }

    #[test]
    fn query_matches_any_shown_field() {
        let gift = make_test_gift();
        assert!(matches_query(&gift, "TEA"));
        assert!(matches_query(&gift, "market"));
        assert!(matches_query(&gift, "mum"));
        assert!(matches_query(&gift, "jun 1"));
        assert!(!matches_query(&gift, "scarf"));
    }

    #[test]
    fn missing_description_is_searchable_placeholder() {
        let mut gift = make_test_gift();
        gift.description = None;
        assert!(matches_query(&gift, "no description"));
    }

    #[test]
    fn card_shows_badge_only_when_upcoming() {
        let gift = make_test_gift();
        let soon = GiftCard {
            gift: &gift,
            today: NaiveDate::from_ymd_opt(2024, 5, 29).unwrap(),
        }
        .render();
        assert!(soon.contains("Birthday reminder - 3 days left"));

        let later = GiftCard {
            gift: &gift,
            today: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        }
        .render();
        assert!(!later.contains("reminder"));
        assert!(later.contains("Mum"));
    }
}
