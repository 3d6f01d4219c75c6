//! Reminder urgency for gifts.
//!
//! Everything here is a pure function of a gift and the current local date.
//! Nothing remembers which reminders were already shown, so the same gift is
//! reported on every evaluation while it stays inside the window.

use chrono::{DateTime, NaiveDate};

use crate::gift::Gift;

/// Gifts at most this many days away show a reminder.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Upcoming reminders at most this many days away are urgent.
pub const URGENT_WINDOW_DAYS: i64 = 7;

/// Gifts at most this many days away fire a notification.
pub const NOTIFY_WINDOW_DAYS: i64 = 7;

/// Parse a stored reminder date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub fn parse_reminder_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Whole calendar days from `today` until the gift's reminder date.
///
/// `None` when the gift has no reminder date or it cannot be parsed.
/// Negative for dates in the past, 0 on the day itself.
pub fn days_until(gift: &Gift, today: NaiveDate) -> Option<i64> {
    gift.reminder_on().map(|date| (date - today).num_days())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// No reminder: absent, unparsable, past, or too far out.
    Inactive,
    Upcoming,
    /// Upcoming and within the urgent window.
    Urgent,
}

impl ReminderState {
    pub fn for_days(days: Option<i64>) -> Self {
        match days {
            Some(d) if (0..=URGENT_WINDOW_DAYS).contains(&d) => ReminderState::Urgent,
            Some(d) if (0..=UPCOMING_WINDOW_DAYS).contains(&d) => ReminderState::Upcoming,
            _ => ReminderState::Inactive,
        }
    }

    /// True for both `Upcoming` and `Urgent`.
    pub fn is_upcoming(self) -> bool {
        !matches!(self, ReminderState::Inactive)
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, ReminderState::Urgent)
    }
}

pub fn reminder_state(gift: &Gift, today: NaiveDate) -> ReminderState {
    ReminderState::for_days(days_until(gift, today))
}

/// Glyph for the gift's event type.
pub fn icon(gift: &Gift) -> &'static str {
    gift.event_kind().glyph()
}

/// Gifts whose reminder falls within the notification window, in input order.
pub fn due_for_notification(gifts: &[Gift], today: NaiveDate) -> Vec<&Gift> {
    gifts
        .iter()
        .filter(|gift| {
            days_until(gift, today).is_some_and(|d| (0..=NOTIFY_WINDOW_DAYS).contains(&d))
        })
        .collect()
}

/// Which notification wording applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    Today,
    Tomorrow,
    InDays(i64),
}

impl MessageTemplate {
    /// `None` for past dates.
    pub fn for_days(days: i64) -> Option<Self> {
        match days {
            0 => Some(MessageTemplate::Today),
            1 => Some(MessageTemplate::Tomorrow),
            d if d > 1 => Some(MessageTemplate::InDays(d)),
            _ => None,
        }
    }

    pub fn render(self, gift: &Gift) -> String {
        let event = gift.event_label();
        match self {
            MessageTemplate::Today => format!(
                "Today is {}'s {}! Don't forget: {}",
                gift.recipient, event, gift.name
            ),
            MessageTemplate::Tomorrow => format!(
                "Tomorrow is {}'s {}! Remember: {}",
                gift.recipient, event, gift.name
            ),
            MessageTemplate::InDays(days) => format!(
                "{} days until {}'s {}! Gift idea: {}",
                days, gift.recipient, event, gift.name
            ),
        }
    }
}

/// Notification text for a gift, or `None` if it has no current or future reminder.
pub fn notification_message(gift: &Gift, today: NaiveDate) -> Option<String> {
    let days = days_until(gift, today)?;
    MessageTemplate::for_days(days).map(|template| template.render(gift))
}

/// Short label for an upcoming reminder, e.g. "Birthday reminder - 3 days left".
pub fn reminder_label(gift: &Gift, today: NaiveDate) -> Option<String> {
    let days = days_until(gift, today)?;
    if !ReminderState::for_days(Some(days)).is_upcoming() {
        return None;
    }
    let unit = if days == 1 { "day" } else { "days" };
    Some(format!(
        "{} reminder - {} {} left",
        capitalize(gift.event_label()),
        days,
        unit
    ))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gift::GiftId;
    use chrono::{Duration, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gift(id: i64, reminder_date: Option<&str>) -> Gift {
        Gift {
            id: GiftId(id),
            name: "Scarf".to_string(),
            description: None,
            recipient: "Alice".to_string(),
            reminder_date: reminder_date.map(String::from),
            event_type: Some("birthday".to_string()),
            date_added: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn scenario_around_june_first() {
        let today = date(2024, 6, 1);

        let same_day = gift(1, Some("2024-06-01"));
        assert_eq!(days_until(&same_day, today), Some(0));
        assert_eq!(reminder_state(&same_day, today), ReminderState::Urgent);
        assert_eq!(
            notification_message(&same_day, today).unwrap(),
            "Today is Alice's birthday! Don't forget: Scarf"
        );

        let week_out = gift(2, Some("2024-06-08"));
        assert_eq!(days_until(&week_out, today), Some(7));
        assert_eq!(reminder_state(&week_out, today), ReminderState::Urgent);

        let eight_days = gift(3, Some("2024-06-09"));
        assert_eq!(days_until(&eight_days, today), Some(8));
        assert_eq!(reminder_state(&eight_days, today), ReminderState::Upcoming);

        let past = gift(4, Some("2024-05-30"));
        assert_eq!(days_until(&past, today), Some(-2));
        assert_eq!(reminder_state(&past, today), ReminderState::Inactive);

        let gifts = vec![same_day, week_out, eight_days, past];
        let due: Vec<GiftId> = due_for_notification(&gifts, today)
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(due, vec![GiftId(1), GiftId(2)]);
    }

    #[test]
    fn days_until_decreases_by_one_per_day() {
        let g = gift(1, Some("2024-12-25"));
        let start = date(2024, 11, 1);

        let mut previous = days_until(&g, start).unwrap();
        for offset in 1..=60 {
            let current = days_until(&g, start + Duration::days(offset)).unwrap();
            assert_eq!(current, previous - 1);
            previous = current;
        }
        assert_eq!(days_until(&g, date(2024, 12, 25)), Some(0));
    }

    #[test]
    fn missing_or_unparsable_dates_are_inactive() {
        let today = date(2024, 6, 1);
        for g in [gift(1, None), gift(2, Some("next tuesday")), gift(3, Some("2024-13-01"))] {
            assert_eq!(days_until(&g, today), None);
            assert_eq!(reminder_state(&g, today), ReminderState::Inactive);
            assert_eq!(notification_message(&g, today), None);
        }
        assert!(due_for_notification(&[gift(2, Some("garbage"))], today).is_empty());
    }

    #[test]
    fn rfc3339_dates_use_their_date_part() {
        let g = gift(1, Some("2024-06-03T00:00:00.000Z"));
        assert_eq!(days_until(&g, date(2024, 6, 1)), Some(2));
    }

    #[test]
    fn state_boundaries() {
        assert_eq!(ReminderState::for_days(None), ReminderState::Inactive);
        assert_eq!(ReminderState::for_days(Some(-1)), ReminderState::Inactive);
        assert_eq!(ReminderState::for_days(Some(0)), ReminderState::Urgent);
        assert_eq!(ReminderState::for_days(Some(7)), ReminderState::Urgent);
        assert_eq!(ReminderState::for_days(Some(8)), ReminderState::Upcoming);
        assert_eq!(ReminderState::for_days(Some(30)), ReminderState::Upcoming);
        assert_eq!(ReminderState::for_days(Some(31)), ReminderState::Inactive);
    }

    #[test]
    fn urgent_implies_upcoming() {
        for days in -5..=40 {
            let state = ReminderState::for_days(Some(days));
            if state.is_urgent() {
                assert!(state.is_upcoming());
            }
        }
    }

    #[test]
    fn message_templates() {
        let today = date(2024, 6, 1);
        let mut g = gift(1, Some("2024-06-02"));
        assert_eq!(
            notification_message(&g, today).unwrap(),
            "Tomorrow is Alice's birthday! Remember: Scarf"
        );

        g.reminder_date = Some("2024-06-05".into());
        g.event_type = None;
        assert_eq!(
            notification_message(&g, today).unwrap(),
            "4 days until Alice's event! Gift idea: Scarf"
        );

        assert_eq!(MessageTemplate::for_days(-1), None);
        assert_eq!(MessageTemplate::for_days(12), Some(MessageTemplate::InDays(12)));
    }

    #[test]
    fn icons_follow_event_type() {
        let mut g = gift(1, None);
        assert_eq!(icon(&g), "🎂");
        g.event_type = Some("anniversary".into());
        assert_eq!(icon(&g), "💕");
        g.event_type = Some("holiday".into());
        assert_eq!(icon(&g), "🎄");
        g.event_type = Some("retirement".into());
        assert_eq!(icon(&g), "⏰");
        g.event_type = None;
        assert_eq!(icon(&g), "⏰");
    }

    #[test]
    fn label_only_for_upcoming() {
        let today = date(2024, 6, 1);
        assert_eq!(
            reminder_label(&gift(1, Some("2024-06-04")), today).unwrap(),
            "Birthday reminder - 3 days left"
        );
        assert_eq!(
            reminder_label(&gift(1, Some("2024-06-02")), today).unwrap(),
            "Birthday reminder - 1 day left"
        );
        assert_eq!(reminder_label(&gift(1, Some("2024-08-01")), today), None);
    }
}
