use anyhow::Result;
use giftlist_core::GiftList;
use giftlist_core::clock::{Clock, FixedClock, SystemClock};
use giftlist_core::reminder::{UPCOMING_WINDOW_DAYS, reminder_state};
use giftlist_core::scheduler::check_reminders;
use owo_colors::OwoColorize;

use crate::dates::parse_date_input;
use crate::terminal::TerminalSink;

pub fn run(list: &GiftList, on: Option<&str>) -> Result<()> {
    let today = clock_for(on)?.today();

    let fired = check_reminders(list.gifts(), today, &TerminalSink::new());
    if fired == 0 {
        println!("{}", "No reminders due".dimmed());
    }

    let upcoming = list
        .gifts()
        .iter()
        .filter(|g| reminder_state(g, today).is_upcoming())
        .count();
    if upcoming > fired {
        println!(
            "{}",
            format!(
                "{} {} coming up in the next {} days (see `giftlist list --sort reminder`)",
                upcoming,
                if upcoming == 1 { "reminder" } else { "reminders" },
                UPCOMING_WINDOW_DAYS
            )
            .dimmed()
        );
    }

    Ok(())
}

/// `--on` pins the clock to that date; otherwise it is the wall clock.
fn clock_for(on: Option<&str>) -> Result<Box<dyn Clock>> {
    Ok(match on {
        Some(input) => Box::new(FixedClock::on(parse_date_input(input)?)),
        None => Box::new(SystemClock),
    })
}
