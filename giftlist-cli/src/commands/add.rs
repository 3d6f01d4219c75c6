use anyhow::Result;
use dialoguer::Input;
use giftlist_core::{GiftInput, GiftList};
use owo_colors::OwoColorize;

use crate::dates::{parse_date_input, to_iso};

pub fn run(
    list: &mut GiftList,
    name: Option<String>,
    recipient: Option<String>,
    description: Option<String>,
    event_type: Option<String>,
    remind: Option<String>,
) -> Result<()> {
    let interactive = name.is_none() || recipient.is_none();

    let name = match name {
        Some(n) => n,
        None => prompt_required("  Gift")?,
    };

    let recipient = match recipient {
        Some(r) => r,
        None => prompt_required("  For whom?")?,
    };

    let remind = match remind {
        Some(r) => Some(to_iso(parse_date_input(&r)?)),
        None if interactive => prompt_reminder()?,
        None => None,
    };

    let mut input = GiftInput::new(name, recipient);
    input.description = description;
    input.event_type = event_type;
    input.reminder_date = remind;

    let gift = list.add(input)?;
    println!("  {} {}", gift.to_string().bold(), format!("#{}", gift.id).dimmed());

    Ok(())
}

fn prompt_required(prompt: &str) -> Result<String> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        if !input.trim().is_empty() {
            return Ok(input);
        }
        eprintln!("  {}", "This field is required".red());
    }
}

/// Empty input skips the reminder.
fn prompt_reminder() -> Result<Option<String>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Remind me on? (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(None);
        }
        match parse_date_input(&input) {
            Ok(date) => return Ok(Some(to_iso(date))),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
