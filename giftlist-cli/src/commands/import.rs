use std::path::Path;

use anyhow::{Context, Result};
use giftlist_core::GiftList;
use owo_colors::OwoColorize;

pub fn run(list: &mut GiftList, file: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let count = list.import(payload)?;
    println!(
        "  {}",
        format!("{} {}", count, if count == 1 { "gift" } else { "gifts" }).dimmed()
    );

    Ok(())
}
