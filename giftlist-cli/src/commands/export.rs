use std::path::Path;

use anyhow::{Context, Result};
use giftlist_core::GiftList;
use giftlist_core::transfer::export_json;

/// Without a file the JSON goes to stdout untouched, so it can be piped.
pub fn run(list: &GiftList, file: Option<&Path>) -> Result<()> {
    match file {
        Some(path) => {
            let json = list.export()?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{}", export_json(list.gifts())?),
    }
    Ok(())
}
