use anyhow::Result;
use giftlist_core::GiftList;
use giftlist_core::clock::{Clock, SystemClock};
use giftlist_core::sort::{SortKey, sort_gifts};
use owo_colors::OwoColorize;

use crate::render::{GiftCard, Render, matches_query};

pub fn run(list: &GiftList, sort: Option<SortKey>, search: Option<&str>) -> Result<()> {
    let mut gifts: Vec<_> = list
        .gifts()
        .iter()
        .filter(|g| search.is_none_or(|q| matches_query(g, q)))
        .cloned()
        .collect();

    if gifts.is_empty() {
        if list.is_empty() {
            println!("{}", "No gifts added yet".dimmed());
        } else {
            println!("{}", "No gifts match your search".dimmed());
        }
        return Ok(());
    }

    sort_gifts(&mut gifts, sort.unwrap_or_default());

    let today = SystemClock.today();
    let cards: Vec<String> = gifts
        .iter()
        .map(|gift| GiftCard { gift, today }.render())
        .collect();
    println!("{}", cards.join("\n\n"));

    Ok(())
}
