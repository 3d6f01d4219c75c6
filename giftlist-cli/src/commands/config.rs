use anyhow::Result;
use giftlist_core::config::GiftlistConfig;
use owo_colors::OwoColorize;

pub fn run(config: &GiftlistConfig) -> Result<()> {
    let config_path = GiftlistConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Gifts:      {}", config.data_path().display());
    println!();
    println!("{}", "Reminders".bold());
    println!("  Check interval:  {}", config.check_interval);

    Ok(())
}
