//! Terminal output for collection and reminder events.

use giftlist_core::Gift;
use giftlist_core::reminder::icon;
use giftlist_core::sink::{Severity, Sink};
use owo_colors::OwoColorize;
use tracing::debug;

/// Prints feedback and reminders as they arrive.
///
/// Collection snapshots are not printed; commands render what they need.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        TerminalSink
    }
}

impl Sink for TerminalSink {
    fn gifts_changed(&self, gifts: &[Gift]) {
        debug!(count = gifts.len(), "gift list changed");
    }

    fn reminder(&self, gift: &Gift, message: &str, _severity: Severity) {
        println!("{} {}", icon(gift), message.yellow().bold());
    }

    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => println!("{}", message.green()),
            Severity::Info => println!("{}", message.dimmed()),
            Severity::Reminder => println!("{}", message.yellow()),
            Severity::Warning => eprintln!("{}", message.yellow()),
            Severity::Error => eprintln!("{}", message.red()),
        }
    }
}
