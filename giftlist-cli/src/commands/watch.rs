use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use giftlist_core::GiftList;
use giftlist_core::clock::{Clock, SystemClock};
use giftlist_core::config::GiftlistConfig;
use giftlist_core::scheduler::{ReminderScheduler, SchedulerOptions};
use giftlist_core::sink::{Sink, TracingSink};
use owo_colors::OwoColorize;
use tracing::info;

use crate::terminal::TerminalSink;

pub async fn run(config: &GiftlistConfig) -> Result<()> {
    let period = config.check_interval()?;
    let sink: Arc<dyn Sink> = if std::io::stdout().is_terminal() {
        Arc::new(TerminalSink::new())
    } else {
        Arc::new(TracingSink)
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let list = GiftList::open(config.store(), sink.clone(), clock.clone()).into_shared();

    println!(
        "{}",
        format!(
            "Watching {} (checking every {}, Ctrl-C to stop)",
            config.data_path().display(),
            period_text(period)
        )
        .dimmed()
    );

    // Other commands may edit the file while we run.
    let options = SchedulerOptions {
        period,
        reload: true,
    };
    let scheduler = ReminderScheduler::start(list, sink, clock, options)?;

    tokio::signal::ctrl_c().await?;
    info!("stopping reminder scheduler");
    scheduler.stop().await;

    Ok(())
}

fn period_text(period: Duration) -> String {
    humantime::format_duration(period).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_text_keeps_sub_second_precision() {
        assert_eq!(period_text(Duration::from_secs(3600)), "1h");
        assert_eq!(period_text(Duration::from_secs(90 * 60)), "1h 30m");
        assert_eq!(period_text(Duration::from_millis(500)), "500ms");
    }
}
