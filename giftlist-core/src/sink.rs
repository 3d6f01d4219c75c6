//! Where the collection and the scheduler report to.
//!
//! A sink is the presentation side: it re-renders from the snapshot it is
//! handed after every mutation, shows reminders, and shows operational
//! feedback. The core never waits on it.

use std::fmt;
use std::sync::Mutex;

use tracing::{debug, error, info, warn};

use crate::gift::{Gift, GiftId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
    Reminder,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Reminder => "reminder",
        };
        write!(f, "{}", name)
    }
}

pub trait Sink: Send + Sync {
    /// The collection changed; `gifts` is the full current snapshot.
    fn gifts_changed(&self, gifts: &[Gift]);

    /// A reminder is due for `gift`.
    fn reminder(&self, gift: &Gift, message: &str, severity: Severity);

    /// Feedback about an operation.
    fn notify(&self, message: &str, severity: Severity);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn gifts_changed(&self, _gifts: &[Gift]) {}

    fn reminder(&self, _gift: &Gift, _message: &str, _severity: Severity) {}

    fn notify(&self, _message: &str, _severity: Severity) {}
}

/// Writes everything to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn gifts_changed(&self, gifts: &[Gift]) {
        debug!(count = gifts.len(), "gift list changed");
    }

    fn reminder(&self, gift: &Gift, message: &str, severity: Severity) {
        info!(id = %gift.id, %severity, "{}", message);
    }

    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => error!("{}", message),
            Severity::Warning => warn!("{}", message),
            _ => info!(%severity, "{}", message),
        }
    }
}

/// Something a `RecordingSink` received.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    GiftsChanged(Vec<GiftId>),
    Reminder {
        id: GiftId,
        message: String,
        severity: Severity,
    },
    Notice {
        message: String,
        severity: Severity,
    },
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.lock().clone()
    }

    pub fn reminders(&self) -> Vec<(GiftId, String)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Reminder { id, message, .. } => Some((*id, message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<(String, Severity)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Notice { message, severity } => Some((message.clone(), *severity)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SinkEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: SinkEvent) {
        self.lock().push(event);
    }
}

impl Sink for RecordingSink {
    fn gifts_changed(&self, gifts: &[Gift]) {
        self.push(SinkEvent::GiftsChanged(gifts.iter().map(|g| g.id).collect()));
    }

    fn reminder(&self, gift: &Gift, message: &str, severity: Severity) {
        self.push(SinkEvent::Reminder {
            id: gift.id,
            message: message.to_string(),
            severity,
        });
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.push(SinkEvent::Notice {
            message: message.to_string(),
            severity,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GiftInput;
    use chrono::Utc;

    #[test]
    fn recording_sink_keeps_arrival_order() {
        let sink = RecordingSink::new();
        let gift = GiftInput::new("Book", "Sam")
            .validate()
            .unwrap()
            .into_gift(GiftId(7), Utc::now());

        sink.notify("saved", Severity::Success);
        sink.reminder(&gift, "soon", Severity::Reminder);
        sink.gifts_changed(std::slice::from_ref(&gift));

        assert_eq!(sink.reminders(), vec![(GiftId(7), "soon".to_string())]);
        assert_eq!(sink.notices(), vec![("saved".to_string(), Severity::Success)]);
        assert_eq!(sink.events().last(), Some(&SinkEvent::GiftsChanged(vec![GiftId(7)])));

        sink.clear();
        assert!(sink.events().is_empty());
    }
}
