//! Core of giftlist: gift records, their local store, and reminders.
//!
//! - `gift` defines the record and its validation
//! - `gift_list` owns the collection and writes it through to a `store`
//! - `reminder` decides how urgent a gift's reminder is on a given day
//! - `scheduler` re-checks reminders periodically and reports to a `sink`

pub mod clock;
pub mod config;
pub mod error;
pub mod gift;
pub mod gift_list;
pub mod reminder;
pub mod scheduler;
pub mod sink;
pub mod sort;
pub mod store;
pub mod transfer;

pub use error::{GiftError, GiftResult, StoreError, ValidationError};
pub use gift::{EventKind, Gift, GiftId, GiftInput};
pub use gift_list::{GiftList, SharedGiftList};
