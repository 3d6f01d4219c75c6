//! Error types for giftlist.

use thiserror::Error;

use crate::gift::GiftId;

/// Errors that can occur in giftlist operations.
#[derive(Error, Debug)]
pub enum GiftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Gift not found: {0}")]
    NotFound(GiftId),

    #[error("Invalid import format: {0}")]
    Format(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A gift payload was rejected before it reached the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Gift name is required")]
    MissingName,

    #[error("Recipient is required")]
    MissingRecipient,

    #[error("Invalid reminder date '{0}'. Expected YYYY-MM-DD")]
    InvalidReminderDate(String),
}

/// Failures of the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for giftlist operations.
pub type GiftResult<T> = Result<T, GiftError>;
