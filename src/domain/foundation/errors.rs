//! Error types for the domain layer.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use super::BookingId;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Store collaborator failures.
///
/// The store offers no transactional guarantees beyond read-after-write; any
/// call may fail with `Unavailable`, and key-addressed updates may discover
/// the row has gone missing underneath them.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("row not found for key '{key}'")]
    RowNotFound { key: String },
}

impl StoreError {
    /// Creates an unavailable error from any collaborator failure.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable { reason: reason.into() }
    }

    /// Creates a row-not-found error for a key-addressed update.
    pub fn row_not_found(key: impl Into<String>) -> Self {
        StoreError::RowNotFound { key: key.into() }
    }
}

/// Failures from booking creation and slot administration.
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    /// The slot was taken or blocked between display and confirmation.
    #[error("time slot {date} {time} is no longer available")]
    SlotUnavailable { date: NaiveDate, time: NaiveTime },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures from booking cancellation.
#[derive(Debug, Clone, Error)]
pub enum CancelError {
    /// No confirmed booking with this id exists (including already-cancelled
    /// ones: a second cancellation must never free the slot twice).
    #[error("booking {0} not found")]
    NotFound(BookingId),

    /// The requesting phone does not own the booking.
    #[error("not authorized to cancel booking {0}")]
    Unauthorized(BookingId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Messaging gateway failure.
#[derive(Debug, Clone, Error)]
#[error("message dispatch failed: {reason}")]
pub struct DispatchError {
    pub reason: String,
}

impl DispatchError {
    /// Creates a dispatch error from any gateway failure.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}
