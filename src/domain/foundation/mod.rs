//! Shared domain primitives.

mod errors;
mod ids;
mod phone;
mod service;

pub use errors::{BookingError, CancelError, DispatchError, StoreError, ValidationError};
pub use ids::BookingId;
pub use phone::PhoneNumber;
pub use service::ServiceCode;
