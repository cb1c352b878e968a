//! Bookline - conversational appointment booking over WhatsApp.
//!
//! Layered hexagonally:
//!
//! - `domain` - value objects and pure booking/slot/dialog rules
//! - `ports` - traits for external collaborators (stores, messaging)
//! - `application` - orchestration: dialog engine, booking manager,
//!   background schedulers
//! - `adapters` - port implementations: in-memory and tabular storage,
//!   WhatsApp Cloud API, HTTP webhook
//! - `config` - typed environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
