//! Adapters - Implementations of ports for concrete external systems.
//!
//! - `storage` - in-memory stores for tests and single-process deployments
//! - `tabular` - slot/booking stores over a row-oriented spreadsheet backend
//! - `whatsapp` - WhatsApp Cloud API messaging gateway
//! - `http` - webhook and health endpoints

pub mod http;
pub mod storage;
pub mod tabular;
pub mod whatsapp;
