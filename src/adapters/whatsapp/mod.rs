//! WhatsApp Cloud API adapter.

mod cloud_api;
mod recording;

pub use cloud_api::CloudApiGateway;
pub use recording::RecordingGateway;
