//! Typed configuration loaded from the environment.
//!
//! Variables use the `BOOKLINE` prefix with `__` separating sections, e.g.
//! `BOOKLINE_WHATSAPP__ACCESS_TOKEN` or `BOOKLINE_SERVER__PORT`. A local
//! `.env` file is honored when present.

mod admin;
mod error;
mod scheduling;
mod server;
mod whatsapp;

pub use admin::AdminConfig;
pub use error::ConfigError;
pub use scheduling::SchedulingConfig;
pub use server::ServerConfig;
pub use whatsapp::WhatsAppConfig;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub whatsapp: WhatsAppConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Loads and validates configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("BOOKLINE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        let app: AppConfig = settings.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.whatsapp.validate()?;
        self.admin.validate()?;
        self.scheduling.validate()?;
        Ok(())
    }
}
