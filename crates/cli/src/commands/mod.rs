//! CLI subcommands.

pub mod migrate;
pub mod user;

use bistro_web::config::{BistroConfig, ConfigError};

/// Load the shared configuration (including `.env`).
fn load_config() -> Result<BistroConfig, ConfigError> {
    BistroConfig::from_env()
}
