// Configuration loading

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{ApiSettings, Config, ENV_API_ENDPOINT, ENV_API_KEY, ENV_API_SECRET};
