pub mod api;
pub mod config;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::{ApiConfig, ConfigError};
pub use utils::{resolve_image_url, PathKind};
