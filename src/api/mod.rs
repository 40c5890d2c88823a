pub mod client;
pub mod error;
pub mod health;

pub use client::{is_live_status, set_silent, ApiClient};
pub use error::ApiError;
