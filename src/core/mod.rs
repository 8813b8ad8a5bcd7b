pub mod config;
pub mod error;
pub mod types;

pub use config::NavConfig;
pub use error::{NavError, Result};
