use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),
}

pub type Result<T> = std::result::Result<T, NavError>;
