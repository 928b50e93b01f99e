use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Element has no navigation target to use as the login URL")]
    MissingLoginTarget,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bridge error: {0}")]
    Bridge(String),
}

pub type Result<T> = std::result::Result<T, LoginError>;
