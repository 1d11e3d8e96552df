use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    OpenFileError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
