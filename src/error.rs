//! Error types for the wallet session and block window

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, SessionError>;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum SessionError {
    /// No wallet accounts available or provider unreachable
    #[error("Connection error: {0}")]
    Connection(String),

    /// Balance lookup failed
    #[error("Balance fetch error: {0}")]
    BalanceFetch(String),

    /// Contract call rejected or reverted
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// A block fetch failed during the window scan
    #[error("Window fetch error at height {height}: {reason}")]
    WindowFetch { height: u64, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transfer amount could not be parsed
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Address could not be parsed
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Base/whole unit conversion error
    #[error("Units error: {0}")]
    Units(String),
}

impl From<config::ConfigError> for SessionError {
    fn from(e: config::ConfigError) -> Self {
        SessionError::Configuration(e.to_string())
    }
}
