//! Configuration errors: unreadable `frontdesk.toml` layers, bad values, and
//! a missing API token.

/// Configuration could not be loaded or is unusable.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} ({}:{})", message, file, line)]
pub struct ConfigError {
    /// What went wrong, including the offending file or key when known
    pub message: String,
    /// Line where the error was raised
    pub line: u32,
    /// Source file where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Create an error at the caller's location.
    ///
    /// ```
    /// use frontdesk_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing [limiter] section");
    /// assert!(err.message.contains("[limiter]"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The environment variable that should hold the API token is unset or blank.
    #[track_caller]
    pub fn missing_token(var: &str) -> Self {
        Self::new(format!("{} environment variable not set", var))
    }
}
