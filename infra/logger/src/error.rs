use std::borrow::Cow;

/// A specialized [`LoggerError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid builder settings (empty name, no layers enabled).
    #[error("Invalid logger configuration: {message}")]
    InvalidConfiguration { message: Cow<'static, str> },

    /// Occurs when a malformed env filter directive is supplied.
    #[error("Invalid filter directive: {source}")]
    Filter {
        #[from]
        source: tracing_subscriber::filter::ParseError,
    },

    /// Occurs when the rolling file appender cannot be created.
    #[error("Failed to initialize file appender: {source}")]
    Appender {
        #[from]
        source: tracing_appender::rolling::InitError,
    },

    /// Occurs when a global subscriber has already been installed.
    #[error("Failed to set global subscriber: {source}")]
    Subscriber {
        #[from]
        source: tracing_subscriber::util::TryInitError,
    },

    /// Internal fallback for unexpected I/O issues.
    #[error("Internal logger error: {message}")]
    Internal { message: Cow<'static, str> },
}
