use thiserror::Error;

/// A boxed error as returned by transports and send overrides.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The result type of all recording operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Raised when a metric cannot be handed to a transport.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither a `send` override nor a client was configured.
    #[error("no transport configured: set either a client or a send function")]
    MissingTransport,
    /// The transport (or send override) failed.
    #[error("transport failed to send metric")]
    Transport(#[source] BoxError),
    /// A process-wide function was called without a bound facade.
    #[error("no metric facade bound; call eventsd_metric::init first")]
    NotInitialized,
}

/// Raised if an aggregation label override does not match the built-in key set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggTypeError {
    /// The override does not provide a label for these keys.
    #[error("aggregation type override is missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
    /// The override contains keys that are not aggregation types.
    #[error("aggregation type override has unknown keys: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),
    /// The override provides more than one label for these keys.
    #[error("aggregation type override has duplicate keys: {}", .0.join(", "))]
    DuplicateKeys(Vec<&'static str>),
    /// A string could not be parsed as an aggregation type.
    #[error("invalid aggregation type")]
    InvalidType,
}
