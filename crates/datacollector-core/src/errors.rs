use thiserror::Error;

/// Result type alias using DataCollectorError
pub type Result<T> = std::result::Result<T, DataCollectorError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that drivers, diagnostics and tests
/// can rely on without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidLevel,

    // Identifier generation
    EntropyUnavailable,

    // Driver / IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidLevel => "ERR_INVALID_LEVEL",
            ExErrorKind::EntropyUnavailable => "ERR_ENTROPY_UNAVAILABLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// This is the error type drivers return. It carries a stable kind plus
/// optional context for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the facade itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataCollectorError {
    /// Minimum log level is not one of the known levels
    #[error("Invalid value: {value}")]
    InvalidLogLevel { value: String },

    /// The randomness source could not produce a transaction identifier
    #[error("Unable to generate transaction id: {reason}")]
    TransactionIdUnavailable { reason: String },

    /// Encoding name is not one of the supported encodings
    #[error("Unknown encoding: {encoding}")]
    UnknownEncoding { encoding: String },

    /// Entry could not be serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<DataCollectorError> for ExError {
    fn from(err: DataCollectorError) -> Self {
        match err {
            DataCollectorError::InvalidLogLevel { value } => {
                ExError::new(ExErrorKind::InvalidLevel)
                    .with_op("with_log_level")
                    .with_message(format!("Invalid value: {}", value))
            }

            DataCollectorError::TransactionIdUnavailable { reason } => {
                ExError::new(ExErrorKind::EntropyUnavailable)
                    .with_op("start_transaction")
                    .with_message(reason)
            }

            DataCollectorError::UnknownEncoding { encoding } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("set_encoding")
                    .with_message(format!("Unknown encoding: {}", encoding))
            }

            DataCollectorError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for DataCollectorError {
    fn from(err: serde_json::Error) -> Self {
        DataCollectorError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<getrandom::Error> for DataCollectorError {
    fn from(err: getrandom::Error) -> Self {
        DataCollectorError::TransactionIdUnavailable {
            reason: err.to_string(),
        }
    }
}
