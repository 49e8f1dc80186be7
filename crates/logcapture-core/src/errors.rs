use thiserror::Error;

use logcapture_core_types::level::ParseLevelError;
use logcapture_core_types::schema::{CONFIG_FILE_NAME, CONFIG_KEY_PRINT_LEVEL, ENV_PRINT_LEVEL};

/// Result type alias using CaptureError
pub type Result<T> = std::result::Result<T, CaptureError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure the capture engine can surface falls into one of these
/// kinds. Each kind maps to a stable code usable in assertions and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A caller passed a value the operation cannot accept
    InvalidArgument,
    /// The operation is not valid for the current state of the value
    InvalidState,
    /// Configuration could not be turned into a usable setting
    InvalidConfig,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::InvalidState => "ERR_INVALID_STATE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification kind plus the operation and message context
/// needed to explain a failure without string matching.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
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

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

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
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Concrete failures raised by the capture engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    // ===== Invalid arguments =====
    /// A level name did not match any known level
    #[error("Unknown level name: {value}")]
    UnknownLevel { value: String },

    /// Loggers must be addressable by a non-empty name
    #[error("Logger name must not be empty")]
    EmptyLoggerName,

    /// The canonical event constructor was missing a required field
    #[error("Event is missing required field: {field}")]
    MissingEventField { field: &'static str },

    // ===== Invalid state =====
    /// The event was built by hand rather than captured by a logger
    #[error("Event was not created by a logger")]
    NoCreatingLogger,

    /// The logger that captured the event no longer exists
    #[error("Logger '{name}' that created this event has been dropped")]
    CreatingLoggerDropped { name: String },

    // ===== Configuration =====
    /// The print threshold could not be parsed
    #[error(
        "Invalid level name '{value}' in {} of file {} or environment variable {}",
        CONFIG_KEY_PRINT_LEVEL,
        CONFIG_FILE_NAME,
        ENV_PRINT_LEVEL
    )]
    InvalidPrintLevel { value: String },

    /// The config file exists but is not valid TOML
    #[error("Failed to parse {path}: {reason}")]
    ConfigParse { path: String, reason: String },

    /// The config file exists but could not be read
    #[error("Failed to read {path}: {reason}")]
    ConfigRead { path: String, reason: String },
}

impl From<ParseLevelError> for CaptureError {
    fn from(err: ParseLevelError) -> Self {
        CaptureError::UnknownLevel { value: err.value }
    }
}

/// Conversion from CaptureError to ExError
impl From<CaptureError> for ExError {
    fn from(err: CaptureError) -> Self {
        let message = err.to_string();
        match err {
            CaptureError::UnknownLevel { .. } => ExError::new(ExErrorKind::InvalidArgument)
                .with_op("parse_level")
                .with_message(message),

            CaptureError::EmptyLoggerName => ExError::new(ExErrorKind::InvalidArgument)
                .with_op("get_logger")
                .with_message(message),

            CaptureError::MissingEventField { .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_op("build_event")
                    .with_message(message)
            }

            CaptureError::NoCreatingLogger | CaptureError::CreatingLoggerDropped { .. } => {
                ExError::new(ExErrorKind::InvalidState)
                    .with_op("creating_logger")
                    .with_message(message)
            }

            CaptureError::InvalidPrintLevel { ref value } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("load_config")
                    .with_message(message.clone())
                    .with_source(
                        ExError::new(ExErrorKind::InvalidArgument)
                            .with_op("parse_level")
                            .with_message(format!("Unknown level name: {}", value)),
                    )
            }

            CaptureError::ConfigParse { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),

            CaptureError::ConfigRead { .. } => ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_message(message),
        }
    }
}
