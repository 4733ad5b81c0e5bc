use std::fmt;

/// Main error type for document submissions
#[derive(Debug)]
pub enum CrptError {
    /// Caller was cancelled while waiting for admission
    Interrupted,

    /// More admissions than the limit landed in one window
    LimitExceeded { limit: u32 },

    /// The document could not be serialized
    Encoding(serde_json::Error),

    /// Network failure or non-200 response
    Transport(TransportError),

    /// The gate has been shut down
    Stopped,

    /// Invalid construction arguments
    Config(String),
}

/// Transport specific errors
#[derive(Debug)]
pub enum TransportError {
    /// The endpoint answered with something other than 200
    Status(u16),

    /// DNS, TCP, TLS or timeout failures from the HTTP client
    Http(reqwest::Error),

    /// A header value (usually the signature) is not valid in HTTP
    InvalidHeader(String),
}

impl fmt::Display for CrptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrptError::Interrupted => write!(f, "Interrupted while waiting for admission"),
            CrptError::LimitExceeded { limit } => {
                write!(f, "Request limit exceeded: more than {} in one window", limit)
            }
            CrptError::Encoding(err) => write!(f, "Encoding error: {}", err),
            CrptError::Transport(err) => write!(f, "Transport error: {}", err),
            CrptError::Stopped => write!(f, "Gate is stopped"),
            CrptError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status(code) => {
                write!(f, "Failed to create document, response code: {}", code)
            }
            TransportError::Http(err) => write!(f, "HTTP: {}", err),
            TransportError::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
        }
    }
}

impl std::error::Error for CrptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrptError::Encoding(err) => Some(err),
            CrptError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CrptError>;

impl CrptError {
    /// HTTP status carried by a transport error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CrptError::Transport(TransportError::Status(code)) => Some(*code),
            CrptError::Transport(TransportError::Http(err)) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a caller could reasonably try the same submission again later.
    /// Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            CrptError::LimitExceeded { .. } => true,
            CrptError::Transport(TransportError::Status(code)) => *code == 429 || *code >= 500,
            CrptError::Transport(TransportError::Http(err)) => {
                err.is_timeout() || err.is_connect()
            }
            _ => false,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            CrptError::Interrupted => "interrupted",
            CrptError::LimitExceeded { .. } => "limit_exceeded",
            CrptError::Encoding(_) => "encoding_error",
            CrptError::Transport(_) => "transport_error",
            CrptError::Stopped => "stopped",
            CrptError::Config(_) => "configuration_error",
        }
    }
}

impl From<serde_json::Error> for CrptError {
    fn from(err: serde_json::Error) -> Self {
        CrptError::Encoding(err)
    }
}

impl From<TransportError> for CrptError {
    fn from(err: TransportError) -> Self {
        CrptError::Transport(err)
    }
}

impl From<reqwest::Error> for CrptError {
    fn from(err: reqwest::Error) -> Self {
        CrptError::Transport(TransportError::Http(err))
    }
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::CrptError::Config($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::CrptError::Config(format!($fmt, $($arg)*))
    };
}
