use std::fmt;

/// Custom error type for vCloud Air operations
#[derive(Debug)]
pub enum VcaError {
    /// Login rejected by the service
    AuthenticationFailure(String),
    /// No usable session for the selected profile
    NotLoggedIn,
    /// A required selector (instance, org) is missing or empty
    Validation(String),
    /// Operation not available for the active service type
    Unsupported(String),
    /// Requested resource does not exist
    NotFound(String),
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
}

impl VcaError {
    /// True for failures reported by (or on the way to) the remote service
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            VcaError::Http(_) | VcaError::Api { .. } | VcaError::Json(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            VcaError::Validation(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for VcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcaError::AuthenticationFailure(msg) => write!(f, "Can't login: {}", msg),
            VcaError::NotLoggedIn => write!(f, "Not logged in"),
            VcaError::Validation(msg) => write!(f, "{}", msg),
            VcaError::Unsupported(msg) => write!(f, "{}", msg),
            VcaError::NotFound(msg) => write!(f, "{}", msg),
            VcaError::Http(e) => write!(f, "HTTP request failed: {}", e),
            VcaError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            VcaError::Json(msg) => write!(f, "JSON error: {}", msg),
            VcaError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for VcaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VcaError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VcaError {
    fn from(err: reqwest::Error) -> Self {
        VcaError::Http(err)
    }
}

impl From<serde_json::Error> for VcaError {
    fn from(err: serde_json::Error) -> Self {
        VcaError::Json(err.to_string())
    }
}

impl From<std::io::Error> for VcaError {
    fn from(err: std::io::Error) -> Self {
        VcaError::Config(err.to_string())
    }
}

/// Result type alias for vCloud Air operations
pub type Result<T> = std::result::Result<T, VcaError>;
