/// Structured error types for Waypost
///
/// Error families mirror the handling policy:
/// - Validation: reported immediately, the operation is aborted
/// - Database: caught and surfaced to the caller as a failed operation
/// - Auth: surfaced as an unauthorized response
/// - PlacesApi / best-effort paths: logged only, never fail the parent operation
/// - Configuration: startup-time failures

#[derive(Debug, Clone)]
pub enum WaypostError {
    /// A required field is missing or empty
    Validation { field: String },

    /// A database operation failed
    Database { operation: String, message: String },

    /// Session is missing, unknown, or expired
    Auth { reason: String },

    /// The upstream places API could not be used
    PlacesApi {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// Bad or missing configuration
    Configuration { message: String },
}

impl WaypostError {
    pub fn validation(field: &str) -> Self {
        WaypostError::Validation {
            field: field.to_string(),
        }
    }

    pub fn database(operation: &str, message: impl std::fmt::Display) -> Self {
        WaypostError::Database {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    pub fn auth(reason: &str) -> Self {
        WaypostError::Auth {
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for WaypostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaypostError::Validation { field } => {
                write!(f, "Validation Error: missing required field '{}'", field)
            }
            WaypostError::Database { operation, message } => {
                write!(f, "Database Error: {} failed: {}", operation, message)
            }
            WaypostError::Auth { reason } => {
                write!(f, "Auth Error: {}", reason)
            }
            WaypostError::PlacesApi {
                endpoint,
                status,
                message,
            } => match status {
                Some(code) => write!(
                    f,
                    "Places API Error: HTTP {} from {}: {}",
                    code, endpoint, message
                ),
                None => write!(f, "Places API Error: {}: {}", endpoint, message),
            },
            WaypostError::Configuration { message } => {
                write!(f, "Configuration Error: {}", message)
            }
        }
    }
}

impl std::error::Error for WaypostError {}
