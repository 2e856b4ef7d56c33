use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

const GENERIC_CONNECTION_MESSAGE: &str =
    "The daemon for this node could not be reached, please try again later.";
const GENERIC_FILE_MESSAGE: &str =
    "An error occurred while performing the requested file operation, please try again.";
const GENERIC_INTERNAL_MESSAGE: &str = "An unexpected error occurred, please try again.";

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("server not found: {0}")]
    ServerNotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("daemon connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("daemon file operation failed: {}", .message.as_deref().unwrap_or("no detail"))]
    FileOperation { message: Option<String> },

    #[error("configuration error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Message safe to show an end user. Transport causes, URLs and other
    /// internal detail stay in the logs and never cross this boundary.
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::ServerNotFound(id) => {
                format!("No server could be found for \"{}\".", id)
            }
            BridgeError::InvalidPath(reason) => format!("Invalid path: {}", reason),
            BridgeError::Connection(_) => GENERIC_CONNECTION_MESSAGE.to_string(),
            BridgeError::FileOperation { message } => message
                .clone()
                .unwrap_or_else(|| GENERIC_FILE_MESSAGE.to_string()),
            BridgeError::Config(_) => GENERIC_INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Whether a caller-side retry can plausibly succeed. This layer never
    /// retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BridgeError::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_operation_surfaces_daemon_detail() {
        let err = BridgeError::FileOperation {
            message: Some("Disk quota exceeded.".to_string()),
        };
        assert_eq!(err.user_message(), "Disk quota exceeded.");
    }

    #[test]
    fn file_operation_without_detail_uses_generic_message() {
        let err = BridgeError::FileOperation { message: None };
        assert_eq!(err.user_message(), GENERIC_FILE_MESSAGE);
        assert!(!err.is_retryable());
    }

    #[test]
    fn not_found_and_invalid_path_are_displayable() {
        let err = BridgeError::ServerNotFound("abc123".to_string());
        assert!(err.user_message().contains("abc123"));

        let err = BridgeError::InvalidPath("path may not traverse".to_string());
        assert!(err.user_message().contains("path may not traverse"));
    }

    #[test]
    fn config_errors_are_not_shown_to_users() {
        let err = BridgeError::Config("could not read /etc/bridge.toml".to_string());
        assert!(!err.user_message().contains("/etc/bridge.toml"));
    }
}
