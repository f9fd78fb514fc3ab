use thiserror::Error;

pub type Result<T> = std::result::Result<T, OnboardingError>;

#[derive(Error, Debug)]
pub enum OnboardingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl OnboardingError {
    /// True for failures that came back from (or on the way to) the server.
    /// Anything else is treated as unexpected by the step views.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            OnboardingError::Http(_) | OnboardingError::Status { .. } | OnboardingError::Rejected { .. }
        )
    }

    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            OnboardingError::Status { message, .. } | OnboardingError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

impl From<toml::de::Error> for OnboardingError {
    fn from(err: toml::de::Error) -> Self {
        OnboardingError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_skips_blank() {
        let err = OnboardingError::Rejected { message: Some("  ".into()) };
        assert_eq!(err.server_message(), None);

        let err = OnboardingError::Status { status: 409, message: Some("Email already registered".into()) };
        assert_eq!(err.server_message(), Some("Email already registered"));
        assert!(err.is_network());
    }

    #[test]
    fn config_errors_are_not_network() {
        let err = OnboardingError::Config("bad".into());
        assert!(!err.is_network());
        assert_eq!(err.server_message(), None);
    }
}
