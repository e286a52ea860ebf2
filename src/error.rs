//! Typed errors surfaced by remote license lookups.

use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by a [`RemoteLicenseService`](crate::remote::RemoteLicenseService).
#[derive(Error, Debug)]
pub enum LicenseError {
    #[error("No license found for {owner}/{name}")]
    NotFound { owner: String, name: String },

    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("API authentication failed: {0}")]
    Authentication(String),

    #[error("Remote request failed: {0}")]
    Transport(String),

    #[error("Failed to decode license content: {0}")]
    Decode(String),
}

impl LicenseError {
    /// Create a not-found error for a repository.
    pub fn not_found(
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Create a transport error with context.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for LicenseError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimited
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code == StatusCode::UNAUTHORIZED =>
            {
                Self::Authentication(source.message.clone())
            }
            _ => Self::Transport(format!("GitHub API error: {}", err)),
        }
    }
}

impl From<base64::DecodeError> for LicenseError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for LicenseError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;

    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = LicenseError::not_found("mono0926", "NativePopup");
        assert_eq!(
            err.to_string(),
            "No license found for mono0926/NativePopup"
        );

        let err = LicenseError::transport("connection reset");
        assert_eq!(err.to_string(), "Remote request failed: connection reset");
    }

    #[test]
    fn test_error_helpers() {
        assert!(LicenseError::not_found("a", "b").is_not_found());
        assert!(!LicenseError::RateLimited.is_not_found());
        assert!(matches!(
            LicenseError::transport("boom"),
            LicenseError::Transport(_)
        ));
    }

    #[test]
    fn test_from_conversions() {
        let decode_err = base64::engine::general_purpose::STANDARD
            .decode("not base64!")
            .unwrap_err();
        let err: LicenseError = decode_err.into();
        assert!(matches!(err, LicenseError::Decode(_)));

        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: LicenseError = utf8_err.into();
        assert!(matches!(err, LicenseError::Decode(_)));
    }
}
