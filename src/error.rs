//! Error kinds raised inside the extraction pipeline.
//!
//! None of these reach the add-on protocol: the listing extractor and the
//! stream resolver catch them, log them and degrade to an empty result.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single fetch/parse cycle.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status. 403 usually means the bot wall caught us.
    #[error("{url} answered {status}")]
    Blocked { status: StatusCode, url: String },

    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// `true` for failures caused by the network or the remote site.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Blocked { .. } | Self::Timeout { .. }
        )
    }

    /// `true` when the site refused us (HTTP 403/429).
    #[must_use]
    pub fn is_bot_block(&self) -> bool {
        matches!(
            self,
            Self::Blocked { status, .. }
                if *status == StatusCode::FORBIDDEN || *status == StatusCode::TOO_MANY_REQUESTS
        )
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_is_bot_block() {
        let err = BridgeError::Blocked {
            status: StatusCode::FORBIDDEN,
            url: "https://example.com/".into(),
        };
        assert!(err.is_bot_block());
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "https://example.com/ answered 403 Forbidden");
    }

    #[test]
    fn not_found_is_not_bot_block() {
        let err = BridgeError::Blocked {
            status: StatusCode::NOT_FOUND,
            url: "https://example.com/x".into(),
        };
        assert!(!err.is_bot_block());
    }

    #[test]
    fn parse_and_id_errors_are_not_transport() {
        assert!(!BridgeError::Parse("no flashvars".into()).is_transport());
        assert!(!BridgeError::MalformedIdentifier("x".into()).is_transport());
    }
}
