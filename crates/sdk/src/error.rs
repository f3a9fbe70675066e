//! SDK error types with "not found" classification.
//!
//! Provides a single error enum for the client layer. The important
//! distinction is [`ClientError::is_not_found`]: a single-row lookup that
//! finds nothing is an *expected-empty* condition, which stores translate
//! into an absent cached value rather than an error slot entry. Every other
//! failure is a real fault and follows the store's surfacing policy.

use snafu::{Location, Snafu};

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced by the gateway and the client layer.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    /// Failed to reach the gateway at all.
    #[snafu(display("Connection error at {location}: {message}"))]
    Connection {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The gateway rejected or failed the request.
    #[snafu(display("Gateway error: {message}"))]
    Rpc {
        /// Error message from the gateway.
        message: String,
    },

    /// A single-row lookup found no row.
    ///
    /// Expected-empty condition: callers scoped to one row treat this as
    /// a normal absent result, never as a fault.
    #[snafu(display("{entity} not found"))]
    NotFound {
        /// What was looked up (e.g. `"profile"`, `"notification"`).
        entity: String,
    },

    /// Configuration validation error.
    #[snafu(display("Configuration error: {message}"))]
    Config {
        /// Error description.
        message: String,
    },

    /// A response row could not be decoded.
    #[snafu(display("Decode error: {message}"))]
    Decode {
        /// Error description.
        message: String,
    },
}

impl ClientError {
    /// Returns true if this is the expected-empty "no row found" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let err = ClientError::NotFound { entity: "profile".to_owned() };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "profile not found");
    }

    #[test]
    fn rpc_error_is_not_not_found() {
        let err = ClientError::Rpc { message: "permission denied".to_owned() };
        assert!(!err.is_not_found());
    }

    #[test]
    fn connection_error_is_not_not_found() {
        let err = ClientError::Connection {
            message: "connection refused".to_owned(),
            location: Location::default(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("connection refused"));
    }
}
