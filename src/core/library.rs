use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that the underlying store is throttling
    // or temporarily unreachable. The caller can retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // A checkout was asked to move to a state it cannot reach from its current one,
    // e.g. returning a checkout that was already returned.
    InvalidTransition {
        message: String,
    },
    // A record would break one of the data model rules, e.g. a return date that
    // precedes the checkout date.
    InvariantViolation {
        message: String,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn invalid_transition(message: &str) -> LibraryError {
        LibraryError::InvalidTransition { message: message.to_string() }
    }

    pub fn invariant_violation(message: &str) -> LibraryError {
        LibraryError::InvariantViolation { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } |
            LibraryError::NotFound { message } |
            LibraryError::InvalidTransition { message } |
            LibraryError::InvariantViolation { message } |
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the circulation services.
pub type LibraryResult<T> = Result<T, LibraryError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// CheckoutStatus is derived from a checkout's return date and paid flag, it is never stored.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum CheckoutStatus {
    Open,
    Returned,
    Settled,
}

impl From<String> for CheckoutStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Open" => CheckoutStatus::Open,
            "Returned" => CheckoutStatus::Returned,
            "Settled" => CheckoutStatus::Settled,
            _ => CheckoutStatus::Open,
        }
    }
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CheckoutStatus::Open => write!(f, "Open"),
            CheckoutStatus::Returned => write!(f, "Returned"),
            CheckoutStatus::Settled => write!(f, "Settled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{CheckoutStatus, LibraryError};

    #[test]
    fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[test]
    fn test_should_create_transition_errors() {
        assert!(matches!(LibraryError::invalid_transition("test"), LibraryError::InvalidTransition{ message: _ }));
        assert!(matches!(LibraryError::invariant_violation("test"), LibraryError::InvariantViolation{ message: _ }));
        assert_eq!("already returned", LibraryError::invalid_transition("already returned").to_string());
    }

    #[test]
    fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("400".to_string()), false), LibraryError::AccessDenied{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ .. }));
    }

    #[test]
    fn test_should_create_retryable_error() {
        assert!(!LibraryError::database("test", None, false).retryable());
        assert!(LibraryError::database("test", None, true).retryable());
        assert!(!LibraryError::not_found("test").retryable());
        assert!(LibraryError::unavailable("test", None, true).retryable());
        assert!(!LibraryError::invalid_transition("test").retryable());
        assert!(!LibraryError::invariant_violation("test").retryable());
        assert!(!LibraryError::validation("test", None).retryable());
    }

    #[test]
    fn test_should_format_checkout_status() {
        for status in [CheckoutStatus::Open, CheckoutStatus::Returned, CheckoutStatus::Settled] {
            assert_eq!(status, CheckoutStatus::from(status.to_string()));
        }
    }
}
