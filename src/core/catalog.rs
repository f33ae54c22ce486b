use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum CatalogError {
    // Registration found a record already stored under the incoming book id.
    DuplicateIdentifier {
        message: String,
    },
    // Title or ISBN empty on register/update.
    MandatoryFieldMissing {
        message: String,
    },
    // Negative copy count at registration time.
    NegativeCopies {
        message: String,
    },
    // Invalid book id or negative copy count at update time. This is a
    // separate kind from NegativeCopies on purpose, both exist in the taxonomy.
    InvalidArgument {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    // Deletion blocked while at least one loan still references the book.
    ActiveLoanConflict {
        message: String,
    },
    Persistence {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
}

impl CatalogError {
    pub fn duplicate_identifier(message: &str) -> CatalogError {
        CatalogError::DuplicateIdentifier { message: message.to_string() }
    }

    pub fn mandatory_field_missing(message: &str) -> CatalogError {
        CatalogError::MandatoryFieldMissing { message: message.to_string() }
    }

    pub fn negative_copies(message: &str) -> CatalogError {
        CatalogError::NegativeCopies { message: message.to_string() }
    }

    pub fn invalid_argument(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::InvalidArgument { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str) -> CatalogError {
        CatalogError::NotFound { message: message.to_string() }
    }

    pub fn active_loan_conflict(message: &str) -> CatalogError {
        CatalogError::ActiveLoanConflict { message: message.to_string() }
    }

    pub fn persistence(message: &str, reason_code: Option<String>, retryable: bool) -> CatalogError {
        CatalogError::Persistence { message: message.to_string(), reason_code, retryable }
    }

    pub fn serialization(message: &str) -> CatalogError {
        CatalogError::Serialization { message: message.to_string() }
    }

    pub fn retryable(&self) -> bool {
        match self {
            CatalogError::DuplicateIdentifier { .. } => { false }
            CatalogError::MandatoryFieldMissing { .. } => { false }
            CatalogError::NegativeCopies { .. } => { false }
            CatalogError::InvalidArgument { .. } => { false }
            CatalogError::NotFound { .. } => { false }
            CatalogError::ActiveLoanConflict { .. } => { false }
            CatalogError::Persistence { retryable, .. } => { *retryable }
            CatalogError::Serialization { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateIdentifier { message } => {
                write!(f, "{}", message)
            }
            CatalogError::MandatoryFieldMissing { message } => {
                write!(f, "{}", message)
            }
            CatalogError::NegativeCopies { message } => {
                write!(f, "{}", message)
            }
            CatalogError::InvalidArgument { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            CatalogError::NotFound { message } => {
                write!(f, "{}", message)
            }
            CatalogError::ActiveLoanConflict { message } => {
                write!(f, "{}", message)
            }
            CatalogError::Persistence { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            CatalogError::Serialization { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// A specialized Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// Outcome of a validated operation once it reaches the persistence
// collaborator. A failure of the delegated persist call lands here instead
// of propagating as an error, so callers can tell "validation rejected the
// request" apart from "the collaborator could not store it".
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum PersistOutcome {
    Committed,
    PersistenceFailed {
        reason: String,
    },
}

impl PersistOutcome {
    pub fn persistence_failed(reason: &str) -> PersistOutcome {
        PersistOutcome::PersistenceFailed { reason: reason.to_string() }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, PersistOutcome::Committed)
    }
}
