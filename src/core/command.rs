use async_trait::async_trait;
use crate::core::catalog::CatalogError;

#[derive(Debug)]
pub enum CommandError {
    Conflict {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
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

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<CatalogError> for CommandError {
    fn from(other: CatalogError) -> Self {
        match other {
            CatalogError::DuplicateIdentifier { message } => {
                CommandError::Conflict { message }
            }
            CatalogError::MandatoryFieldMissing { message } => {
                CommandError::Validation { message, reason_code: None }
            }
            CatalogError::NegativeCopies { message } => {
                CommandError::Validation { message, reason_code: None }
            }
            CatalogError::InvalidArgument { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            CatalogError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            CatalogError::ActiveLoanConflict { message } => {
                CommandError::Conflict { message }
            }
            CatalogError::Persistence { message, reason_code, retryable } => {
                CommandError::Persistence { message, reason_code, retryable }
            }
            CatalogError::Serialization { message } => {
                CommandError::Serialization { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::catalog::CatalogError;
    use crate::core::command::CommandError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Conflict { message: "test".to_string() };
        let _ = CommandError::NotFound { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Persistence { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
    }

    #[tokio::test]
    async fn test_should_convert_catalog_error() {
        assert!(matches!(CommandError::from(CatalogError::duplicate_identifier("test")), CommandError::Conflict { message: _ }));
        assert!(matches!(CommandError::from(CatalogError::mandatory_field_missing("test")), CommandError::Validation { message: _, reason_code: _ }));
        assert!(matches!(CommandError::from(CatalogError::negative_copies("test")), CommandError::Validation { message: _, reason_code: _ }));
        assert!(matches!(CommandError::from(CatalogError::invalid_argument("test", None)), CommandError::Validation { message: _, reason_code: _ }));
        assert!(matches!(CommandError::from(CatalogError::not_found("test")), CommandError::NotFound { message: _ }));
        assert!(matches!(CommandError::from(CatalogError::active_loan_conflict("test")), CommandError::Conflict { message: _ }));
        assert!(matches!(CommandError::from(CatalogError::persistence("test", None, true)), CommandError::Persistence { message: _, reason_code: _, retryable: _ }));
        assert!(matches!(CommandError::from(CatalogError::serialization("test")), CommandError::Serialization { message: _ }));
    }
}
