use thiserror::Error;
use uuid::Uuid;

use mmm_domain::{GroupError, TransactionError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(#[from] TransactionError),
    #[error("invalid group: {0}")]
    InvalidGroup(#[from] GroupError),
    #[error("transaction references unknown group {0}")]
    UnknownGroup(Uuid),
    #[error("group already exists: {0}")]
    DuplicateGroup(Uuid),
    #[error("group not found: {0}")]
    GroupNotFound(Uuid),
    #[error("export failed: {0}")]
    Export(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
