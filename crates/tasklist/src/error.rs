use thiserror::Error;

/// Bad user input. Always recoverable: front ends report it and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("not enough args")]
    NotEnoughArgs,

    #[error("missing description")]
    MissingDescription,

    #[error("expected exactly {expected} arg(s), found {found}")]
    ArgCount { expected: usize, found: usize },

    #[error("invalid task ID: {0}")]
    InvalidId(String),

    #[error("unrecognized command: {0}")]
    Unrecognized(String),

    #[error("name cannot be empty")]
    EmptyName,
}

/// Failures of the document store itself.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("datastore unavailable: {0}")]
    Unavailable(String),

    #[error("transaction conflict on {kind}/{id}")]
    Conflict { kind: String, id: i64 },

    #[error("transaction is no longer active")]
    TransactionClosed,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TaskListError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TaskListError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskListError::Command(_))
    }
}

pub type Result<T> = std::result::Result<T, TaskListError>;

/// Result alias for the datastore layer, which never produces validation errors.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
