use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt record in {location}: {reason}")]
    Corrupt { location: String, reason: String },
    #[error("{0}")]
    Other(String),
}

impl StorageError {
    #[must_use]
    pub fn corrupt(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::Other(value.to_string())
    }
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} already has a round in progress")]
    DuplicateActiveRound(String),
    #[error("no active round for {0}")]
    NoActiveRound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
    #[error("export failed: {0}")]
    Export(String),
}

impl TrackerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for errors caused by the request rather than the backing store.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::StorageUnavailable(_) | Self::Export(_))
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}
