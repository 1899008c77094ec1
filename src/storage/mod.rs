use chrono::NaiveDate;

use crate::error::StorageError;
use crate::model::{Round, RoundId};

pub mod memory;
pub mod sqlite;
pub mod text_log;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use text_log::TextLogStore;

/// Where rounds live. One collection of active rounds, one append-only
/// collection of finished rounds keyed by calendar day.
pub trait RoundStore: Send {
    fn append_active(&mut self, round: &Round) -> Result<(), StorageError>;
    /// Active rounds in the order they were started.
    fn list_active(&self) -> Result<Vec<Round>, StorageError>;
    fn remove_active(&mut self, id: RoundId) -> Result<(), StorageError>;
    fn append_history(&mut self, round: &Round) -> Result<(), StorageError>;
    /// Finished rounds whose end time falls on `date`, ordered by end time.
    /// Rounds with the same end time keep the order they were appended.
    fn list_history(&self, date: NaiveDate) -> Result<Vec<Round>, StorageError>;

    /// Move an ended round out of the active set and into history.
    fn finish_active(&mut self, round: &Round) -> Result<(), StorageError> {
        self.append_history(round)?;
        self.remove_active(round.id)
    }
}

impl<S: RoundStore + ?Sized> RoundStore for Box<S> {
    fn append_active(&mut self, round: &Round) -> Result<(), StorageError> {
        (**self).append_active(round)
    }

    fn list_active(&self) -> Result<Vec<Round>, StorageError> {
        (**self).list_active()
    }

    fn remove_active(&mut self, id: RoundId) -> Result<(), StorageError> {
        (**self).remove_active(id)
    }

    fn append_history(&mut self, round: &Round) -> Result<(), StorageError> {
        (**self).append_history(round)
    }

    fn list_history(&self, date: NaiveDate) -> Result<Vec<Round>, StorageError> {
        (**self).list_history(date)
    }

    fn finish_active(&mut self, round: &Round) -> Result<(), StorageError> {
        (**self).finish_active(round)
    }
}
