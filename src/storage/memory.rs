use chrono::NaiveDate;

use super::RoundStore;
use crate::error::StorageError;
use crate::model::{Round, RoundId};

/// Keeps everything in process; gone when the process exits.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    active: Vec<Round>,
    history: Vec<Round>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoundStore for MemoryStore {
    fn append_active(&mut self, round: &Round) -> Result<(), StorageError> {
        self.active.push(round.clone());
        Ok(())
    }

    fn list_active(&self) -> Result<Vec<Round>, StorageError> {
        Ok(self.active.clone())
    }

    fn remove_active(&mut self, id: RoundId) -> Result<(), StorageError> {
        self.active.retain(|r| r.id != id);
        Ok(())
    }

    fn append_history(&mut self, round: &Round) -> Result<(), StorageError> {
        self.history.push(round.clone());
        Ok(())
    }

    fn list_history(&self, date: NaiveDate) -> Result<Vec<Round>, StorageError> {
        let mut rounds: Vec<Round> = self
            .history
            .iter()
            .filter(|r| r.history_date() == date)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.end_time);
        Ok(rounds)
    }
}
