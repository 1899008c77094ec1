use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::error::TrackerError;
use crate::model::{ActiveRoundView, Elapsed, Round, RoundAttributes, to_second};
use crate::storage::RoundStore;

/// Start/end state machine for rounds on top of a [`RoundStore`].
///
/// A golfer has at most one active round. Ending a round moves it from the
/// active collection into history; there is no way back.
pub struct RoundTracker<S> {
    store: S,
}

fn clean_name(name: &str) -> Result<&str, TrackerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::invalid("golfer name is required"));
    }
    Ok(name)
}

impl<S: RoundStore> RoundTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn find_active(&self, name: &str) -> Result<Option<Round>, TrackerError> {
        Ok(self
            .store
            .list_active()?
            .into_iter()
            .find(|r| r.golfer_name == name))
    }

    /// # Errors
    ///
    /// `InvalidInput` for a blank name, `DuplicateActiveRound` if the golfer is
    /// already out, `StorageUnavailable` if the store fails
    pub fn start_round(
        &mut self,
        name: &str,
        attributes: RoundAttributes,
        start_time: NaiveDateTime,
    ) -> Result<Round, TrackerError> {
        let name = clean_name(name)?;
        if self.find_active(name)?.is_some() {
            warn!(golfer = name, "rejected start: round already in progress");
            return Err(TrackerError::DuplicateActiveRound(name.to_string()));
        }

        let round = Round::begin(name.to_string(), attributes, to_second(start_time));
        self.store.append_active(&round)?;
        info!(
            golfer = %round.golfer_name,
            id = %round.id,
            players = %round.attributes.group_size,
            transport = %round.attributes.transport,
            start = %round.start_time,
            "round started"
        );
        Ok(round)
    }

    /// # Errors
    ///
    /// `InvalidInput` for a blank name, `NoActiveRound` if the golfer has no
    /// round in progress, `StorageUnavailable` if the store fails
    pub fn end_round(&mut self, name: &str, end_time: NaiveDateTime) -> Result<Round, TrackerError> {
        let name = clean_name(name)?;
        let Some(active) = self.find_active(name)? else {
            warn!(golfer = name, "rejected end: no round in progress");
            return Err(TrackerError::NoActiveRound(name.to_string()));
        };

        let end_time = to_second(end_time);
        let finished = active.finish(end_time);
        self.store.finish_active(&finished)?;
        info!(
            golfer = %finished.golfer_name,
            id = %finished.id,
            end = %end_time,
            elapsed = %finished.elapsed.unwrap_or_default(),
            "round ended"
        );
        Ok(finished)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store cannot be read
    pub fn list_active(&self) -> Result<Vec<Round>, TrackerError> {
        Ok(self.store.list_active()?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store cannot be read
    pub fn list_history(&self, date: NaiveDate) -> Result<Vec<Round>, TrackerError> {
        Ok(self.store.list_history(date)?)
    }

    /// Names that can currently be ended.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store cannot be read
    pub fn active_names(&self) -> Result<Vec<String>, TrackerError> {
        Ok(self
            .list_active()?
            .into_iter()
            .map(|r| r.golfer_name)
            .collect())
    }

    /// Live time on course for an active round. Not persisted.
    ///
    /// # Errors
    ///
    /// `NoActiveRound` if the golfer is not out, `StorageUnavailable` if the store fails
    pub fn elapsed_since(&self, name: &str, now: NaiveDateTime) -> Result<Elapsed, TrackerError> {
        let name = clean_name(name)?;
        self.find_active(name)?
            .map(|r| r.elapsed_at(now))
            .ok_or_else(|| TrackerError::NoActiveRound(name.to_string()))
    }

    /// Every active round with its live elapsed time and pace flag.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store cannot be read
    pub fn active_board(&self, now: NaiveDateTime) -> Result<Vec<ActiveRoundView>, TrackerError> {
        Ok(self
            .list_active()?
            .into_iter()
            .map(|r| ActiveRoundView::at(r, now))
            .collect())
    }
}
