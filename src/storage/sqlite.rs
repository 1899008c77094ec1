use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};
use std::path::Path;
use tracing::debug;

use super::RoundStore;
use crate::error::StorageError;
use crate::model::{
    Busyness, DATE_FORMAT, Elapsed, GroupSize, Holes, Round, RoundAttributes, RoundId, TransportMode,
    format_timestamp, parse_timestamp,
};

const SCHEMA: [&str; 2] = [
    include_str!("../sql/schema/sqlite/00_active_round.sql"),
    include_str!("../sql/schema/sqlite/01_round_history.sql"),
];

const ACTIVE_COLUMNS: &str =
    "round_id, golfer_name, group_size, transport, holes, busyness, start_time, NULL, NULL";
const HISTORY_COLUMNS: &str =
    "round_id, golfer_name, group_size, transport, holes, busyness, start_time, end_time, elapsed";

/// Two tables in one sqlite file: `active_round` and `round_history`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema cannot be created
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema cannot be created
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(&SCHEMA.join("\n"))?;
        Ok(Self { conn })
    }

    fn query_rounds(
        &self,
        query: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Round>, StorageError> {
        let mut stmt = self.conn.prepare(query)?;
        let raw = stmt
            .query_map(params, RawRound::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawRound::into_round).collect()
    }
}

/// Column values as sqlite hands them back, before domain parsing.
struct RawRound {
    round_id: String,
    golfer_name: String,
    group_size: i64,
    transport: String,
    holes: Option<i64>,
    busyness: Option<String>,
    start_time: String,
    end_time: Option<String>,
    elapsed: Option<String>,
}

impl RawRound {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            round_id: row.get(0)?,
            golfer_name: row.get(1)?,
            group_size: row.get(2)?,
            transport: row.get(3)?,
            holes: row.get(4)?,
            busyness: row.get(5)?,
            start_time: row.get(6)?,
            end_time: row.get(7)?,
            elapsed: row.get(8)?,
        })
    }

    fn into_round(self) -> Result<Round, StorageError> {
        let location = format!("round {}", self.round_id);
        let corrupt = |e: crate::error::TrackerError| StorageError::corrupt(location.clone(), e.to_string());

        let group_size = u8::try_from(self.group_size)
            .map_err(|_| StorageError::corrupt(location.clone(), "group size out of range"))
            .and_then(|n| GroupSize::new(n).map_err(corrupt))?;
        let holes = self
            .holes
            .map(|h| h.to_string().parse::<Holes>())
            .transpose()
            .map_err(corrupt)?;
        let busyness = self
            .busyness
            .map(|b| b.parse::<Busyness>())
            .transpose()
            .map_err(corrupt)?;

        Ok(Round {
            id: self.round_id.parse::<RoundId>().map_err(corrupt)?,
            golfer_name: self.golfer_name,
            attributes: RoundAttributes {
                group_size,
                transport: self.transport.parse::<TransportMode>().map_err(corrupt)?,
                holes,
                busyness,
            },
            start_time: parse_timestamp(&self.start_time).map_err(corrupt)?,
            end_time: self
                .end_time
                .map(|t| parse_timestamp(&t))
                .transpose()
                .map_err(corrupt)?,
            elapsed: self
                .elapsed
                .map(|e| e.parse::<Elapsed>())
                .transpose()
                .map_err(corrupt)?,
        })
    }
}

impl RoundStore for SqliteStore {
    fn append_active(&mut self, round: &Round) -> Result<(), StorageError> {
        let attrs = &round.attributes;
        self.conn.execute(
            "INSERT INTO active_round (round_id, golfer_name, group_size, transport, holes, busyness, start_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                round.id.to_string(),
                round.golfer_name,
                attrs.group_size.get(),
                attrs.transport.as_str(),
                attrs.holes.map(Holes::count),
                attrs.busyness.map(Busyness::as_str),
                format_timestamp(&round.start_time),
            ],
        )?;
        debug!(id = %round.id, "inserted active_round row");
        Ok(())
    }

    fn list_active(&self) -> Result<Vec<Round>, StorageError> {
        self.query_rounds(
            &format!("SELECT {ACTIVE_COLUMNS} FROM active_round ORDER BY rowid"),
            &[],
        )
    }

    fn remove_active(&mut self, id: RoundId) -> Result<(), StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM active_round WHERE round_id = ?1",
            params![id.to_string()],
        )?;
        debug!(%id, removed, "deleted active_round row");
        Ok(())
    }

    fn append_history(&mut self, round: &Round) -> Result<(), StorageError> {
        insert_history(&self.conn, round)
    }

    fn list_history(&self, date: NaiveDate) -> Result<Vec<Round>, StorageError> {
        let day = date.format(DATE_FORMAT).to_string();
        self.query_rounds(
            &format!(
                "SELECT {HISTORY_COLUMNS} FROM round_history WHERE history_date = ?1 ORDER BY end_time, rowid"
            ),
            &[&day],
        )
    }

    /// Both statements commit together or not at all.
    fn finish_active(&mut self, round: &Round) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM active_round WHERE round_id = ?1",
            params![round.id.to_string()],
        )?;
        insert_history(&tx, round)?;
        tx.commit()?;
        debug!(id = %round.id, "moved round to round_history");
        Ok(())
    }
}

fn insert_history(conn: &Connection, round: &Round) -> Result<(), StorageError> {
    let (Some(end_time), Some(elapsed)) = (round.end_time, round.elapsed) else {
        return Err(StorageError::Other(format!(
            "round {} has not ended and cannot go into history",
            round.id
        )));
    };
    let attrs = &round.attributes;
    conn.execute(
        "INSERT INTO round_history (round_id, history_date, golfer_name, group_size, transport, holes, busyness, start_time, end_time, elapsed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            round.id.to_string(),
            round.history_date().format(DATE_FORMAT).to_string(),
            round.golfer_name,
            attrs.group_size.get(),
            attrs.transport.as_str(),
            attrs.holes.map(Holes::count),
            attrs.busyness.map(Busyness::as_str),
            format_timestamp(&round.start_time),
            format_timestamp(&end_time),
            elapsed.to_string(),
        ],
    )?;
    debug!(id = %round.id, "inserted round_history row");
    Ok(())
}
