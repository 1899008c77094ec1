use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::RoundStore;
use crate::error::StorageError;
use crate::model::{
    Busyness, DATE_FORMAT, Elapsed, GroupSize, Holes, Round, RoundAttributes, RoundId,
    TransportMode, format_timestamp, parse_timestamp,
};

const SEPARATOR: &str = " | ";
const ABSENT: &str = "-";
const FIELD_COUNT: usize = 10;
pub const ACTIVE_FILE: &str = "active_rounds.txt";
/// Staging file for the active set, renamed over [`ACTIVE_FILE`] once written.
pub const ACTIVE_STAGING_FILE: &str = "active_rounds.txt.tmp";

/// Plain text files in one directory: the active set in `active_rounds.txt`,
/// finished rounds appended to `golf_rounds_YYYY-MM-DD.txt` for the day they ended.
///
/// Line layout:
/// `date | id | name | group_size | transport | holes | busyness | start | end | elapsed`
#[derive(Debug, Clone)]
pub struct TextLogStore {
    dir: PathBuf,
}

impl TextLogStore {
    /// # Errors
    ///
    /// Will return `Err` if the directory cannot be created
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(ACTIVE_FILE)
    }

    #[must_use]
    pub fn history_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("golf_rounds_{}.txt", date.format(DATE_FORMAT)))
    }

    fn append_line(path: &Path, line: &str) -> Result<(), StorageError> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;
        debug!(path = %path.display(), "appended round record");
        Ok(())
    }

    fn read_rounds(path: &Path) -> Result<Vec<Round>, StorageError> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                decode_line(line).map_err(|reason| {
                    StorageError::corrupt(format!("{}:{}", path.display(), idx + 1), reason)
                })
            })
            .collect()
    }
}

impl RoundStore for TextLogStore {
    fn append_active(&mut self, round: &Round) -> Result<(), StorageError> {
        Self::append_line(&self.active_path(), &encode_line(round)?)
    }

    fn list_active(&self) -> Result<Vec<Round>, StorageError> {
        Self::read_rounds(&self.active_path())
    }

    fn remove_active(&mut self, id: RoundId) -> Result<(), StorageError> {
        let path = self.active_path();
        let remaining: Vec<Round> = Self::read_rounds(&path)?
            .into_iter()
            .filter(|r| r.id != id)
            .collect();
        let mut body = String::new();
        for round in &remaining {
            body.push_str(&encode_line(round)?);
            body.push('\n');
        }
        let staged = self.dir.join(ACTIVE_STAGING_FILE);
        fs::write(&staged, body)?;
        fs::rename(&staged, &path)?;
        debug!(path = %path.display(), %id, "rewrote active rounds");
        Ok(())
    }

    fn append_history(&mut self, round: &Round) -> Result<(), StorageError> {
        Self::append_line(&self.history_path(round.history_date()), &encode_line(round)?)
    }

    fn list_history(&self, date: NaiveDate) -> Result<Vec<Round>, StorageError> {
        let mut rounds: Vec<Round> = Self::read_rounds(&self.history_path(date))?
            .into_iter()
            .filter(|r| r.history_date() == date)
            .collect();
        rounds.sort_by_key(|r| r.end_time);
        Ok(rounds)
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

/// # Errors
///
/// Will return `Err` if the golfer name would break the line layout
pub fn encode_line(round: &Round) -> Result<String, StorageError> {
    if round.golfer_name.contains('|') || round.golfer_name.contains(['\n', '\r']) {
        return Err(StorageError::Other(format!(
            "golfer name '{}' cannot be stored in a text log",
            round.golfer_name.escape_debug()
        )));
    }
    let attrs = &round.attributes;
    let fields = [
        round.history_date().format(DATE_FORMAT).to_string(),
        round.id.to_string(),
        round.golfer_name.clone(),
        attrs.group_size.to_string(),
        attrs.transport.to_string(),
        optional(attrs.holes),
        optional(attrs.busyness),
        format_timestamp(&round.start_time),
        optional(round.end_time.as_ref().map(format_timestamp)),
        optional(round.elapsed),
    ];
    Ok(fields.join(SEPARATOR))
}

/// # Errors
///
/// Will return `Err` with a description of the first field that does not parse
pub fn decode_line(line: &str) -> Result<Round, String> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!("expected {FIELD_COUNT} fields, found {}", fields.len()));
    }
    let present = |s: &str| if s.trim() == ABSENT { None } else { Some(s.trim().to_string()) };

    let id: RoundId = fields[1].parse().map_err(|e| format!("{e}"))?;
    let group_size: GroupSize = fields[3].parse().map_err(|e| format!("{e}"))?;
    let transport: TransportMode = fields[4].parse().map_err(|e| format!("{e}"))?;
    let holes = present(fields[5])
        .map(|s| s.parse::<Holes>())
        .transpose()
        .map_err(|e| format!("{e}"))?;
    let busyness = present(fields[6])
        .map(|s| s.parse::<Busyness>())
        .transpose()
        .map_err(|e| format!("{e}"))?;
    let start_time = parse_timestamp(fields[7]).map_err(|e| format!("{e}"))?;
    let end_time = present(fields[8])
        .map(|s| parse_timestamp(&s))
        .transpose()
        .map_err(|e| format!("{e}"))?;
    let elapsed = present(fields[9])
        .map(|s| s.parse::<Elapsed>())
        .transpose()
        .map_err(|e| format!("{e}"))?;

    Ok(Round {
        id,
        golfer_name: fields[2].to_string(),
        attributes: RoundAttributes {
            group_size,
            transport,
            holes,
            busyness,
        },
        start_time,
        end_time,
        elapsed,
    })
}
