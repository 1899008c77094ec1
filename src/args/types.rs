use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::args::validation::{parse_date, parse_group_size, parse_manual_time, parse_refresh_secs};
use crate::model::{Busyness, GroupSize, Holes, ManualTime, TransportMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    /// Keep rounds in process memory only
    Memory,
    /// Plain text files, one history file per day
    TextLog,
    /// A sqlite database file
    Sqlite,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Memory => "memory",
            StoreKind::TextLog => "text-log",
            StoreKind::Sqlite => "sqlite",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    Cart,
    Walking,
}

impl From<TransportArg> for TransportMode {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Cart => TransportMode::Cart,
            TransportArg::Walking => TransportMode::Walking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HolesArg {
    #[value(name = "9")]
    Nine,
    #[value(name = "18")]
    Eighteen,
}

impl From<HolesArg> for Holes {
    fn from(value: HolesArg) -> Self {
        match value {
            HolesArg::Nine => Holes::Nine,
            HolesArg::Eighteen => Holes::Eighteen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BusynessArg {
    Light,
    Moderate,
    Heavy,
}

impl From<BusynessArg> for Busyness {
    fn from(value: BusynessArg) -> Self {
        match value {
            BusynessArg::Light => Busyness::Light,
            BusynessArg::Moderate => Busyness::Moderate,
            BusynessArg::Heavy => Busyness::Heavy,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Track golf rounds from first tee to last putt", long_about = None)]
pub struct Cli {
    /// Optional TOML file; command-line flags win over its values
    #[arg(long, value_name = "CONFIG_TOML", global = true)]
    pub config: Option<PathBuf>,
    /// Where rounds are kept
    #[arg(long, value_enum, global = true)]
    pub store: Option<StoreKind>,
    /// Directory for the text-log store
    #[arg(long, value_name = "LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
    /// Database file for the sqlite store
    #[arg(long, value_name = "DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web dashboard (default)
    Serve(ServeArgs),
    /// Start a round for a golfer
    Start(StartArgs),
    /// End a golfer's round
    End(EndArgs),
    /// Show who is on the course
    Active,
    /// Show finished rounds for a day
    History(HistoryArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to listen on, e.g. 127.0.0.1:8081
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
    /// Seconds between dashboard refreshes
    #[arg(long, value_name = "SECS", value_parser = parse_refresh_secs)]
    pub refresh_secs: Option<u64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StartArgs {
    #[arg(short, long)]
    pub name: String,
    /// Players in the group, 1 to 6
    #[arg(short, long, default_value = "1", value_parser = parse_group_size)]
    pub players: GroupSize,
    #[arg(short, long, value_enum, default_value = "cart")]
    pub transport: TransportArg,
    #[arg(long, value_enum)]
    pub holes: Option<HolesArg>,
    #[arg(long, value_enum)]
    pub busyness: Option<BusynessArg>,
    /// Start time today, e.g. "9:30 AM"; defaults to now
    #[arg(long, value_name = "TIME", value_parser = parse_manual_time)]
    pub at: Option<ManualTime>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EndArgs {
    #[arg(short, long)]
    pub name: String,
    /// End time today, e.g. "11:30 AM"; defaults to now
    #[arg(long, value_name = "TIME", value_parser = parse_manual_time)]
    pub at: Option<ManualTime>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HistoryArgs {
    /// Day to show, YYYY-MM-DD; defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    /// Print CSV instead of summary lines
    #[arg(long)]
    pub csv: bool,
}
