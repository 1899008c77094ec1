pub mod args;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod model;
pub mod storage;
pub mod tracker;
pub mod view;

pub use error::{StorageError, TrackerError};
pub use tracker::RoundTracker;

pub const HTMX_PATH: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";

/// Swap error responses too, so rejected actions still show their status line.
pub const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":"...","swap":true}]}"#;
