use tokio::sync::Mutex;

use crate::storage::RoundStore;
use crate::tracker::RoundTracker;

pub type SharedTracker = Mutex<RoundTracker<Box<dyn RoundStore>>>;

/// Everything the handlers share. Created once at startup and handed to
/// actix as `web::Data`; every request locks the tracker for one operation.
pub struct AppState {
    pub tracker: SharedTracker,
    pub refresh_secs: u64,
}

impl AppState {
    #[must_use]
    pub fn new(store: Box<dyn RoundStore>, refresh_secs: u64) -> Self {
        Self {
            tracker: Mutex::new(RoundTracker::new(store)),
            refresh_secs,
        }
    }
}
