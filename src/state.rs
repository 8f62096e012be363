use std::sync::Mutex;

use crate::cache::SnapshotCache;
use crate::config::AppConfig;
use crate::services::listing::ListSelection;
use crate::services::upstream::BookingApi;
use crate::services::watermark::WatermarkStore;
use crate::services::workflow::DialogRegistry;

/// Remembered search and page per list, so a search submitted on one
/// request still scopes the export downloaded on the next.
#[derive(Default)]
pub struct Selections {
    pub astrologers: ListSelection,
    pub bookings: ListSelection,
    pub call_requests: ListSelection,
}

pub struct AppState {
    pub config: AppConfig,
    pub api: Box<dyn BookingApi>,
    pub cache: SnapshotCache,
    pub selections: Mutex<Selections>,
    pub dialogs: DialogRegistry,
    pub watermark: Box<dyn WatermarkStore>,
}
