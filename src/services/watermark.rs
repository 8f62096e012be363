use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDateTime;

/// Where the notification digest remembers the newest booking the admin
/// has already seen. Advancing is monotonic: the watermark never moves
/// backwards, so stale snapshots cannot resurrect old notifications.
pub trait WatermarkStore: Send + Sync {
    fn last_seen(&self) -> Option<NaiveDateTime>;
    fn advance(&self, to: NaiveDateTime);
}

/// Flat-file watermark, stored as epoch milliseconds. Read failures mean
/// "never seen anything"; write failures are logged and swallowed, the
/// digest just stays loud until a later write succeeds.
pub struct FileWatermark {
    path: PathBuf,
}

impl FileWatermark {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WatermarkStore for FileWatermark {
    fn last_seen(&self) -> Option<NaiveDateTime> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let millis: i64 = raw.trim().parse().ok()?;
        chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
    }

    fn advance(&self, to: NaiveDateTime) {
        let next = self.last_seen().map_or(to, |current| current.max(to));
        let millis = next.and_utc().timestamp_millis();
        if let Err(e) = std::fs::write(&self.path, millis.to_string()) {
            tracing::error!(error = %e, path = %self.path.display(), "failed to persist notification watermark");
        }
    }
}

/// In-memory watermark for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryWatermark {
    inner: Mutex<Option<NaiveDateTime>>,
}

impl WatermarkStore for MemoryWatermark {
    fn last_seen(&self) -> Option<NaiveDateTime> {
        *self.inner.lock().unwrap()
    }

    fn advance(&self, to: NaiveDateTime) {
        let mut inner = self.inner.lock().unwrap();
        *inner = Some(inner.map_or(to, |current| current.max(to)));
    }
}
