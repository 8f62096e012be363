use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::models::{Astrologer, Booking, CallRequest, EntityKind, Expertise};
use crate::services::upstream::BookingApi;

struct Snapshot<T> {
    rows: Arc<Vec<T>>,
    fetched_at: Instant,
}

/// Periodically revalidated copies of the remote lists. A snapshot is
/// served as-is until it ages past the revalidation interval, then the
/// next read refetches; a mutation drops the affected snapshot so the
/// next read is current. Concurrent misses may fetch twice, which is
/// harmless: last write wins and both see consistent data.
pub struct SnapshotCache {
    ttl: Duration,
    astrologers: Mutex<Option<Snapshot<Astrologer>>>,
    expertise: Mutex<Option<Snapshot<Expertise>>>,
    bookings: Mutex<Option<Snapshot<Booking>>>,
    call_requests: Mutex<Option<Snapshot<CallRequest>>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            astrologers: Mutex::new(None),
            expertise: Mutex::new(None),
            bookings: Mutex::new(None),
            call_requests: Mutex::new(None),
        }
    }

    fn fresh<T>(slot: &Mutex<Option<Snapshot<T>>>, ttl: Duration) -> Option<Arc<Vec<T>>> {
        let guard = slot.lock().unwrap();
        guard
            .as_ref()
            .filter(|snapshot| snapshot.fetched_at.elapsed() < ttl)
            .map(|snapshot| Arc::clone(&snapshot.rows))
    }

    fn store<T>(slot: &Mutex<Option<Snapshot<T>>>, rows: Arc<Vec<T>>) {
        *slot.lock().unwrap() = Some(Snapshot {
            rows,
            fetched_at: Instant::now(),
        });
    }

    pub async fn astrologers(&self, api: &dyn BookingApi) -> Arc<Vec<Astrologer>> {
        if let Some(rows) = Self::fresh(&self.astrologers, self.ttl) {
            return rows;
        }
        let rows = Arc::new(api.fetch_astrologers().await);
        Self::store(&self.astrologers, Arc::clone(&rows));
        rows
    }

    pub async fn expertise(&self, api: &dyn BookingApi) -> Arc<Vec<Expertise>> {
        if let Some(rows) = Self::fresh(&self.expertise, self.ttl) {
            return rows;
        }
        let rows = Arc::new(api.fetch_expertise().await);
        Self::store(&self.expertise, Arc::clone(&rows));
        rows
    }

    pub async fn bookings(&self, api: &dyn BookingApi) -> Arc<Vec<Booking>> {
        if let Some(rows) = Self::fresh(&self.bookings, self.ttl) {
            return rows;
        }
        let rows = Arc::new(api.fetch_bookings().await);
        Self::store(&self.bookings, Arc::clone(&rows));
        rows
    }

    pub async fn call_requests(&self, api: &dyn BookingApi) -> Arc<Vec<CallRequest>> {
        if let Some(rows) = Self::fresh(&self.call_requests, self.ttl) {
            return rows;
        }
        let rows = Arc::new(api.fetch_call_requests().await);
        Self::store(&self.call_requests, Arc::clone(&rows));
        rows
    }

    /// Drop the snapshot a mutation touched. The astrologer form also
    /// consumes the expertise list, so both fall together.
    pub fn invalidate(&self, kind: EntityKind) {
        tracing::debug!(kind = kind.as_str(), "dropping snapshot");
        match kind {
            EntityKind::Astrologers => {
                *self.astrologers.lock().unwrap() = None;
                *self.expertise.lock().unwrap() = None;
            }
            EntityKind::Bookings => {
                *self.bookings.lock().unwrap() = None;
            }
            EntityKind::CallRequests => {
                *self.call_requests.lock().unwrap() = None;
            }
        }
    }
}
