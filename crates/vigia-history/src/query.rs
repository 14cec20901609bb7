//! Read-only query surface over the shared history ring.
//!
//! The HTTP-facing layer (outside this workspace) consumes this module to
//! answer "current snapshot" and "graph series" requests. Both operations
//! are pure reads; the forced-sample variant of the snapshot endpoint lives
//! on the controller, which owns the sensors.

use crate::ring::HistoryRing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use vigia_core::{SensorKind, SensorSnapshot, constants::DEFAULT_SERIES_MAX_POINTS};

/// History ring shared between the sampling loop and query readers.
///
/// The append/read pair must be a single critical section so a reader never
/// observes a half-written snapshot; an async mutex is the single-owner
/// discipline the controller applies on an async host.
pub type SharedHistory = Arc<Mutex<HistoryRing>>;

/// One point of a graphing series: display timestamp plus projected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Snapshot timestamp, formatted for display (dd/mm/yyyy hh:mm:ss).
    pub timestamp: String,

    /// Projected sensor value (motion projects to 0/1).
    pub value: f64,
}

/// Read-only query engine over a shared history ring.
///
/// Cheap to clone; all clones read the same ring.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    history: SharedHistory,
}

impl QueryEngine {
    /// Create a query engine over an existing shared ring.
    pub fn new(history: SharedHistory) -> Self {
        Self { history }
    }

    /// The most recent snapshot, or `None` if nothing has been sampled yet.
    ///
    /// This is a pure read: it never triggers sampling. Callers that need
    /// the lazy-fill behavior use the controller's `snapshot()` instead.
    pub async fn latest(&self) -> Option<SensorSnapshot> {
        self.history.lock().await.latest().cloned()
    }

    /// Number of live entries in the ring.
    pub async fn len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Returns `true` if the ring has never been written.
    pub async fn is_empty(&self) -> bool {
        self.history.lock().await.is_empty()
    }

    /// Chronological series of one sensor channel for graphing.
    ///
    /// Iterates the ring oldest to newest, keeps snapshots matching the
    /// optional calendar-date filter, projects the requested channel, and
    /// truncates after `max_points` matches (default 300). Order is by
    /// insertion; values are never sorted.
    pub async fn series(
        &self,
        kind: SensorKind,
        date_filter: Option<NaiveDate>,
        max_points: Option<usize>,
    ) -> Vec<SeriesPoint> {
        let cap = max_points.unwrap_or(DEFAULT_SERIES_MAX_POINTS);
        let history = self.history.lock().await;
        history
            .iter_chronological()
            .filter(|snapshot| match date_filter {
                Some(date) => snapshot.timestamp.matches_date(date),
                None => true,
            })
            .take(cap)
            .map(|snapshot| SeriesPoint {
                timestamp: snapshot.timestamp.format(),
                value: snapshot.project(kind),
            })
            .collect()
    }
}
