//! Bounded snapshot history for the Vigia monitoring controller.
//!
//! This crate owns the controller's only persistent state: a fixed-capacity
//! circular buffer of sensor snapshots ([`HistoryRing`]) and the read-only
//! query surface over it ([`QueryEngine`]), which the HTTP-facing layer uses
//! to serve real-time snapshots and graphing series.
//!
//! The ring holds a fixed number of slots: capacity is set at construction,
//! appends never fail, and the oldest entry is silently overwritten once
//! the ring wraps.

pub mod query;
pub mod ring;

pub use query::{QueryEngine, SeriesPoint, SharedHistory};
pub use ring::HistoryRing;
