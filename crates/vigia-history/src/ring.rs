//! Fixed-capacity circular history of sensor snapshots.

use vigia_core::{Error, Result, SensorSnapshot};

/// Fixed-capacity circular buffer storing snapshots in chronological order.
///
/// The ring owns the eviction policy: `append` always succeeds and silently
/// overwrites the oldest live entry once the buffer has wrapped. There is no
/// backpressure and no failure mode.
///
/// Unwritten slots are `None`. The write cursor always points at the next
/// slot to be overwritten, which after wrap-around is the oldest live entry,
/// so chronological iteration simply starts at the cursor.
///
/// # Examples
///
/// ```
/// use vigia_history::HistoryRing;
///
/// let ring = HistoryRing::new(200).unwrap();
/// assert!(ring.is_empty());
/// assert_eq!(ring.capacity(), 200);
/// assert!(ring.latest().is_none());
/// ```
#[derive(Debug)]
pub struct HistoryRing {
    /// Snapshot slots; `None` marks a slot never written.
    slots: Vec<Option<SensorSnapshot>>,

    /// Index of the next slot to write (oldest live entry once wrapped).
    next_index: usize,

    /// Number of live entries (saturates at capacity).
    len: usize,
}

impl HistoryRing {
    /// Create an empty ring with the given capacity.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity { capacity });
        }
        Ok(Self {
            slots: vec![None; capacity],
            next_index: 0,
            len: 0,
        })
    }

    /// Append a snapshot, evicting the previous occupant of the slot.
    ///
    /// Always succeeds; overwrite is the eviction policy.
    pub fn append(&mut self, snapshot: SensorSnapshot) {
        self.slots[self.next_index] = Some(snapshot);
        self.next_index = (self.next_index + 1) % self.slots.len();
        if self.len < self.slots.len() {
            self.len += 1;
        }
    }

    /// The most recently appended snapshot, or `None` if nothing has ever
    /// been written.
    #[must_use]
    pub fn latest(&self) -> Option<&SensorSnapshot> {
        let capacity = self.slots.len();
        self.slots[(self.next_index + capacity - 1) % capacity].as_ref()
    }

    /// Iterate live snapshots oldest to newest.
    ///
    /// Produces a fresh, finite iterator per call; unwritten slots are
    /// skipped, so the total yielded length never exceeds the capacity.
    pub fn iter_chronological(&self) -> impl Iterator<Item = &SensorSnapshot> {
        let capacity = self.slots.len();
        (0..capacity).filter_map(move |offset| {
            self.slots[(self.next_index + offset) % capacity].as_ref()
        })
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has ever been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed slot capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigia_core::{CoverState, SampleTimestamp};

    fn snapshot(seq: u32) -> SensorSnapshot {
        // Encode the sequence number in the temperature so eviction order
        // is observable.
        SensorSnapshot {
            temperature: seq as f32,
            humidity: 50.0,
            gas_level: 100,
            moisture_percent: 30,
            motion_detected: false,
            cover_state: CoverState::Exterior,
            timestamp: SampleTimestamp::parse("10/05/2025 08:00:00").unwrap(),
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(HistoryRing::new(0).is_err());
    }

    #[test]
    fn test_empty_ring() {
        let ring = HistoryRing::new(8).unwrap();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert!(ring.latest().is_none());
        assert_eq!(ring.iter_chronological().count(), 0);
    }

    #[test]
    fn test_latest_tracks_each_append_below_capacity() {
        let mut ring = HistoryRing::new(5).unwrap();
        for seq in 0..5 {
            ring.append(snapshot(seq));
            assert_eq!(ring.latest().unwrap().temperature, seq as f32);
            assert_eq!(ring.len(), (seq + 1) as usize);
        }
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let capacity = 4;
        let mut ring = HistoryRing::new(capacity).unwrap();

        // capacity + 1 appends: the first entry must be gone.
        for seq in 0..=capacity as u32 {
            ring.append(snapshot(seq));
        }

        let values: Vec<f32> = ring
            .iter_chronological()
            .map(|s| s.temperature)
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ring.len(), capacity);
        assert_eq!(ring.latest().unwrap().temperature, capacity as f32);
    }

    #[test]
    fn test_chronological_order_after_many_wraps() {
        let mut ring = HistoryRing::new(3).unwrap();
        for seq in 0..10 {
            ring.append(snapshot(seq));
        }

        let values: Vec<f32> = ring
            .iter_chronological()
            .map(|s| s.temperature)
            .collect();
        assert_eq!(values, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_iterator_is_restartable() {
        let mut ring = HistoryRing::new(4).unwrap();
        ring.append(snapshot(0));
        ring.append(snapshot(1));

        let first: Vec<f32> = ring.iter_chronological().map(|s| s.temperature).collect();
        let second: Vec<f32> = ring.iter_chronological().map(|s| s.temperature).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![0.0, 1.0]);
    }

    #[test]
    fn test_partial_fill_skips_unwritten_slots() {
        let mut ring = HistoryRing::new(100).unwrap();
        ring.append(snapshot(0));
        ring.append(snapshot(1));
        ring.append(snapshot(2));

        assert_eq!(ring.iter_chronological().count(), 3);
        assert_eq!(ring.len(), 3);
    }
}
