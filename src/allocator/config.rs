//! Allocator configuration.
//!
//! Every field defaults to the legacy pass: fixed pool order and no limit
//! on how many slots one worker may take in a run. An empty JSON object
//! deserializes to that configuration.

use serde::{Deserialize, Serialize};

use crate::models::SlotId;

/// Order in which the worker pool is scanned for each slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Pool input order for every slot.
    #[default]
    Fixed,
    /// Slot `i` starts its scan at pool position `i mod n`.
    Rotating,
    /// Fewest slots held so far first; ties keep pool order.
    LeastLoaded,
    /// Pool shuffled per slot from a generator seeded once per run.
    Shuffled {
        /// Generator seed. The same seed yields the same run.
        seed: u64,
    },
}

/// How many slots one worker may take within a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPolicy {
    /// No limit; the same worker may fill any number of slots.
    #[default]
    Unlimited,
    /// At most one slot per worker.
    OncePerRun,
    /// At most `n` slots per worker.
    MaxSlots(usize),
    /// Never two slots on the same date with overlapping windows.
    ///
    /// Only same-date slots are compared and overnight windows are cut at
    /// midnight, so a 20:00-08:00 slot does not block an early slot on the
    /// next date.
    NoOverlap,
}

impl BookingPolicy {
    /// Whether a worker already holding `booked` may also take `slot`.
    pub fn permits(&self, booked: &[SlotId], slot: &SlotId) -> bool {
        match self {
            BookingPolicy::Unlimited => true,
            BookingPolicy::OncePerRun => booked.is_empty(),
            BookingPolicy::MaxSlots(n) => booked.len() < *n,
            BookingPolicy::NoOverlap => !booked.iter().any(|b| b.conflicts_with(slot)),
        }
    }
}

/// Allocation run settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Worker scan order.
    pub scan_order: ScanOrder,
    /// Per-worker booking limit.
    pub booking: BookingPolicy,
}

impl AllocatorConfig {
    /// The legacy configuration: fixed order, unlimited booking.
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Fixed order, one slot per worker per run.
    pub fn hardened() -> Self {
        Self {
            scan_order: ScanOrder::Fixed,
            booking: BookingPolicy::OncePerRun,
        }
    }

    /// Sets the scan order.
    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = scan_order;
        self
    }

    /// Sets the booking policy.
    pub fn with_booking(mut self, booking: BookingPolicy) -> Self {
        self.booking = booking;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn id(begin: &str, end: &str, date: &str) -> SlotId {
        Slot::new(begin, end, 1, date).unwrap().id
    }

    #[test]
    fn test_empty_json_is_legacy() {
        let config: AllocatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AllocatorConfig::legacy());
    }

    #[test]
    fn test_json_variants() {
        let config: AllocatorConfig = serde_json::from_str(
            r#"{"scan_order": {"shuffled": {"seed": 7}}, "booking": {"max_slots": 2}}"#,
        )
        .unwrap();
        assert_eq!(config.scan_order, ScanOrder::Shuffled { seed: 7 });
        assert_eq!(config.booking, BookingPolicy::MaxSlots(2));

        let config: AllocatorConfig =
            serde_json::from_str(r#"{"scan_order": "least_loaded", "booking": "once_per_run"}"#)
                .unwrap();
        assert_eq!(config.scan_order, ScanOrder::LeastLoaded);
        assert_eq!(config.booking, BookingPolicy::OncePerRun);
    }

    #[test]
    fn test_booking_permits() {
        let slot = id("10:00", "14:00", "01-01-2025");
        let held = [id("08:00", "12:00", "01-01-2025")];
        let elsewhere = [id("08:00", "12:00", "05-01-2025")];

        assert!(BookingPolicy::Unlimited.permits(&held, &slot));
        assert!(BookingPolicy::OncePerRun.permits(&[], &slot));
        assert!(!BookingPolicy::OncePerRun.permits(&elsewhere, &slot));
        assert!(BookingPolicy::MaxSlots(2).permits(&held, &slot));
        assert!(!BookingPolicy::MaxSlots(0).permits(&[], &slot));
        assert!(!BookingPolicy::NoOverlap.permits(&held, &slot));
        assert!(BookingPolicy::NoOverlap.permits(&elsewhere, &slot));
    }

    #[test]
    fn test_no_overlap_ignores_next_date_spill() {
        let night = [id("20:00", "08:00", "01-01-2025")];
        assert!(BookingPolicy::NoOverlap.permits(&night, &id("06:00", "09:00", "02-01-2025")));
        assert!(!BookingPolicy::NoOverlap.permits(&night, &id("22:00", "23:00", "01-01-2025")));
    }

    #[test]
    fn test_builders() {
        let config = AllocatorConfig::hardened().with_scan_order(ScanOrder::Rotating);
        assert_eq!(config.booking, BookingPolicy::OncePerRun);
        assert_eq!(config.scan_order, ScanOrder::Rotating);
    }
}
