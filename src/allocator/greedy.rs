//! Greedy first-come-first-served allocator.
//!
//! # Algorithm
//!
//! 1. Take slots in input order (no sorting by date or urgency).
//! 2. For each slot, scan the worker pool in the configured order.
//! 3. Offer each worker to the slot: an assignment keeps the scan going,
//!    an ineligible worker is skipped, a full slot ends the scan.
//! 4. A slot still open after a full scan is recorded as unmet.
//!
//! Booking limits are folded into eligibility: a worker at its limit is
//! ineligible for the slot and the scan moves on.
//!
//! # Complexity
//! O(s * w) offers where s=slots, w=workers (plus O(w log w) per slot for
//! `LeastLoaded`).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

use super::{AllocatorConfig, BookingPolicy, ScanOrder};
use crate::eligibility::rules::LastShiftIs;
use crate::eligibility::{EligibilityContext, EligibilityRule};
use crate::models::{
    AllocationReport, AssignmentOutcome, Rejection, Slot, SlotId, SlotOutcome, UnmetSlot, Worker,
};

/// Deterministic greedy allocator.
///
/// Holds only configuration and the eligibility rule; workers and slots
/// are borrowed for the duration of one run. The same inputs and
/// configuration always produce the same report.
///
/// # Example
///
/// ```
/// use u_roster::allocator::Allocator;
/// use u_roster::models::{Slot, Worker};
///
/// let workers = vec![
///     Worker::new("A", "GP", 1.0).unwrap().with_last_shift("night"),
///     Worker::new("B", "GP", 1.0).unwrap().with_last_shift("day"),
/// ];
/// let mut slots = vec![Slot::new("08:00", "12:00", 2, "07-03-2025").unwrap()];
///
/// let report = Allocator::new().run(&workers, &mut slots);
/// assert_eq!(report.slots[0].assigned.len(), 1);
/// assert_eq!(report.unmet[0].shortfall, 1);
/// ```
#[derive(Clone)]
pub struct Allocator {
    config: AllocatorConfig,
    rule: Arc<dyn EligibilityRule>,
}

impl Allocator {
    /// Creates an allocator with the legacy configuration and the
    /// night-shift eligibility rule.
    pub fn new() -> Self {
        Self {
            config: AllocatorConfig::default(),
            rule: Arc::new(LastShiftIs::night()),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the scan order.
    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.config.scan_order = scan_order;
        self
    }

    /// Sets the booking policy.
    pub fn with_booking(mut self, booking: BookingPolicy) -> Self {
        self.config.booking = booking;
        self
    }

    /// Sets the eligibility rule.
    pub fn with_rule<R: EligibilityRule + 'static>(mut self, rule: R) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    /// Sets a shared eligibility rule.
    pub fn with_shared_rule(mut self, rule: Arc<dyn EligibilityRule>) -> Self {
        self.rule = rule;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Runs one allocation pass.
    ///
    /// Slots are filled in place; the report captures their final state
    /// along with the unmet ones.
    pub fn run(&self, workers: &[Worker], slots: &mut [Slot]) -> AllocationReport {
        let _span = tracing::info_span!(
            "allocation_run",
            slots = slots.len(),
            workers = workers.len()
        )
        .entered();

        let mut report = AllocationReport::new();
        let mut booked: Vec<Vec<SlotId>> = vec![Vec::new(); workers.len()];
        let mut rng = match self.config.scan_order {
            ScanOrder::Shuffled { seed } => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };

        for (slot_index, slot) in slots.iter_mut().enumerate() {
            let slot_id = slot.id;
            let order = self.scan_order(slot_index, &booked, rng.as_mut());
            let mut contributors = Vec::new();

            for pool_index in order {
                let worker = &workers[pool_index];
                let context = EligibilityContext::for_slot(&slot_id)
                    .with_pool_index(pool_index)
                    .with_booked(&booked[pool_index]);

                let outcome = slot.offer(worker, || {
                    self.config.booking.permits(context.booked, &slot_id)
                        && self.rule.is_eligible(worker, &context)
                });

                match outcome {
                    AssignmentOutcome::Assigned => {
                        tracing::debug!(
                            slot = %slot_id,
                            worker = %worker.name,
                            pool_index,
                            "assigned worker"
                        );
                        contributors.push(pool_index);
                        booked[pool_index].push(slot_id);
                    }
                    AssignmentOutcome::Rejected(Rejection::SlotFull) => break,
                    AssignmentOutcome::Rejected(Rejection::Ineligible) => {}
                }
            }

            if !slot.is_full() {
                tracing::warn!(
                    slot = %slot_id,
                    required = slot.required,
                    assigned = slot.assigned.len(),
                    shortfall = slot.remaining(),
                    "slot left unmet"
                );
                report.add_unmet(UnmetSlot::from_slot(slot_index, slot));
            }
            report.add_outcome(SlotOutcome::from_slot(slot, contributors));
        }

        tracing::info!(
            slots = report.slots.len(),
            unmet = report.unmet.len(),
            shortfall = report.total_shortfall(),
            "allocation run finished"
        );
        report
    }

    /// Pool positions in the order they are offered to slot `slot_index`.
    fn scan_order(
        &self,
        slot_index: usize,
        booked: &[Vec<SlotId>],
        rng: Option<&mut StdRng>,
    ) -> Vec<usize> {
        let pool_len = booked.len();
        let mut order: Vec<usize> = (0..pool_len).collect();

        match self.config.scan_order {
            ScanOrder::Fixed => {}
            ScanOrder::Rotating => {
                if pool_len > 0 {
                    order.rotate_left(slot_index % pool_len);
                }
            }
            ScanOrder::LeastLoaded => {
                // sort_by_key is stable: ties keep pool order
                order.sort_by_key(|&i| booked[i].len());
            }
            ScanOrder::Shuffled { .. } => {
                if let Some(rng) = rng {
                    order.shuffle(rng);
                }
            }
        }

        order
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocator")
            .field("config", &self.config)
            .field("rule", &self.rule.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{rules, EligibilityPolicy};
    use crate::models::Assignee;

    fn make_worker(name: &str, last_shift: &str) -> Worker {
        Worker::new(name, "GP", 1.0)
            .unwrap()
            .with_last_shift(last_shift)
    }

    fn make_slot(required: usize, date: &str) -> Slot {
        Slot::new("08:00", "12:00", required, date).unwrap()
    }

    fn names(report: &AllocationReport, slot: usize) -> Vec<&str> {
        report.slots[slot]
            .assigned
            .iter()
            .map(|a| a.name.as_str())
            .collect()
    }

    #[test]
    fn test_skips_ineligible_and_fills() {
        let workers = vec![
            make_worker("A", "night"),
            make_worker("B", "day"),
            make_worker("C", "night"),
        ];
        let mut slots = vec![make_slot(2, "01-01-2025")];

        let report = Allocator::new().run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["A", "C"]);
        assert_eq!(report.slots[0].contributors, vec![0, 2]);
        assert!(slots[0].is_full());
        assert!(report.is_complete());
    }

    #[test]
    fn test_pool_exhausted_marks_unmet() {
        let workers = vec![make_worker("A", "night"), make_worker("B", "night")];
        let mut slots = vec![make_slot(3, "01-01-2025")];

        let report = Allocator::new().run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["A", "B"]);
        assert_eq!(report.unmet.len(), 1);
        assert_eq!(report.unmet[0].index, 0);
        assert_eq!(report.unmet[0].shortfall, 1);
    }

    #[test]
    fn test_legacy_double_booking() {
        let workers = vec![make_worker("W", "night")];
        let mut slots = vec![make_slot(1, "01-01-2025"), make_slot(1, "02-01-2025")];

        let report = Allocator::new().run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["W"]);
        assert_eq!(names(&report, 1), vec!["W"]);
        assert!(report.is_complete());
        assert_eq!(report.slots_for_worker("W").len(), 2);
    }

    #[test]
    fn test_once_per_run_leaves_second_slot_unmet() {
        let workers = vec![make_worker("W", "night")];
        let mut slots = vec![make_slot(1, "01-01-2025"), make_slot(1, "02-01-2025")];

        let report = Allocator::new()
            .with_booking(BookingPolicy::OncePerRun)
            .run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["W"]);
        assert!(report.slots[1].assigned.is_empty());
        assert_eq!(report.unmet_ids(), vec![slots[1].id]);
    }

    #[test]
    fn test_max_slots_policy() {
        let workers = vec![make_worker("W", "night")];
        let mut slots = vec![
            make_slot(1, "01-01-2025"),
            make_slot(1, "02-01-2025"),
            make_slot(1, "03-01-2025"),
        ];

        let report = Allocator::new()
            .with_booking(BookingPolicy::MaxSlots(2))
            .run(&workers, &mut slots);

        assert_eq!(report.slots_for_worker("W").len(), 2);
        assert!(report.is_unmet(2));
    }

    #[test]
    fn test_no_overlap_policy() {
        let workers = vec![make_worker("W", "night"), make_worker("V", "night")];
        let mut slots = vec![
            Slot::new("08:00", "12:00", 1, "01-01-2025").unwrap(),
            Slot::new("10:00", "14:00", 1, "01-01-2025").unwrap(),
            Slot::new("08:00", "12:00", 1, "02-01-2025").unwrap(),
        ];

        let report = Allocator::new()
            .with_booking(BookingPolicy::NoOverlap)
            .run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["W"]);
        assert_eq!(names(&report, 1), vec!["V"]);
        assert_eq!(names(&report, 2), vec!["W"]);
        assert!(report.is_complete());
    }

    #[test]
    fn test_empty_pool() {
        let mut slots = vec![make_slot(1, "01-01-2025"), make_slot(2, "02-01-2025")];
        let report = Allocator::new().run(&[], &mut slots);

        assert_eq!(report.unmet.len(), 2);
        assert!(report.slots.iter().all(|s| s.assigned.is_empty()));
        assert_eq!(report.total_shortfall(), 3);
    }

    #[test]
    fn test_zero_headcount_never_unmet() {
        let workers = vec![make_worker("A", "night")];
        let mut slots = vec![make_slot(0, "01-01-2025")];

        let report = Allocator::new().run(&workers, &mut slots);
        assert!(report.is_complete());
        assert!(report.slots[0].assigned.is_empty());

        let report = Allocator::new().run(&[], &mut [make_slot(0, "01-01-2025")]);
        assert!(report.is_complete());
    }

    #[test]
    fn test_preassigned_counts_toward_headcount() {
        let workers = vec![make_worker("A", "night"), make_worker("B", "night")];
        let mut slots = vec![make_slot(2, "01-01-2025")
            .with_initial_assigned(vec![Assignee::new("X", "GP")])
            .unwrap()];

        let report = Allocator::new().run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["X", "A"]);
        assert_eq!(report.slots[0].contributors, vec![0]);
        assert_eq!(report.assignment_count(), 1);
    }

    #[test]
    fn test_injected_rule() {
        let workers = vec![
            Worker::new("A", "ER", 1.0).unwrap().with_last_shift("day"),
            Worker::new("B", "GP", 1.0).unwrap().with_last_shift("day"),
        ];
        let mut slots = vec![make_slot(1, "01-01-2025")];

        let report = Allocator::new()
            .with_rule(rules::HasQualification::new("GP"))
            .run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["B"]);
    }

    #[test]
    fn test_rule_sees_commitments() {
        let workers = vec![make_worker("A", "night"), make_worker("B", "night")];
        let mut slots = vec![make_slot(1, "01-01-2025"), make_slot(1, "02-01-2025")];

        let policy = EligibilityPolicy::all()
            .with_rule(rules::LastShiftIs::night())
            .with_rule(rules::MaxCommitments(1));
        let report = Allocator::new().with_rule(policy).run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["A"]);
        assert_eq!(names(&report, 1), vec!["B"]);
    }

    #[test]
    fn test_rotating_order() {
        let workers = vec![
            make_worker("A", "night"),
            make_worker("B", "night"),
            make_worker("C", "night"),
        ];
        let mut slots = vec![
            make_slot(1, "01-01-2025"),
            make_slot(1, "02-01-2025"),
            make_slot(1, "03-01-2025"),
            make_slot(1, "04-01-2025"),
        ];

        let report = Allocator::new()
            .with_scan_order(ScanOrder::Rotating)
            .run(&workers, &mut slots);

        let firsts: Vec<&str> = (0..4).map(|i| names(&report, i)[0]).collect();
        assert_eq!(firsts, vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_least_loaded_order() {
        let workers = vec![make_worker("A", "night"), make_worker("B", "night")];
        let mut slots = vec![
            make_slot(1, "01-01-2025"),
            make_slot(1, "02-01-2025"),
            make_slot(2, "03-01-2025"),
        ];

        let report = Allocator::new()
            .with_scan_order(ScanOrder::LeastLoaded)
            .run(&workers, &mut slots);

        assert_eq!(names(&report, 0), vec!["A"]);
        assert_eq!(names(&report, 1), vec!["B"]);
        // both hold one slot: tie keeps pool order
        assert_eq!(names(&report, 2), vec!["A", "B"]);
    }

    #[test]
    fn test_shuffled_is_deterministic_per_seed() {
        let workers: Vec<Worker> = (0..8)
            .map(|i| make_worker(&format!("W{i}"), "night"))
            .collect();
        let make_slots = || -> Vec<Slot> {
            (1..=5)
                .map(|d| make_slot(2, &format!("{d:02}-01-2025")))
                .collect()
        };

        let allocator = Allocator::new().with_scan_order(ScanOrder::Shuffled { seed: 42 });
        let a = allocator.run(&workers, &mut make_slots());
        let b = allocator.run(&workers, &mut make_slots());

        assert_eq!(a, b);
        assert!(a.is_complete());
        for outcome in &a.slots {
            let mut c = outcome.contributors.clone();
            c.dedup();
            assert_eq!(c.len(), 2);
        }
    }

    #[test]
    fn test_run_is_deterministic() {
        let workers = vec![
            make_worker("A", "night"),
            make_worker("B", "day"),
            make_worker("C", "night"),
        ];
        let make_slots = || vec![make_slot(2, "01-01-2025"), make_slot(3, "02-01-2025")];

        let allocator = Allocator::new();
        let first = allocator.run(&workers, &mut make_slots());
        let second = allocator.run(&workers, &mut make_slots());

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_capacity_and_eligibility_invariants() {
        let workers: Vec<Worker> = (0..10)
            .map(|i| make_worker(&format!("W{i}"), if i % 3 == 0 { "day" } else { "night" }))
            .collect();
        let mut slots: Vec<Slot> = (0..6)
            .map(|i| make_slot(i, &format!("{:02}-02-2025", i + 1)))
            .collect();

        for order in [
            ScanOrder::Fixed,
            ScanOrder::Rotating,
            ScanOrder::LeastLoaded,
            ScanOrder::Shuffled { seed: 3 },
        ] {
            let mut run_slots = slots.clone();
            let report = Allocator::new()
                .with_scan_order(order)
                .run(&workers, &mut run_slots);

            for (i, outcome) in report.slots.iter().enumerate() {
                assert!(outcome.assigned.len() <= outcome.required);
                assert!(outcome
                    .contributors
                    .iter()
                    .all(|&p| workers[p].is_eligible()));
                assert_eq!(report.is_unmet(i), outcome.assigned.len() < outcome.required);
            }
        }

        let report = Allocator::new().run(&workers, &mut slots);
        assert!(report.is_complete());
    }

    #[test]
    fn test_debug_shows_rule() {
        let text = format!("{:?}", Allocator::new());
        assert!(text.contains("LAST_SHIFT"));
    }
}
