//! Allocation coverage metrics (KPIs).
//!
//! Computes staffing indicators from a finished report.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | assigned / required over all slots |
//! | Unmet Slots | Slots below headcount |
//! | Total Shortfall | Sum of missing headcount |
//! | Load by Worker | Slots held per worker name |
//! | Load by Position | Slots taken during the run per pool position |
//! | Overbooked | Workers holding more than one slot |
//!
//! Worker names are not unique. The name-keyed metrics merge same-named
//! workers and include pre-assigned entries; the position-keyed metrics
//! count only assignments made by the run, one entry per pool worker.

use std::collections::BTreeMap;

use crate::models::AllocationReport;

/// Staffing coverage indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationKpi {
    /// Sum of required headcount.
    pub total_required: usize,
    /// Sum of assigned headcount (pre-assigned included).
    pub total_assigned: usize,
    /// `total_assigned / total_required` (1.0 when nothing is required).
    pub fill_rate: f64,
    /// Number of unmet slots.
    pub unmet_slots: usize,
    /// Sum of missing headcount.
    pub total_shortfall: usize,
    /// Slots held per worker name (same-named workers merged).
    pub load_by_worker: BTreeMap<String, usize>,
    /// Slots assigned during the run per pool position.
    pub load_by_position: BTreeMap<usize, usize>,
    /// Largest number of slots held under one name.
    pub max_load: usize,
    /// Names holding more than one slot, sorted.
    pub overbooked: Vec<String>,
    /// Pool positions assigned to more than one slot during the run, sorted.
    pub overbooked_positions: Vec<usize>,
}

impl AllocationKpi {
    /// Computes KPIs from a report.
    pub fn calculate(report: &AllocationReport) -> Self {
        let mut total_required = 0;
        let mut total_assigned = 0;
        let mut load_by_worker: BTreeMap<String, usize> = BTreeMap::new();
        let mut load_by_position: BTreeMap<usize, usize> = BTreeMap::new();

        for outcome in &report.slots {
            total_required += outcome.required;
            total_assigned += outcome.assigned.len();
            for assignee in &outcome.assigned {
                *load_by_worker.entry(assignee.name.clone()).or_default() += 1;
            }
            for &position in &outcome.contributors {
                *load_by_position.entry(position).or_default() += 1;
            }
        }

        let fill_rate = if total_required == 0 {
            1.0
        } else {
            total_assigned as f64 / total_required as f64
        };

        let max_load = load_by_worker.values().copied().max().unwrap_or(0);
        let overbooked = load_by_worker
            .iter()
            .filter(|(_, load)| **load > 1)
            .map(|(name, _)| name.clone())
            .collect();
        let overbooked_positions = load_by_position
            .iter()
            .filter(|(_, load)| **load > 1)
            .map(|(position, _)| *position)
            .collect();

        Self {
            total_required,
            total_assigned,
            fill_rate,
            unmet_slots: report.unmet.len(),
            total_shortfall: report.total_shortfall(),
            load_by_worker,
            load_by_position,
            max_load,
            overbooked,
            overbooked_positions,
        }
    }

    /// Whether the run reaches the given fill rate.
    pub fn meets_fill_rate(&self, min_fill_rate: f64) -> bool {
        self.fill_rate >= min_fill_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{Allocator, BookingPolicy};
    use crate::models::{Slot, Worker};

    fn night(name: &str) -> Worker {
        Worker::new(name, "GP", 1.0)
            .unwrap()
            .with_last_shift("night")
    }

    fn slots() -> Vec<Slot> {
        vec![
            Slot::new("08:00", "12:00", 2, "01-01-2025").unwrap(),
            Slot::new("12:00", "16:00", 2, "01-01-2025").unwrap(),
        ]
    }

    #[test]
    fn test_kpi_legacy_run() {
        let workers = vec![night("A"), night("B")];
        let report = Allocator::new().run(&workers, &mut slots());
        let kpi = AllocationKpi::calculate(&report);

        assert_eq!(kpi.total_required, 4);
        assert_eq!(kpi.total_assigned, 4);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.max_load, 2);
        assert_eq!(kpi.overbooked, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(kpi.overbooked_positions, vec![0, 1]);
        assert_eq!(kpi.load_by_position.get(&0), Some(&2));
    }

    #[test]
    fn test_kpi_same_name_workers_kept_apart() {
        let workers = vec![night("A"), night("A")];
        let report = Allocator::new()
            .with_booking(BookingPolicy::OncePerRun)
            .run(&workers, &mut slots());
        let kpi = AllocationKpi::calculate(&report);

        assert_eq!(kpi.total_assigned, 2);
        assert_eq!(kpi.overbooked, vec!["A".to_string()]);
        assert!(kpi.overbooked_positions.is_empty());
        assert_eq!(kpi.load_by_position.get(&0), Some(&1));
        assert_eq!(kpi.load_by_position.get(&1), Some(&1));
    }

    #[test]
    fn test_kpi_hardened_run() {
        let workers = vec![night("A"), night("B")];
        let report = Allocator::new()
            .with_booking(BookingPolicy::OncePerRun)
            .run(&workers, &mut slots());
        let kpi = AllocationKpi::calculate(&report);

        assert_eq!(kpi.total_assigned, 2);
        assert!((kpi.fill_rate - 0.5).abs() < 1e-10);
        assert_eq!(kpi.unmet_slots, 1);
        assert_eq!(kpi.total_shortfall, 2);
        assert!(kpi.overbooked.is_empty());
        assert!(kpi.meets_fill_rate(0.5));
        assert!(!kpi.meets_fill_rate(0.6));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = AllocationKpi::calculate(&AllocationReport::new());
        assert_eq!(kpi.total_required, 0);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.max_load, 0);
    }
}
