//! Eligibility rules and policies for allocation.
//!
//! An eligibility rule decides whether a worker may be assigned to the
//! slot currently being filled. The allocator takes a rule as a value, so
//! swapping policy never touches the scan loop.
//!
//! # Usage
//!
//! ```
//! use u_roster::eligibility::{EligibilityPolicy, rules};
//!
//! // Night-shift workers who are not yet committed elsewhere this run.
//! let policy = EligibilityPolicy::all()
//!     .with_rule(rules::LastShiftIs::night())
//!     .with_rule(rules::MaxCommitments(1));
//! ```

mod context;
mod policy;
pub mod rules;

pub use context::EligibilityContext;
pub use policy::{Combine, EligibilityPolicy};

use crate::models::Worker;
use std::fmt::Debug;

/// A predicate deciding whether a worker may be assigned right now.
///
/// Rules are pure: the same worker and context always give the same answer.
pub trait EligibilityRule: Send + Sync + Debug {
    /// Rule name (e.g., "LAST_SHIFT").
    fn name(&self) -> &'static str;

    /// Whether `worker` may be assigned in the given context.
    fn is_eligible(&self, worker: &Worker, context: &EligibilityContext<'_>) -> bool;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
