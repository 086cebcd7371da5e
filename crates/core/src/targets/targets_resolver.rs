//! Target status resolver.
//!
//! The stored status of a target is a cache of a value derived from its
//! numbers and deadline. This resolver is the single place that derivation
//! happens; every read and write path reconciles through it.

use chrono::NaiveDateTime;

use super::targets_model::TargetStatus;

/// Outcome of resolving a target's status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResolution {
    /// The status the target should have.
    pub status: TargetStatus,
    /// Whether the stored status disagrees and needs persisting.
    pub should_update: bool,
    /// Human-readable explanation, for logs.
    pub reason: &'static str,
}

/// Decides whether a target's stored status is stale and what it should be.
///
/// Rule precedence, first match wins:
/// 1. `cancelled` is frozen; the resolver never overrides a manual cancel.
/// 2. `current_value >= target_value` derives `completed`, deadline ignored.
/// 3. Past the deadline and below target derives `failed`.
/// 4. Otherwise `active`.
///
/// The caller persists the new status when `should_update` is set, stamping
/// `completed_at` only on the first transition into `completed`. Pure over
/// its inputs; `now` is passed in for testability.
pub fn resolve_status(
    current_value: f64,
    target_value: f64,
    deadline: NaiveDateTime,
    existing_status: TargetStatus,
    now: NaiveDateTime,
) -> StatusResolution {
    if existing_status == TargetStatus::Cancelled {
        return StatusResolution {
            status: TargetStatus::Cancelled,
            should_update: false,
            reason: "cancelled targets are never auto-resolved",
        };
    }

    let (status, reason) = if current_value >= target_value {
        (TargetStatus::Completed, "value reached target")
    } else if now > deadline {
        (TargetStatus::Failed, "deadline passed below target")
    } else {
        (TargetStatus::Active, "in progress within deadline")
    };

    StatusResolution {
        status,
        should_update: status != existing_status,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn yesterday() -> NaiveDateTime {
        now() - Duration::days(1)
    }

    fn tomorrow() -> NaiveDateTime {
        now() + Duration::days(1)
    }

    #[test]
    fn value_reached_completes_even_past_deadline() {
        // targetValue=100, currentValue=100, deadline=yesterday, active
        let res = resolve_status(100.0, 100.0, yesterday(), TargetStatus::Active, now());
        assert_eq!(res.status, TargetStatus::Completed);
        assert!(res.should_update);
    }

    #[test]
    fn past_deadline_below_target_fails() {
        // targetValue=100, currentValue=50, deadline=yesterday, active
        let res = resolve_status(50.0, 100.0, yesterday(), TargetStatus::Active, now());
        assert_eq!(res.status, TargetStatus::Failed);
        assert!(res.should_update);
    }

    #[test]
    fn within_deadline_below_target_stays_active() {
        let res = resolve_status(50.0, 100.0, tomorrow(), TargetStatus::Active, now());
        assert_eq!(res.status, TargetStatus::Active);
        assert!(!res.should_update);
    }

    #[test]
    fn cancelled_is_frozen() {
        // Even with the numbers screaming "completed" or "failed".
        let res = resolve_status(100.0, 100.0, tomorrow(), TargetStatus::Cancelled, now());
        assert_eq!(res.status, TargetStatus::Cancelled);
        assert!(!res.should_update);

        let res = resolve_status(0.0, 100.0, yesterday(), TargetStatus::Cancelled, now());
        assert_eq!(res.status, TargetStatus::Cancelled);
        assert!(!res.should_update);
    }

    #[test]
    fn already_correct_status_needs_no_update() {
        let res = resolve_status(100.0, 100.0, tomorrow(), TargetStatus::Completed, now());
        assert_eq!(res.status, TargetStatus::Completed);
        assert!(!res.should_update);

        let res = resolve_status(10.0, 100.0, yesterday(), TargetStatus::Failed, now());
        assert_eq!(res.status, TargetStatus::Failed);
        assert!(!res.should_update);
    }

    #[test]
    fn completed_value_later_reduced_reverts() {
        // Derived status follows the numbers: a completed target whose value
        // is edited back below target within the deadline becomes active
        // again, and past the deadline becomes failed.
        let res = resolve_status(50.0, 100.0, tomorrow(), TargetStatus::Completed, now());
        assert_eq!(res.status, TargetStatus::Active);
        assert!(res.should_update);

        let res = resolve_status(50.0, 100.0, yesterday(), TargetStatus::Completed, now());
        assert_eq!(res.status, TargetStatus::Failed);
        assert!(res.should_update);
    }

    #[test]
    fn boundary_exactly_at_target_value() {
        let res = resolve_status(100.0, 100.0, tomorrow(), TargetStatus::Active, now());
        assert_eq!(res.status, TargetStatus::Completed);
    }

    #[test]
    fn boundary_exactly_at_deadline_is_not_failed() {
        let deadline = now();
        let res = resolve_status(50.0, 100.0, deadline, TargetStatus::Active, deadline);
        // now > deadline is strict; at the instant of the deadline the
        // target is still active.
        assert_eq!(res.status, TargetStatus::Active);
    }
}
