//! Property-based tests for the target status resolver.
//!
//! These verify that the derivation rules hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use teamline_core::targets::{resolve_status, TargetStatus};

// =============================================================================
// Generators
// =============================================================================

fn arb_status() -> impl Strategy<Value = TargetStatus> {
    prop_oneof![
        Just(TargetStatus::Active),
        Just(TargetStatus::Completed),
        Just(TargetStatus::Failed),
        Just(TargetStatus::Cancelled),
    ]
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// A point in time within roughly two years of the base, either side.
fn arb_time() -> impl Strategy<Value = NaiveDateTime> {
    (-700i64..700, 0i64..86_400)
        .prop_map(|(days, secs)| base_time() + Duration::days(days) + Duration::seconds(secs))
}

fn arb_values() -> impl Strategy<Value = (f64, f64)> {
    // (current, target); target strictly positive, current non-negative and
    // occasionally past the target the way an admin edit can push it.
    (0.0f64..10_000.0, 0.01f64..5_000.0)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, max_global_rejects: 16384, ..ProptestConfig::default() })]

    /// Reaching the target derives `completed` no matter the deadline,
    /// unless the target was manually cancelled.
    #[test]
    fn value_reached_always_completes(
        (current, target) in arb_values(),
        deadline in arb_time(),
        now in arb_time(),
        existing in arb_status(),
    ) {
        prop_assume!(current >= target);
        prop_assume!(existing != TargetStatus::Cancelled);

        let res = resolve_status(current, target, deadline, existing, now);
        prop_assert_eq!(res.status, TargetStatus::Completed);
        prop_assert_eq!(res.should_update, existing != TargetStatus::Completed);
    }

    /// Below target and past the deadline derives `failed`.
    #[test]
    fn past_deadline_below_target_fails(
        (current, target) in arb_values(),
        deadline in arb_time(),
        existing in arb_status(),
    ) {
        prop_assume!(current < target);
        prop_assume!(existing != TargetStatus::Cancelled);
        let now = deadline + Duration::seconds(1);

        let res = resolve_status(current, target, deadline, existing, now);
        prop_assert_eq!(res.status, TargetStatus::Failed);
    }

    /// A cancelled target never reports an update, whatever the numbers say.
    #[test]
    fn cancelled_never_updates(
        (current, target) in arb_values(),
        deadline in arb_time(),
        now in arb_time(),
    ) {
        let res = resolve_status(current, target, deadline, TargetStatus::Cancelled, now);
        prop_assert_eq!(res.status, TargetStatus::Cancelled);
        prop_assert!(!res.should_update);
    }

    /// `should_update` is exactly "derived differs from stored".
    #[test]
    fn should_update_iff_status_changed(
        (current, target) in arb_values(),
        deadline in arb_time(),
        now in arb_time(),
        existing in arb_status(),
    ) {
        let res = resolve_status(current, target, deadline, existing, now);
        prop_assert_eq!(res.should_update, res.status != existing);
    }

    /// Resolving is idempotent: feeding the derived status back in yields
    /// no further update. This is what makes concurrent duplicate rewrites
    /// harmless.
    #[test]
    fn resolution_is_idempotent(
        (current, target) in arb_values(),
        deadline in arb_time(),
        now in arb_time(),
        existing in arb_status(),
    ) {
        let first = resolve_status(current, target, deadline, existing, now);
        let second = resolve_status(current, target, deadline, first.status, now);
        prop_assert_eq!(second.status, first.status);
        prop_assert!(!second.should_update);
    }
}
