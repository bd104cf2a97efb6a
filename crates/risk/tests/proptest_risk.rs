//! Property-based tests for the risk formula.

use proptest::prelude::*;
use risk::compute_risk;

proptest! {
    /// Valid inputs always match the closed-form formula.
    #[test]
    fn matches_formula_for_valid_input(
        entry in 0.0001f64..1_000_000.0,
        stop in 0.0001f64..1_000_000.0,
        position in 0.01f64..10_000_000.0,
        account in 0.01f64..10_000_000.0,
    ) {
        let m = compute_risk(entry, stop, position, account);
        prop_assert!(m.is_some());
        let m = m.unwrap();
        let expected = (entry - stop).abs() / entry * position / account * 100.0;
        prop_assert_eq!(m.risk_percent, expected);
        prop_assert!(m.risk_amount >= 0.0);
    }

    /// Repeated calls with the same input return the same output.
    #[test]
    fn is_idempotent(
        entry in 0.0001f64..1_000_000.0,
        stop in 0.0001f64..1_000_000.0,
        position in 0.01f64..10_000_000.0,
        account in 0.01f64..10_000_000.0,
    ) {
        let first = compute_risk(entry, stop, position, account);
        let second = compute_risk(entry, stop, position, account);
        prop_assert_eq!(first, second);
    }

    /// Non-positive account sizes never yield a result.
    #[test]
    fn non_positive_account_yields_none(
        entry in 0.0001f64..1_000.0,
        stop in 0.0001f64..1_000.0,
        account in -1_000.0f64..=0.0,
    ) {
        prop_assert!(compute_risk(entry, stop, 100.0, account).is_none());
    }
}
