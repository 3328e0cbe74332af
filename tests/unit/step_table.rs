//! Property tests for the half-step table.

use proptest::prelude::*;
use rotating_table::sequence::Phase;
use rotating_table::{pattern_for, Direction, StepIndex, STEP_TABLE};

proptest! {
    /// pattern_for(n) == pattern_for(n mod 8), true modulo.
    #[test]
    fn pattern_depends_only_on_modulo(n in any::<i64>()) {
        prop_assert_eq!(pattern_for(n), pattern_for(n.rem_euclid(8)));
    }

    /// Every index maps to one of the eight table rows.
    #[test]
    fn pattern_is_a_table_row(n in any::<i64>()) {
        prop_assert!(STEP_TABLE.contains(&pattern_for(n)));
    }

    /// Stepping either way changes exactly one line.
    #[test]
    fn one_line_changes_per_step(n in any::<i64>(), reverse in any::<bool>()) {
        let direction = if reverse { Direction::Reverse } else { Direction::Forward };
        let here = StepIndex::new(n);
        let a = here.pattern();
        let b = here.advance(direction).pattern();
        let changed = Phase::ALL.iter().filter(|&&p| a.is_active(p) != b.is_active(p)).count();
        prop_assert_eq!(changed, 1);
    }

    /// Going forward then back returns to the same pattern.
    #[test]
    fn forward_then_reverse_is_identity(n in any::<i64>(), steps in 0u32..10_000) {
        let start = StepIndex::new(n);
        let back = start
            .offset_by(steps, Direction::Forward)
            .offset_by(steps, Direction::Reverse);
        prop_assert_eq!(back, start);
    }
}

#[test]
fn table_has_eight_distinct_rows() {
    for (i, a) in STEP_TABLE.iter().enumerate() {
        for b in &STEP_TABLE[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn half_steps_alternate_one_and_two_coils() {
    for (i, pattern) in STEP_TABLE.iter().enumerate() {
        let expected = if i % 2 == 0 { 1 } else { 2 };
        assert_eq!(pattern.active_count(), expected, "row {}", i);
    }
}
