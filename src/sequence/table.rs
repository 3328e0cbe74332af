//! The 8-phase half-step table and step index arithmetic.
//!
//! Bit positions follow the motor wiring, so the table is reproduced exactly
//! and must not be reordered.

use core::fmt;

/// One coil line of the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// First line.
    A,
    /// Second line.
    B,
    /// Third line.
    C,
    /// Fourth line.
    D,
}

impl Phase {
    /// All phases in line order.
    pub const ALL: [Phase; 4] = [Phase::A, Phase::B, Phase::C, Phase::D];

    #[inline]
    const fn position(self) -> usize {
        match self {
            Phase::A => 0,
            Phase::B => 1,
            Phase::C => 2,
            Phase::D => 3,
        }
    }
}

/// Instantaneous drive state of the four coil lines, `true` = energized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhasePattern([bool; 4]);

impl PhasePattern {
    /// All coils off.
    pub const INACTIVE: Self = Self([false; 4]);

    /// Create a pattern from line states in phase order.
    #[inline]
    pub const fn new(lines: [bool; 4]) -> Self {
        Self(lines)
    }

    /// Line states in phase order.
    #[inline]
    pub const fn lines(&self) -> &[bool; 4] {
        &self.0
    }

    /// Whether `phase` is energized.
    #[inline]
    pub const fn is_active(&self, phase: Phase) -> bool {
        self.0[phase.position()]
    }

    /// Number of energized lines.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }
}

impl fmt::Display for PhasePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &on in &self.0 {
            f.write_str(if on { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Number of entries in [`STEP_TABLE`].
pub const STEPS_PER_CYCLE: usize = 8;

/// Half-step drive sequence, lines [A, B, C, D].
pub const STEP_TABLE: [PhasePattern; STEPS_PER_CYCLE] = [
    PhasePattern([false, false, false, true]),
    PhasePattern([false, false, true, true]),
    PhasePattern([false, false, true, false]),
    PhasePattern([false, true, true, false]),
    PhasePattern([false, true, false, false]),
    PhasePattern([true, true, false, false]),
    PhasePattern([true, false, false, false]),
    PhasePattern([true, false, false, true]),
];

/// Table slot for a step index: `step_index mod 8`, always in `0..8`.
#[inline]
pub fn slot(step_index: i64) -> usize {
    step_index.rem_euclid(STEPS_PER_CYCLE as i64) as usize
}

/// Pattern for any step index; negative indices continue the cycle backwards.
#[inline]
pub fn pattern_for(step_index: i64) -> PhasePattern {
    STEP_TABLE[slot(step_index)]
}

/// Rotation direction, i.e. whether the step index counts up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Ascending step index.
    #[default]
    Forward,
    /// Descending step index.
    Reverse,
}

impl Direction {
    /// +1 or -1.
    #[inline]
    pub const fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// Unbounded step counter; only its value mod 8 selects a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepIndex(pub i64);

impl StepIndex {
    /// Create a new step index.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Table slot, `0..8`.
    #[inline]
    pub fn slot(self) -> usize {
        slot(self.0)
    }

    /// Pattern to apply at this index.
    #[inline]
    pub fn pattern(self) -> PhasePattern {
        pattern_for(self.0)
    }

    /// One step in `direction`.
    ///
    /// Wraps at the ends of `i64`; 2^64 is a multiple of 8, so the pattern
    /// sequence stays continuous across the wrap.
    #[inline]
    pub fn advance(self, direction: Direction) -> Self {
        Self(self.0.wrapping_add(direction.sign()))
    }

    /// `steps` steps in `direction`.
    #[inline]
    pub fn offset_by(self, steps: u32, direction: Direction) -> Self {
        Self(self.0.wrapping_add(direction.sign() * steps as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(pattern: PhasePattern) -> [u8; 4] {
        let l = pattern.lines();
        [l[0] as u8, l[1] as u8, l[2] as u8, l[3] as u8]
    }

    #[test]
    fn test_table_rows() {
        let expected: [[u8; 4]; 8] = [
            [0, 0, 0, 1],
            [0, 0, 1, 1],
            [0, 0, 1, 0],
            [0, 1, 1, 0],
            [0, 1, 0, 0],
            [1, 1, 0, 0],
            [1, 0, 0, 0],
            [1, 0, 0, 1],
        ];
        for (i, row) in expected.iter().enumerate() {
            assert_eq!(&bits(pattern_for(i as i64)), row, "row {}", i);
        }
    }

    #[test]
    fn test_known_indices() {
        assert_eq!(bits(pattern_for(0)), [0, 0, 0, 1]);
        assert_eq!(pattern_for(8), pattern_for(0));
        assert_eq!(pattern_for(15), pattern_for(7));
        assert_eq!(bits(pattern_for(15)), [1, 0, 0, 1]);
        assert_eq!(pattern_for(-1), pattern_for(7));
        assert_eq!(pattern_for(-8), pattern_for(0));
        assert_eq!(pattern_for(-9), pattern_for(7));
    }

    #[test]
    fn test_neighbours_differ_by_one_line() {
        for i in 0..8 {
            let a = pattern_for(i);
            let b = pattern_for(i + 1);
            let changed = Phase::ALL
                .iter()
                .filter(|&&p| a.is_active(p) != b.is_active(p))
                .count();
            assert_eq!(changed, 1, "{} -> {}", a, b);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(STEP_TABLE[1].to_string(), "0011");
        assert_eq!(PhasePattern::INACTIVE.to_string(), "0000");
    }

    #[test]
    fn test_step_index_wraps_continuously() {
        let max = StepIndex(i64::MAX);
        let wrapped = max.advance(Direction::Forward);
        assert_eq!(wrapped, StepIndex(i64::MIN));
        assert_eq!(wrapped.slot(), (max.slot() + 1) % 8);

        assert_eq!(StepIndex(0).advance(Direction::Reverse).pattern(), STEP_TABLE[7]);
        assert_eq!(StepIndex(3).offset_by(10, Direction::Reverse), StepIndex(-7));
    }
}
