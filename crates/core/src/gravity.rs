//! Gravity clock - per-tick accumulator that issues forced downward moves
//!
//! Speed and accumulator are kept in thousandths of a cell so that adding the
//! same speed every tick overflows on exactly the expected tick.

use crate::types::{GRAVITY_SCALE, INITIAL_SPEED_MILLI, SPEED_INCREMENT_MILLI};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityClock {
    speed_milli: u32,
    accumulator_milli: u32,
    increment_milli: u32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::with_speed(INITIAL_SPEED_MILLI, SPEED_INCREMENT_MILLI)
    }

    pub fn with_speed(speed_milli: u32, increment_milli: u32) -> Self {
        Self {
            speed_milli,
            accumulator_milli: 0,
            increment_milli,
        }
    }

    /// Add one tick of speed. Returns `true` when the accumulator reached a
    /// full cell, which resets it and calls for a forced move down.
    pub fn advance(&mut self) -> bool {
        self.accumulator_milli = self.accumulator_milli.saturating_add(self.speed_milli);
        if self.accumulator_milli >= GRAVITY_SCALE {
            self.accumulator_milli = 0;
            return true;
        }
        false
    }

    /// Speed up once if this tick cleared any lines. Speed never decreases.
    pub fn on_lines_cleared(&mut self, lines: u32) {
        if lines > 0 {
            self.speed_milli = self.speed_milli.saturating_add(self.increment_milli);
        }
    }

    /// Cells per tick
    pub fn speed(&self) -> f32 {
        self.speed_milli as f32 / GRAVITY_SCALE as f32
    }

    pub fn speed_milli(&self) -> u32 {
        self.speed_milli
    }

    pub fn accumulator_milli(&self) -> u32 {
        self.accumulator_milli
    }

    /// Displayed level: `floor(10 * speed)`
    pub fn level(&self) -> u32 {
        self.speed_milli * 10 / GRAVITY_SCALE
    }

    /// Back to the starting speed with an empty accumulator
    pub fn reset(&mut self) {
        *self = Self::with_speed(INITIAL_SPEED_MILLI, self.increment_milli);
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn initial_speed_falls_once_every_ten_ticks() {
        let mut clock = GravityClock::new();
        let fired: Vec<bool> = (0..20).map(|_| clock.advance()).collect();
        let at: Vec<usize> = fired
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(at, vec![9, 19]);
    }

    #[test]
    fn accumulator_resets_to_zero_on_overflow() {
        let mut clock = GravityClock::with_speed(600, 5);
        assert!(!clock.advance());
        assert!(clock.advance());
        assert_eq!(clock.accumulator_milli(), 0);
    }

    #[test]
    fn speed_increases_only_when_lines_cleared() {
        let mut clock = GravityClock::new();
        clock.on_lines_cleared(0);
        assert_eq!(clock.speed_milli(), INITIAL_SPEED_MILLI);
        clock.on_lines_cleared(4);
        assert_eq!(clock.speed_milli(), INITIAL_SPEED_MILLI + SPEED_INCREMENT_MILLI);
    }

    #[test]
    fn level_follows_speed() {
        let mut clock = GravityClock::new();
        assert_eq!(clock.level(), 1);
        for _ in 0..20 {
            clock.on_lines_cleared(1);
        }
        assert_eq!(clock.speed_milli(), 200);
        assert_eq!(clock.level(), 2);
        assert!((clock.speed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_starting_speed() {
        let mut clock = GravityClock::new();
        clock.on_lines_cleared(1);
        clock.advance();
        clock.reset();
        assert_eq!(clock, GravityClock::new());
    }

    proptest! {
        #[test]
        fn fires_every_ceil_scale_over_speed_ticks(speed in 1u32..=1500) {
            let mut clock = GravityClock::with_speed(speed, 0);
            let period = GRAVITY_SCALE.div_ceil(speed) as usize;
            for tick in 1..=3 * period {
                prop_assert_eq!(clock.advance(), tick % period == 0);
            }
        }

        #[test]
        fn speed_never_decreases(clears in prop::collection::vec(0u32..=4, 0..200)) {
            let mut clock = GravityClock::new();
            for n in clears {
                let before = clock.speed_milli();
                clock.on_lines_cleared(n);
                prop_assert!(clock.speed_milli() >= before);
                prop_assert_eq!(clock.speed_milli() > before, n > 0);
            }
        }
    }
}
