//! Held-key tracker for terminal environments.
//!
//! The game samples "is this key held right now" once per tick. Terminals
//! usually only report presses (with OS auto-repeat), so a key counts as held
//! until either a release event arrives or no press has been seen for the
//! release timeout. A press that starts and ends between two samples is
//! latched so it is still visible to exactly one sample.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, Control};
use crate::types::InputSnapshot;

// Comfortably above the OS key-repeat interval so a held key does not flicker.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

const SLOTS: usize = Control::HELD.len();

/// Tracks which controls are currently held.
#[derive(Debug, Clone)]
pub struct InputTracker {
    last_press: [Option<Instant>; SLOTS],
    latched: [bool; SLOTS],
    quit: bool,
    key_release_timeout_ms: u32,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            last_press: [None; SLOTS],
            latched: [false; SLOTS],
            quit: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns the control it mapped to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Control> {
        self.handle_key_event_at(key, Instant::now())
    }

    pub fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) -> Option<Control> {
        let control = map_key(key)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press_at(control, now),
            KeyEventKind::Release => self.release(control),
        }
        Some(control)
    }

    pub fn press_at(&mut self, control: Control, now: Instant) {
        match control.slot() {
            Some(i) => {
                self.last_press[i] = Some(now);
                self.latched[i] = true;
            }
            None => self.quit = true,
        }
    }

    pub fn release(&mut self, control: Control) {
        if let Some(i) = control.slot() {
            self.last_press[i] = None;
        }
    }

    /// Whether a quit key has been seen.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Sample the held state for one tick.
    pub fn snapshot(&mut self) -> InputSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&mut self, now: Instant) -> InputSnapshot {
        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));
        let mut held = [false; SLOTS];
        for (i, slot) in held.iter_mut().enumerate() {
            let fresh = match self.last_press[i] {
                Some(t) if now.saturating_duration_since(t) <= timeout => true,
                Some(_) => {
                    self.last_press[i] = None;
                    false
                }
                None => false,
            };
            *slot = fresh || self.latched[i];
            self.latched[i] = false;
        }

        InputSnapshot {
            move_left: held[0],
            move_right: held[1],
            soft_drop: held[2],
            rotate: held[3],
            pause: held[4],
            quit: self.quit,
        }
    }

    pub fn reset(&mut self) {
        self.last_press = [None; SLOTS];
        self.latched = [false; SLOTS];
        self.quit = false;
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn release_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_is_held_until_timeout() {
        let mut t = InputTracker::new().with_key_release_timeout_ms(150);
        let t0 = Instant::now();
        t.press_at(Control::MoveLeft, t0);

        let s = t.snapshot_at(t0 + Duration::from_millis(100));
        assert!(s.move_left);
        assert!(!s.move_right);

        let s = t.snapshot_at(t0 + Duration::from_millis(200));
        assert!(!s.move_left, "stale press auto-releases");
    }

    #[test]
    fn test_repeated_presses_keep_key_held() {
        let mut t = InputTracker::new().with_key_release_timeout_ms(150);
        let t0 = Instant::now();
        for step in 0..5u64 {
            let now = t0 + Duration::from_millis(step * 100);
            t.press_at(Control::SoftDrop, now);
            assert!(t.snapshot_at(now + Duration::from_millis(50)).soft_drop);
        }
    }

    #[test]
    fn test_quick_tap_is_latched_for_one_sample() {
        let mut t = InputTracker::new();
        let t0 = Instant::now();
        t.handle_key_event_at(KeyEvent::from(KeyCode::Up), t0);
        t.handle_key_event_at(release_event(KeyCode::Up), t0);

        assert!(t.snapshot_at(t0).rotate);
        assert!(!t.snapshot_at(t0).rotate);
    }

    #[test]
    fn test_release_event_clears_held_state() {
        let mut t = InputTracker::new();
        let t0 = Instant::now();
        t.handle_key_event_at(KeyEvent::from(KeyCode::Right), t0);
        assert!(t.snapshot_at(t0).move_right);
        t.handle_key_event_at(release_event(KeyCode::Right), t0);
        assert!(!t.snapshot_at(t0).move_right);
    }

    #[test]
    fn test_pause_tap_produces_press_then_release() {
        let mut t = InputTracker::new().with_key_release_timeout_ms(150);
        let t0 = Instant::now();
        t.handle_key_event_at(KeyEvent::from(KeyCode::Char('p')), t0);

        let first = t.snapshot_at(t0 + Duration::from_millis(100));
        let second = t.snapshot_at(t0 + Duration::from_millis(200));
        assert!(first.pause);
        assert!(!second.pause);
        assert!(second.pause_released(&first));
    }

    #[test]
    fn test_quit_is_sticky() {
        let mut t = InputTracker::new();
        assert_eq!(
            t.handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(Control::Quit)
        );
        assert!(t.quit_requested());
        assert!(t.snapshot().quit);
        assert!(t.snapshot().quit);
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut t = InputTracker::new();
        assert_eq!(t.handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(t.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut t = InputTracker::new();
        let t0 = Instant::now();
        t.press_at(Control::MoveLeft, t0);
        t.press_at(Control::Quit, t0);
        t.reset();
        assert_eq!(t.snapshot_at(t0), InputSnapshot::default());
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        assert!(InputTracker::new().key_release_timeout_ms() > 0);
    }
}
