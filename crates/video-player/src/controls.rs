//! Control-bar auto-hide.
//!
//! Pointer movement shows the controls and (re)arms a hide deadline, but only
//! while playing.  Pausing or reaching the end pins the controls visible and
//! disarms the timer; pointer-leave hides them immediately while playing.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ControlsVisibility {
    visible: bool,
    hide_at: Option<Instant>,
    hide_timeout: Duration,
}

impl ControlsVisibility {
    pub fn new(hide_timeout: Duration) -> Self {
        Self {
            visible: true,
            hide_at: None,
            hide_timeout,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Pointer moved over the player.
    pub fn pointer_activity(&mut self, now: Instant, playing: bool) {
        self.visible = true;
        self.hide_at = if playing {
            Some(now + self.hide_timeout)
        } else {
            None
        };
    }

    /// Pointer left the player area.
    pub fn pointer_leave(&mut self, playing: bool) {
        if playing {
            self.visible = false;
            self.hide_at = None;
        }
    }

    /// Keep the controls visible with no hide deadline (paused / ended).
    pub fn pin_visible(&mut self) {
        self.visible = true;
        self.hide_at = None;
    }

    /// Advance time; hides the controls once the deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.hide_at {
            if now >= deadline {
                self.visible = false;
                self.hide_at = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(3);

    #[test]
    fn test_hide_after_inactivity_while_playing() {
        let t0 = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.pointer_activity(t0, true);
        assert!(controls.visible());

        controls.tick(t0 + Duration::from_secs(2));
        assert!(controls.visible());
        controls.tick(t0 + TIMEOUT);
        assert!(!controls.visible());
    }

    #[test]
    fn test_activity_rearms_deadline() {
        let t0 = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.pointer_activity(t0, true);
        controls.pointer_activity(t0 + Duration::from_secs(2), true);
        // Old deadline passes with no effect; the new one holds.
        controls.tick(t0 + TIMEOUT);
        assert!(controls.visible());
        controls.tick(t0 + Duration::from_secs(5));
        assert!(!controls.visible());
    }

    #[test]
    fn test_no_timer_while_paused() {
        let t0 = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.pointer_activity(t0, false);
        controls.tick(t0 + Duration::from_secs(60));
        assert!(controls.visible());
    }

    #[test]
    fn test_pointer_leave_hides_only_while_playing() {
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.pointer_leave(false);
        assert!(controls.visible());
        controls.pointer_leave(true);
        assert!(!controls.visible());
    }

    #[test]
    fn test_pin_visible_disarms_timer() {
        let t0 = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.pointer_activity(t0, true);
        controls.pin_visible();
        controls.tick(t0 + Duration::from_secs(60));
        assert!(controls.visible());
    }
}
