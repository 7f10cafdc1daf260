//! Combo tracking
//!
//! The streak window is measured in wall-clock seconds, not ticks, so combo
//! pacing does not drift with frame rate. The banner duration is in ticks.

use crate::consts::{COMBO_DISPLAY_TICKS, COMBO_TIMEOUT_SECS};

/// Banner shown while a streak of two or more is fresh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboFeedback {
    pub count: u32,
    /// Text scale, grows with the streak up to 3.5
    pub scale: f32,
}

impl ComboFeedback {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            scale: (1.5 + count as f32 * 0.2).min(3.5),
        }
    }

    pub fn text(&self) -> String {
        format!("{} COMBO!", self.count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComboTracker {
    count: u32,
    last_slice_at: Option<f64>,
    display_ticks: u32,
    timeout: f64,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new(COMBO_TIMEOUT_SECS)
    }
}

impl ComboTracker {
    pub fn new(timeout_secs: f64) -> Self {
        Self {
            count: 0,
            last_slice_at: None,
            display_ticks: 0,
            timeout: timeout_secs,
        }
    }

    /// Record a fruit slice at wall-clock time `now` (seconds); returns the
    /// streak length including this slice
    pub fn register_slice(&mut self, now: f64) -> u32 {
        self.count = match self.last_slice_at {
            Some(last) if now - last < self.timeout => self.count + 1,
            _ => 1,
        };
        self.last_slice_at = Some(now);
        self.display_ticks = COMBO_DISPLAY_TICKS;
        self.count
    }

    /// A bomb breaks the streak; an already showing banner is left to expire
    pub fn register_bomb(&mut self) {
        self.count = 0;
    }

    /// Per-tick banner: Some while the streak is 2+ and the banner has ticks
    /// left, consuming one tick
    pub fn frame_feedback(&mut self) -> Option<ComboFeedback> {
        if self.count > 1 && self.display_ticks > 0 {
            self.display_ticks -= 1;
            Some(ComboFeedback::new(self.count))
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_slice_at = None;
        self.display_ticks = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn display_ticks(&self) -> u32 {
        self.display_ticks
    }

    /// Score bonus for the current streak
    pub fn bonus(&self) -> u32 {
        self.count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_within_window() {
        let mut combo = ComboTracker::default();
        assert_eq!(combo.register_slice(10.0), 1);
        assert_eq!(combo.register_slice(11.0), 2);
        assert_eq!(combo.register_slice(13.4), 3);
        assert_eq!(combo.bonus(), 2);
    }

    #[test]
    fn test_timeout_restarts_at_one() {
        let mut combo = ComboTracker::default();
        combo.register_slice(0.0);
        combo.register_slice(1.0);
        assert_eq!(combo.register_slice(3.5), 1);
        // Gap measured from the latest slice
        assert_eq!(combo.register_slice(5.9), 2);
    }

    #[test]
    fn test_bomb_resets_to_zero() {
        let mut combo = ComboTracker::default();
        combo.register_slice(0.0);
        combo.register_slice(0.5);
        combo.register_bomb();
        assert_eq!(combo.count(), 0);
        assert_eq!(combo.display_ticks(), 30);
        assert_eq!(combo.frame_feedback(), None);
    }

    #[test]
    fn test_banner_counts_down() {
        let mut combo = ComboTracker::default();
        combo.register_slice(0.0);
        // A single slice is not a combo
        assert_eq!(combo.frame_feedback(), None);
        assert_eq!(combo.display_ticks(), 30);

        combo.register_slice(0.1);
        let mut shown = 0;
        while let Some(feedback) = combo.frame_feedback() {
            assert_eq!(feedback.count, 2);
            assert_eq!(feedback.text(), "2 COMBO!");
            shown += 1;
        }
        assert_eq!(shown, 30);
    }

    #[test]
    fn test_banner_scale_caps() {
        assert!((ComboFeedback::new(2).scale - 1.9).abs() < 1e-6);
        assert_eq!(ComboFeedback::new(10).scale, 3.5);
        assert_eq!(ComboFeedback::new(50).scale, 3.5);
    }
}
