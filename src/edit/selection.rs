// Trim-handle selection
//
// Handles are stored as percentages of the active buffer's full duration,
// not absolute seconds, so the same selection object survives a buffer
// replacement (it is simply reset to the full range). Invariant:
// 0 <= left < right <= 100, with a minimum separation enforced at drag time.

/// Which trim handle a gesture addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

/// Selected region as a pair of duration percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    left_pct: f64,
    right_pct: f64,
}

impl Selection {
    /// Full-range selection.
    pub fn new() -> Self {
        Self {
            left_pct: 0.0,
            right_pct: 100.0,
        }
    }

    pub fn left_pct(&self) -> f64 {
        self.left_pct
    }

    pub fn right_pct(&self) -> f64 {
        self.right_pct
    }

    pub fn is_full_range(&self) -> bool {
        self.left_pct == 0.0 && self.right_pct == 100.0
    }

    /// Back to the full range (after every edit and on load).
    pub fn reset(&mut self) {
        self.left_pct = 0.0;
        self.right_pct = 100.0;
    }

    /// Move one handle. The requested percentage is clamped to [0, 100] and
    /// then held back so the handles never cross and never come closer than
    /// `min_separation_pct`.
    pub fn set_handle(&mut self, side: HandleSide, percent: f64, min_separation_pct: f64) {
        let percent = percent.clamp(0.0, 100.0);
        let min_separation_pct = min_separation_pct.clamp(0.0, 100.0);
        match side {
            HandleSide::Left => {
                let max_left = (self.right_pct - min_separation_pct).max(0.0);
                self.left_pct = percent.min(max_left);
            }
            HandleSide::Right => {
                let min_right = (self.left_pct + min_separation_pct).min(100.0);
                self.right_pct = percent.max(min_right);
            }
        }
    }

    /// Selected region in seconds for a buffer of the given duration.
    pub fn region_secs(&self, duration_secs: f64) -> (f64, f64) {
        (
            duration_secs * self.left_pct / 100.0,
            duration_secs * self.right_pct / 100.0,
        )
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
