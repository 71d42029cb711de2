// Editor configuration
//
// The thresholds below are UI-feel constants inherited from the tool this
// core was extracted from, not values derived from an invariant. They are
// kept configurable for that reason; the defaults match the source tool.

use serde::{Deserialize, Serialize};

/// Tunable editor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Minimum audio duration between the two trim handles, in seconds.
    /// Enforced while a handle is dragged, never retroactively.
    pub min_handle_separation_secs: f64,
    /// Minimum duration of a region that may be deleted or extracted.
    pub min_delete_region_secs: f64,
    /// Minimum playable duration; shorter derived regions abort the play attempt.
    pub min_playback_region_secs: f64,
    /// Fraction of the remaining distance the view scrolls per tick when
    /// auto-following the playback position.
    pub autoscroll_easing: f64,
    /// Lower zoom clamp (1.0 = whole buffer visible).
    pub min_zoom: f64,
    /// Upper zoom clamp.
    pub max_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_handle_separation_secs: 0.5,
            min_delete_region_secs: 0.05,
            min_playback_region_secs: 0.01,
            autoscroll_easing: 0.1,
            min_zoom: 1.0,
            max_zoom: 10.0,
        }
    }
}
