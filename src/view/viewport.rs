// Viewport - zoom/scroll state and screen <-> time mapping
//
// The mapping is referentially transparent given (duration, zoom, offset).
// `zoom_offset` is the fraction of total duration at the left edge of the
// visible window; the window [duration*offset, duration*offset + duration/zoom]
// always lies within [0, duration] because the offset is clamped to
// [0, 1 - 1/zoom] on every write.
//
// Note the deliberate asymmetry: screen-to-time is unclamped (gestures are
// in-bounds by construction and the caller clamps against the buffer),
// time-to-screen is clamped to [0, 100] so elements scrolled out of view pin
// to the visible edge instead of disappearing.

/// Zoom/scroll state over the active buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom_level: f64,
    zoom_offset: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        debug_assert!(min_zoom >= 1.0 && max_zoom >= min_zoom);
        Self {
            zoom_level: min_zoom,
            zoom_offset: 0.0,
            min_zoom,
            max_zoom,
        }
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn zoom_offset(&self) -> f64 {
        self.zoom_offset
    }

    /// Largest legal scroll offset at the current zoom.
    pub fn max_offset(&self) -> f64 {
        1.0 - 1.0 / self.zoom_level
    }

    /// Fraction of total duration that is visible.
    pub fn visible_fraction(&self) -> f64 {
        1.0 / self.zoom_level
    }

    /// Visible window as (start_secs, duration_secs).
    pub fn visible_window(&self, duration_secs: f64) -> (f64, f64) {
        (
            duration_secs * self.zoom_offset,
            duration_secs / self.zoom_level,
        )
    }

    /// Back to no-zoom, left-aligned (new file load).
    pub fn reset(&mut self) {
        self.zoom_level = self.min_zoom;
        self.zoom_offset = 0.0;
    }

    /// Change the zoom level, keeping the time at the center of the old
    /// window at the center of the new one (then clamping the offset).
    /// Prevents the view from jumping when zooming.
    pub fn set_zoom(&mut self, level: f64) {
        let level = level.clamp(self.min_zoom, self.max_zoom);
        let center = self.zoom_offset + 0.5 / self.zoom_level;
        self.zoom_level = level;
        self.zoom_offset = (center - 0.5 / level).clamp(0.0, self.max_offset());
    }

    /// Set the scroll offset (fraction of duration at the left edge).
    pub fn set_offset(&mut self, offset: f64) {
        self.zoom_offset = offset.clamp(0.0, self.max_offset());
    }

    /// Move a fraction of the way toward `target` offset. Used by playback
    /// auto-scroll so the view glides instead of snapping.
    pub fn ease_toward(&mut self, target: f64, factor: f64) {
        let target = target.clamp(0.0, self.max_offset());
        self.set_offset(self.zoom_offset + (target - self.zoom_offset) * factor);
    }

    /// Offset that would center the given duration fraction in the window.
    pub fn centering_offset(&self, fraction: f64) -> f64 {
        (fraction - 0.5 / self.zoom_level).clamp(0.0, self.max_offset())
    }

    /// True when the duration fraction lies inside the visible window.
    pub fn contains_fraction(&self, fraction: f64) -> bool {
        fraction >= self.zoom_offset && fraction <= self.zoom_offset + self.visible_fraction()
    }

    /// Map a canvas pixel to buffer time. Unclamped; the caller clamps to
    /// the buffer bounds as needed.
    pub fn screen_x_to_time(&self, duration_secs: f64, pixel_x: f64, canvas_width: f64) -> f64 {
        let (visible_start, visible_duration) = self.visible_window(duration_secs);
        visible_start + (pixel_x / canvas_width) * visible_duration
    }

    /// Map a buffer time to a horizontal position in percent of the canvas,
    /// clamped to [0, 100].
    pub fn time_to_percent(&self, duration_secs: f64, time_secs: f64) -> f64 {
        let (visible_start, visible_duration) = self.visible_window(duration_secs);
        if time_secs < visible_start {
            0.0
        } else if time_secs > visible_start + visible_duration {
            100.0
        } else {
            (time_secs - visible_start) / visible_duration * 100.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_preserves_center() {
        // 10s buffer, zoom 1 -> 4 centered at t=5: window becomes [3.75, 6.25]
        let mut view = Viewport::default();
        view.set_zoom(4.0);

        assert_eq!(view.zoom_level(), 4.0);
        assert!((view.zoom_offset() - 0.375).abs() < 1e-12);
        let (start, len) = view.visible_window(10.0);
        assert!((start - 3.75).abs() < 1e-9);
        assert!((len - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamps_to_range() {
        let mut view = Viewport::new(1.0, 10.0);
        view.set_zoom(50.0);
        assert_eq!(view.zoom_level(), 10.0);
        view.set_zoom(0.1);
        assert_eq!(view.zoom_level(), 1.0);
        assert_eq!(view.zoom_offset(), 0.0);
    }

    #[test]
    fn test_offset_clamps_to_window() {
        let mut view = Viewport::default();
        view.set_zoom(2.0);
        view.set_offset(0.9);
        assert!((view.zoom_offset() - 0.5).abs() < 1e-12);
        view.set_offset(-0.3);
        assert_eq!(view.zoom_offset(), 0.0);
    }

    #[test]
    fn test_screen_x_to_time_unclamped() {
        let view = Viewport::default();
        // One pixel past the right edge maps past the buffer end.
        let t = view.screen_x_to_time(10.0, 1100.0, 1000.0);
        assert!((t - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_to_percent_clamps() {
        let mut view = Viewport::default();
        view.set_zoom(4.0); // window [3.75, 6.25] on a 10s buffer

        assert_eq!(view.time_to_percent(10.0, 1.0), 0.0);
        assert_eq!(view.time_to_percent(10.0, 9.0), 100.0);
        assert!((view.time_to_percent(10.0, 5.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_mapping_round_trip() {
        let mut view = Viewport::default();
        view.set_zoom(3.0);
        view.set_offset(0.4);

        let duration = 12.0;
        let width = 800.0;
        for t in [4.9, 5.5, 7.0, 8.2] {
            let percent = view.time_to_percent(duration, t);
            let back = view.screen_x_to_time(duration, percent / 100.0 * width, width);
            // within one pixel's time resolution
            let pixel_time = duration / view.zoom_level() / width;
            assert!((back - t).abs() <= pixel_time, "t={t} back={back}");
        }
    }

    #[test]
    fn test_ease_toward_steps_ten_percent() {
        let mut view = Viewport::default();
        view.set_zoom(4.0);
        view.set_offset(0.0);
        view.ease_toward(0.5, 0.1);
        assert!((view.zoom_offset() - 0.05).abs() < 1e-12);
    }
}
