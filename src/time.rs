// Time formatting - M:SS.mmm display strings
// Used for handle tooltips and duration readouts in the presentation layer.

/// Format seconds as `M:SS.mmm` (e.g. `1:05.250`).
pub fn format_time(secs: f64) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u64;
    let remainder = secs - minutes as f64 * 60.0;
    format!("{}:{:06.3}", minutes, remainder)
}

/// Parse a `M:SS.mmm` string back to seconds. Returns `None` for anything
/// that is not two `:`-separated numeric fields.
pub fn parse_time(text: &str) -> Option<f64> {
    let (minutes, seconds) = text.split_once(':')?;
    let minutes: u64 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;
    if !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(minutes as f64 * 60.0 + seconds)
}
