//! Time value resolution for tracking frames.
//!
//! Priority: plain number (seconds) > clock string > frame / frame rate.

use super::fields::as_number;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// `MM:SS`, `MM:SS.f`, `HH:MM:SS`, `HH:MM:SS.f`
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d+):(\d+(?:\.\d*)?)$").expect("valid clock regex")
});

/// Parse a clock-duration string into seconds.
///
/// ```
/// use track_core::ingest::timestamp::parse_clock;
///
/// assert_eq!(parse_clock("01:23"), Some(83.0));
/// assert_eq!(parse_clock("01:00:01.5"), Some(3601.5));
/// assert_eq!(parse_clock("kickoff"), None);
/// ```
pub fn parse_clock(raw: &str) -> Option<f64> {
    let caps = CLOCK_RE.captures(raw.trim())?;
    let hours = match caps.get(1) {
        Some(h) => h.as_str().parse::<f64>().ok()?,
        None => 0.0,
    };
    let minutes = caps[2].parse::<f64>().ok()?;
    let seconds = caps[3].parse::<f64>().ok()?;
    let total = hours * 3600.0 + minutes * 60.0 + seconds;
    total.is_finite().then_some(total)
}

/// Resolve a frame's time in seconds (before any period offset).
///
/// `frame` may be fractional. A `frame_rate` of `None` (present in the
/// metadata but unusable) disables the frame fallback. Returns `None` when no
/// encoding applies.
pub fn to_seconds(time: Option<&Value>, frame: Option<f64>, frame_rate: Option<f64>) -> Option<f64> {
    let explicit = time.and_then(|v| {
        as_number(v).or_else(|| v.as_str().and_then(parse_clock))
    });
    if explicit.is_some() {
        return explicit;
    }
    match (frame, frame_rate) {
        (Some(f), Some(fps)) if fps.is_finite() && fps > 0.0 => Some(f / fps),
        _ => None,
    }
}

/// Shift a period-relative time onto a match clock: `(period - 1) * offset`.
///
/// Periods below 1 (or absent) leave the time unchanged.
pub fn apply_period_offset(secs: f64, period: Option<i64>, offset_secs: f64) -> f64 {
    match period {
        Some(p) if p >= 1 => secs + (p - 1) as f64 * offset_secs,
        _ => secs,
    }
}
