//! # Team Shape Metrics Module
//!
//! Geometric properties of a team at one instant. Inputs hold one entry per
//! tracked player; `NaN` marks a missing coordinate and is ignored. An
//! all-missing (or empty) input yields `NaN`, never a panic.

use crate::ingest::TrackingTable;

fn present(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = present(values).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

fn nan_range(values: &[f64]) -> f64 {
    let bounds = present(values).fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    });
    match bounds {
        Some((lo, hi)) => hi - lo,
        None => f64::NAN,
    }
}

/// Team centroid: mean x and mean y, each ignoring missing values.
///
/// ```
/// use track_core::metrics::centroid;
///
/// assert_eq!(centroid(&[1.0, 3.0], &[2.0, 4.0]), (2.0, 3.0));
/// ```
pub fn centroid(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    (nan_mean(xs), nan_mean(ys))
}

/// Length: distance between back-most and front-most players (y-range).
pub fn length(_xs: &[f64], ys: &[f64]) -> f64 {
    nan_range(ys)
}

/// Width: lateral spread (x-range).
pub fn width(xs: &[f64], _ys: &[f64]) -> f64 {
    nan_range(xs)
}

/// Team shape at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamShape {
    pub centroid: (f64, f64),
    /// y-range
    pub length: f64,
    /// x-range
    pub width: f64,
    /// Players with both coordinates present
    pub players: usize,
}

pub fn team_shape(xs: &[f64], ys: &[f64]) -> TeamShape {
    TeamShape {
        centroid: centroid(xs, ys),
        length: length(xs, ys),
        width: width(xs, ys),
        players: xs
            .iter()
            .zip(ys)
            .filter(|(x, y)| !x.is_nan() && !y.is_nan())
            .count(),
    }
}

/// Shape of one team in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSample {
    pub period: Option<i64>,
    pub frame: Option<i64>,
    pub timestamp: Option<f64>,
    pub shape: TeamShape,
}

/// Per-frame shape of the rows whose `team_id` equals `team_id`.
///
/// Frames without rows for the team are skipped.
pub fn shape_series(table: &TrackingTable, team_id: &str) -> Vec<ShapeSample> {
    table
        .frames()
        .into_iter()
        .filter_map(|slice| {
            let (xs, ys): (Vec<f64>, Vec<f64>) = slice
                .rows
                .iter()
                .filter(|r| r.team_id.as_deref() == Some(team_id))
                .map(|r| (r.x, r.y))
                .unzip();
            if xs.is_empty() {
                return None;
            }
            Some(ShapeSample {
                period: slice.period,
                frame: slice.frame,
                timestamp: slice.timestamp,
                shape: team_shape(&xs, &ys),
            })
        })
        .collect()
}
