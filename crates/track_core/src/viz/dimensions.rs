//! Pitch configuration and provider coordinate conventions.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default physical pitch size (metres)
pub const DEFAULT_LENGTH_M: f64 = 105.0;
pub const DEFAULT_WIDTH_M: f64 = 68.0;

/// Marking sizes (metres)
pub const CENTER_CIRCLE_RADIUS: f64 = 9.15;
pub const PENALTY_AREA_DEPTH: f64 = 16.5;
pub const PENALTY_AREA_WIDTH: f64 = 40.32;
pub const GOAL_AREA_DEPTH: f64 = 5.5;
pub const GOAL_AREA_WIDTH: f64 = 18.32;
pub const PENALTY_SPOT_DISTANCE: f64 = 11.0;
pub const GOAL_WIDTH: f64 = 7.32;
pub const GOAL_DEPTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Goals left and right
    #[default]
    #[serde(alias = "h")]
    Horizontal,
    /// Goals top and bottom
    #[serde(alias = "v")]
    Vertical,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(Orientation::Horizontal),
            "v" | "vertical" => Ok(Orientation::Vertical),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}

/// Provider coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchType {
    /// 120 x 80, y downwards
    #[default]
    StatsBomb,
    /// 100 x 100, y upwards
    Opta,
    /// 100 x 100, y downwards
    Wyscout,
    /// metres, origin bottom-left
    Uefa,
    /// 0-1 on both axes, y downwards
    Metricasports,
    /// metres, origin at the centre spot
    Skillcorner,
    /// centimetres, origin at the centre spot
    Tracab,
    /// metres, origin bottom-left; needs explicit dimensions
    Custom,
}

impl PitchType {
    pub const ALL: [PitchType; 8] = [
        PitchType::StatsBomb,
        PitchType::Opta,
        PitchType::Wyscout,
        PitchType::Uefa,
        PitchType::Metricasports,
        PitchType::Skillcorner,
        PitchType::Tracab,
        PitchType::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PitchType::StatsBomb => "statsbomb",
            PitchType::Opta => "opta",
            PitchType::Wyscout => "wyscout",
            PitchType::Uefa => "uefa",
            PitchType::Metricasports => "metricasports",
            PitchType::Skillcorner => "skillcorner",
            PitchType::Tracab => "tracab",
            PitchType::Custom => "custom",
        }
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        PitchType::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| format!("unknown pitch type: {s}"))
    }
}

/// Renderer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub orientation: Orientation,
    pub pitch_type: PitchType,
    /// Physical length in metres; used only together with `pitch_width`
    pub pitch_length: Option<f64>,
    pub pitch_width: Option<f64>,
    /// Canvas size in inches (width, height)
    pub figsize: (f64, f64),
    /// Raster resolution used on save
    pub dpi: u32,
    pub line_color: String,
    pub background: String,
    /// Margin around the pitch as a fraction of each axis extent
    pub pad: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            pitch_type: PitchType::StatsBomb,
            pitch_length: None,
            pitch_width: None,
            figsize: (10.0, 6.0),
            dpi: 200,
            line_color: "#111111".to_string(),
            background: "#ffffff".to_string(),
            pad: 0.04,
        }
    }
}

impl PitchConfig {
    /// Both physical dimensions, if both were given.
    pub fn explicit_dimensions(&self) -> Option<(f64, f64)> {
        match (self.pitch_length, self.pitch_width) {
            (Some(l), Some(w)) => Some((l, w)),
            _ => None,
        }
    }
}

/// Coordinate extents of a pitch type plus its physical size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchDimensions {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub length_m: f64,
    pub width_m: f64,
    /// Provider y grows towards the bottom of the drawing
    pub invert_y: bool,
}

impl PitchDimensions {
    pub fn resolve(pitch_type: PitchType, explicit: Option<(f64, f64)>) -> Result<Self, RenderError> {
        if pitch_type == PitchType::Custom && explicit.is_none() {
            return Err(RenderError::MissingDimensions(pitch_type.to_string()));
        }
        let (length_m, width_m) = explicit.unwrap_or((DEFAULT_LENGTH_M, DEFAULT_WIDTH_M));
        let fixed = |x_max: f64, y_max: f64, invert_y: bool| Self {
            x_min: 0.0,
            x_max,
            y_min: 0.0,
            y_max,
            length_m,
            width_m,
            invert_y,
        };
        let centred = |scale: f64| Self {
            x_min: -length_m / 2.0 * scale,
            x_max: length_m / 2.0 * scale,
            y_min: -width_m / 2.0 * scale,
            y_max: width_m / 2.0 * scale,
            length_m,
            width_m,
            invert_y: false,
        };

        Ok(match pitch_type {
            PitchType::StatsBomb => fixed(120.0, 80.0, true),
            PitchType::Opta => fixed(100.0, 100.0, false),
            PitchType::Wyscout => fixed(100.0, 100.0, true),
            PitchType::Metricasports => fixed(1.0, 1.0, true),
            PitchType::Uefa | PitchType::Custom => fixed(length_m, width_m, false),
            PitchType::Skillcorner => centred(1.0),
            PitchType::Tracab => centred(100.0),
        })
    }

    pub fn x_extent(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn y_extent(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Metres from the bottom-left corner to drawing coordinates.
    pub fn metres_to_drawing(&self, mx: f64, my: f64) -> (f64, f64) {
        (
            self.x_min + mx / self.length_m * self.x_extent(),
            self.y_min + my / self.width_m * self.y_extent(),
        )
    }

    /// Provider coordinates to drawing coordinates (undoes a downward y axis).
    pub fn provider_to_drawing(&self, x: f64, y: f64) -> (f64, f64) {
        if self.invert_y {
            (x, self.y_min + self.y_max - y)
        } else {
            (x, y)
        }
    }

    /// Pitch markings as polylines in drawing coordinates.
    pub fn markings(&self) -> Vec<Vec<(f64, f64)>> {
        let (l, w) = (self.length_m, self.width_m);
        let mid_y = w / 2.0;
        let mut lines_m: Vec<Vec<(f64, f64)>> = vec![
            vec![(0.0, 0.0), (l, 0.0), (l, w), (0.0, w), (0.0, 0.0)],
            vec![(l / 2.0, 0.0), (l / 2.0, w)],
            arc((l / 2.0, mid_y), CENTER_CIRCLE_RADIUS, 0.0, std::f64::consts::TAU),
        ];

        for (goal_line, dir) in [(0.0, 1.0), (l, -1.0)] {
            let boxed = |depth: f64, width: f64| {
                vec![
                    (goal_line, mid_y - width / 2.0),
                    (goal_line + dir * depth, mid_y - width / 2.0),
                    (goal_line + dir * depth, mid_y + width / 2.0),
                    (goal_line, mid_y + width / 2.0),
                ]
            };
            lines_m.push(boxed(PENALTY_AREA_DEPTH, PENALTY_AREA_WIDTH));
            lines_m.push(boxed(GOAL_AREA_DEPTH, GOAL_AREA_WIDTH));
            lines_m.push(boxed(-GOAL_DEPTH, GOAL_WIDTH));

            // penalty arc: the part of the spot circle outside the area
            let spot_x = goal_line + dir * PENALTY_SPOT_DISTANCE;
            let half = ((PENALTY_AREA_DEPTH - PENALTY_SPOT_DISTANCE) / CENTER_CIRCLE_RADIUS).acos();
            let facing = if dir > 0.0 { 0.0 } else { std::f64::consts::PI };
            lines_m.push(arc(
                (spot_x, mid_y),
                CENTER_CIRCLE_RADIUS,
                facing - half,
                facing + half,
            ));
        }

        lines_m
            .into_iter()
            .map(|line| line.into_iter().map(|(x, y)| self.metres_to_drawing(x, y)).collect())
            .collect()
    }

    /// Centre spot and penalty spots in drawing coordinates.
    pub fn spots(&self) -> Vec<(f64, f64)> {
        let (l, w) = (self.length_m, self.width_m);
        [
            (l / 2.0, w / 2.0),
            (PENALTY_SPOT_DISTANCE, w / 2.0),
            (l - PENALTY_SPOT_DISTANCE, w / 2.0),
        ]
        .into_iter()
        .map(|(x, y)| self.metres_to_drawing(x, y))
        .collect()
    }
}

fn arc(centre: (f64, f64), radius: f64, from: f64, to: f64) -> Vec<(f64, f64)> {
    const SEGMENTS: usize = 64;
    (0..=SEGMENTS)
        .map(|i| {
            let angle = from + (to - from) * i as f64 / SEGMENTS as f64;
            (centre.0 + radius * angle.cos(), centre.1 + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_statsbomb_extents() {
        let dims = PitchDimensions::resolve(PitchType::StatsBomb, None).unwrap();
        assert_eq!((dims.x_max, dims.y_max), (120.0, 80.0));
        assert!(dims.invert_y);
        assert!(approx(dims.metres_to_drawing(52.5, 34.0), (60.0, 40.0)));
        assert_eq!(dims.provider_to_drawing(10.0, 0.0), (10.0, 80.0));
    }

    #[test]
    fn test_explicit_dimensions_override() {
        let dims = PitchDimensions::resolve(PitchType::Uefa, Some((100.0, 64.0))).unwrap();
        assert_eq!((dims.x_max, dims.y_max), (100.0, 64.0));

        let sc = PitchDimensions::resolve(PitchType::Skillcorner, Some((104.0, 68.0))).unwrap();
        assert_eq!((sc.x_min, sc.x_max), (-52.0, 52.0));
        assert!(approx(sc.metres_to_drawing(52.0, 34.0), (0.0, 0.0)));

        let tracab = PitchDimensions::resolve(PitchType::Tracab, None).unwrap();
        assert_eq!(tracab.x_max, 5250.0);
    }

    #[test]
    fn test_custom_needs_dimensions() {
        let err = PitchDimensions::resolve(PitchType::Custom, None).unwrap_err();
        assert!(matches!(err, RenderError::MissingDimensions(_)));
        assert!(PitchDimensions::resolve(PitchType::Custom, Some((90.0, 60.0))).is_ok());
    }

    #[test]
    fn test_config_needs_both_dimensions() {
        let cfg = PitchConfig {
            pitch_length: Some(100.0),
            ..Default::default()
        };
        assert_eq!(cfg.explicit_dimensions(), None);
    }

    #[test]
    fn test_markings_inside_padded_pitch() {
        let dims = PitchDimensions::resolve(PitchType::Opta, None).unwrap();
        let markings = dims.markings();
        // outline, halfway, centre circle, then box/six-yard/goal/arc per end
        assert_eq!(markings.len(), 3 + 2 * 4);
        let goal_overhang = GOAL_DEPTH / DEFAULT_LENGTH_M * 100.0 + 1e-9;
        for (x, y) in markings.into_iter().flatten() {
            assert!(x >= -goal_overhang && x <= 100.0 + goal_overhang);
            assert!((0.0..=100.0).contains(&y));
        }
        assert_eq!(dims.spots().len(), 3);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("StatsBomb".parse::<PitchType>(), Ok(PitchType::StatsBomb));
        assert_eq!("tracab".parse::<PitchType>(), Ok(PitchType::Tracab));
        assert!("rugby".parse::<PitchType>().is_err());
        assert_eq!("v".parse::<Orientation>(), Ok(Orientation::Vertical));
    }
}
