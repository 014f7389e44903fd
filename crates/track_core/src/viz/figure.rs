//! Pitch drawing and image output.

use super::dimensions::{Orientation, PitchConfig, PitchDimensions};
use crate::error::RenderError;
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Family name the bundled title font is registered under.
const TITLE_FONT: &str = "sans-serif";

static TITLE_FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static TITLE_FONT_READY: Lazy<bool> =
    Lazy::new(|| register_font(TITLE_FONT, FontStyle::Normal, TITLE_FONT_BYTES).is_ok());

fn ensure_title_font() -> Result<(), RenderError> {
    if *TITLE_FONT_READY {
        Ok(())
    } else {
        Err(RenderError::Drawing("bundled title font could not be loaded".to_string()))
    }
}

/// Configured pitch with resolved dimensions.
#[derive(Debug, Clone)]
pub struct Pitch {
    config: PitchConfig,
    dims: PitchDimensions,
}

impl Pitch {
    pub fn new(config: PitchConfig) -> Result<Self, RenderError> {
        let dims = PitchDimensions::resolve(config.pitch_type, config.explicit_dimensions())?;
        parse_color(&config.line_color)?;
        parse_color(&config.background)?;
        Ok(Self { config, dims })
    }

    pub fn config(&self) -> &PitchConfig {
        &self.config
    }

    pub fn dimensions(&self) -> &PitchDimensions {
        &self.dims
    }

    /// Start a figure with the pitch markings.
    pub fn draw(&self) -> PitchFigure {
        PitchFigure {
            pitch: self.clone(),
            title: None,
            layers: Vec::new(),
        }
    }

    /// Drawing coordinates to chart coordinates for the configured orientation.
    ///
    /// Vertical is a quarter turn counter-clockwise: the attacking direction
    /// points up and the left touchline stays on the left.
    fn to_chart(&self, (x, y): (f64, f64)) -> (f64, f64) {
        match self.config.orientation {
            Orientation::Horizontal => (x, y),
            Orientation::Vertical => (self.dims.y_min + self.dims.y_max - y, x),
        }
    }

    fn chart_ranges(&self) -> (Range<f64>, Range<f64>) {
        let pad_x = self.dims.x_extent() * self.config.pad;
        let pad_y = self.dims.y_extent() * self.config.pad;
        let xs = (self.dims.x_min - pad_x)..(self.dims.x_max + pad_x);
        let ys = (self.dims.y_min - pad_y)..(self.dims.y_max + pad_y);
        match self.config.orientation {
            Orientation::Horizontal => (xs, ys),
            Orientation::Vertical => (ys, xs),
        }
    }

    /// Canvas size in pixels at `dpi`.
    pub fn canvas_size(&self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.config.figsize;
        let px = |inches: f64| ((inches * dpi as f64).round() as u32).max(1);
        (px(w), px(h))
    }
}

struct ScatterLayer {
    points: Vec<(f64, f64)>,
    color: RGBColor,
}

/// A pitch plus overlays, ready to be saved.
pub struct PitchFigure {
    pitch: Pitch,
    title: Option<(String, f64)>,
    layers: Vec<ScatterLayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Raster,
    Svg,
}

impl PitchFigure {
    pub fn pitch(&self) -> &Pitch {
        &self.pitch
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(|(t, _)| t.as_str())
    }

    /// Figure title; `fontsize` is in points.
    pub fn add_title(&mut self, text: &str, fontsize: f64) {
        self.title = Some((text.to_string(), fontsize));
    }

    /// Overlay positions given in the pitch type's coordinates.
    pub fn scatter(&mut self, points: &[(f64, f64)], color: &str) -> Result<(), RenderError> {
        let color = parse_color(color)?;
        self.layers.push(ScatterLayer {
            points: points.to_vec(),
            color,
        });
        Ok(())
    }

    /// Save at the configured dpi; format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        self.save_with_dpi(path, self.pitch.config.dpi)
    }

    pub fn save_with_dpi(&self, path: &Path, dpi: u32) -> Result<(), RenderError> {
        let format = image_format(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let size = self.pitch.canvas_size(dpi);
        match format {
            ImageFormat::Raster => self.render(BitMapBackend::new(path, size).into_drawing_area(), dpi)?,
            ImageFormat::Svg => self.render(SVGBackend::new(path, size).into_drawing_area(), dpi)?,
        }
        debug!(path = %path.display(), width = size.0, height = size.1, "pitch saved");
        Ok(())
    }

    fn render<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        dpi: u32,
    ) -> Result<(), RenderError> {
        let pitch = &self.pitch;
        let scale = dpi as f64 / 100.0;
        let line_color = parse_color(&pitch.config.line_color)?;
        let background = parse_color(&pitch.config.background)?;
        let line_style = line_color.stroke_width(((2.0 * scale).round() as u32).max(1));

        root.fill(&background).map_err(drawing_err)?;
        let area = match &self.title {
            Some((text, points)) => {
                ensure_title_font()?;
                let px = points * dpi as f64 / 72.0;
                root.titled(text, (TITLE_FONT, px).into_font().color(&line_color))
                    .map_err(drawing_err)?
            }
            None => root,
        };

        let (x_range, y_range) = pitch.chart_ranges();
        let mut chart = ChartBuilder::on(&area)
            .margin((4.0 * scale).round() as u32)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_err)?;

        let lines: Vec<Vec<(f64, f64)>> = pitch
            .dims
            .markings()
            .into_iter()
            .map(|line| line.into_iter().map(|p| pitch.to_chart(p)).collect())
            .collect();
        chart
            .draw_series(lines.into_iter().map(|line| PathElement::new(line, line_style)))
            .map_err(drawing_err)?;

        let spot_radius = ((3.0 * scale).round() as u32).max(1);
        chart
            .draw_series(
                pitch
                    .dims
                    .spots()
                    .into_iter()
                    .map(|p| Circle::new(pitch.to_chart(p), spot_radius, line_color.filled())),
            )
            .map_err(drawing_err)?;

        let marker_radius = ((6.0 * scale).round() as u32).max(1);
        for layer in &self.layers {
            chart
                .draw_series(layer.points.iter().map(|&(x, y)| {
                    let p = pitch.to_chart(pitch.dims.provider_to_drawing(x, y));
                    Circle::new(p, marker_radius, layer.color.filled())
                }))
                .map_err(drawing_err)?;
        }

        area.present().map_err(drawing_err)?;
        Ok(())
    }
}

fn drawing_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn image_format(path: &Path) -> Result<ImageFormat, RenderError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "bmp" => Ok(ImageFormat::Raster),
        "svg" => Ok(ImageFormat::Svg),
        _ => Err(RenderError::UnsupportedFormat(path.display().to_string())),
    }
}

/// `#rgb`, `#rrggbb` or a handful of names.
pub fn parse_color(raw: &str) -> Result<RGBColor, RenderError> {
    let invalid = || RenderError::InvalidColor(raw.to_string());
    let named = match raw.to_ascii_lowercase().as_str() {
        "white" => Some(RGBColor(255, 255, 255)),
        "black" => Some(RGBColor(0, 0, 0)),
        "red" => Some(RGBColor(214, 39, 40)),
        "blue" => Some(RGBColor(31, 119, 180)),
        "green" => Some(RGBColor(44, 160, 44)),
        "orange" => Some(RGBColor(255, 127, 14)),
        "grass" => Some(RGBColor(58, 125, 68)),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Ok(RGBColor(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok(RGBColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => Err(invalid()),
    }
}
