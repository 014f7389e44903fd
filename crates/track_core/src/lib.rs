//! # track_core - Football Tracking Ingestion & Pitch Rendering
//!
//! Loads provider tracking/event data into a common table, computes team
//! shape metrics and draws pitch diagrams.
//!
//! ## Features
//! - Tolerant normalizer for frame-based JSON tracking documents
//! - Generic CSV tracking/event loaders
//! - Team centroid, length and width
//! - Pitch rendering to PNG/JPEG/BMP/SVG

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod viz;

pub use config::{IngestConfig, ToolConfig};
pub use error::{IngestError, RenderError, Result};
pub use ingest::{
    list_files, load_events_csv, load_tracking, load_tracking_csv, load_tracking_with_stats,
    normalize_document, read_csv_table, CsvTable, IngestStats, Metadata, ObservationRow,
    TrackingTable,
};
pub use metrics::{centroid, length, shape_series, team_shape, width, ShapeSample, TeamShape};
pub use viz::{Orientation, Pitch, PitchConfig, PitchDimensions, PitchFigure, PitchType};
