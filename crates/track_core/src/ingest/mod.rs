//! # Ingest Module
//!
//! Reading provider files into in-memory tables.
//!
//! ## Submodules
//!
//! - `tracking` - frame-based JSON tracking normalizer (SkillCorner-style)
//! - `timestamp` - time value resolution (seconds, clock strings, frame/fps)
//! - `fields` - ordered candidate-key lookup and value coercion
//! - `table` - the normalized eight-column observation table
//! - `csv_table` - generic CSV tracking/event loaders (Metrica-style)
//! - `discovery` - recursive file listing by glob pattern

pub mod csv_table;
pub mod discovery;
pub mod fields;
pub mod table;
pub mod timestamp;
pub mod tracking;

pub use csv_table::{load_events_csv, load_tracking_csv, read_csv_table, CsvTable};
pub use discovery::list_files;
pub use table::{FrameSlice, ObservationRow, TrackingTable, COLUMNS};
pub use tracking::{
    load_tracking, load_tracking_with_stats, normalize_document, IngestStats, Metadata,
    METADATA_FILE, STRUCTURED_DATA_FILE,
};
