//! Normalized observation table.

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column names of the normalized table, in output order.
pub const COLUMNS: [&str; 8] = [
    "timestamp",
    "period",
    "frame",
    "entity_id",
    "team_id",
    "x",
    "y",
    "speed",
];

/// One entity observation flattened out of its frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    /// Seconds on the match clock (period offset applied)
    pub timestamp: Option<f64>,
    pub period: Option<i64>,
    pub frame: Option<i64>,
    pub entity_id: Option<String>,
    pub team_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub speed: Option<f64>,
}

/// Rows of one source frame.
#[derive(Debug, Clone)]
pub struct FrameSlice<'a> {
    pub period: Option<i64>,
    pub frame: Option<i64>,
    pub timestamp: Option<f64>,
    pub rows: &'a [ObservationRow],
}

/// Normalized tracking table (always the eight `COLUMNS`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingTable {
    rows: Vec<ObservationRow>,
}

impl TrackingTable {
    pub fn new(rows: Vec<ObservationRow>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ObservationRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consecutive runs of rows sharing `(period, frame)`.
    ///
    /// Rows are emitted frame by frame, so each run is one source frame.
    pub fn frames(&self) -> Vec<FrameSlice<'_>> {
        let mut slices = Vec::new();
        let mut start = 0;
        while start < self.rows.len() {
            let head = &self.rows[start];
            let len = self.rows[start..]
                .iter()
                .take_while(|r| r.period == head.period && r.frame == head.frame)
                .count();
            slices.push(FrameSlice {
                period: head.period,
                frame: head.frame,
                timestamp: head.timestamp,
                rows: &self.rows[start..start + len],
            });
            start += len;
        }
        slices
    }

    /// Rows for a single frame index (first matching run).
    pub fn frame(&self, frame: i64) -> Option<FrameSlice<'_>> {
        self.frames().into_iter().find(|s| s.frame == Some(frame))
    }

    /// Write the table as CSV with a header row; missing values are empty cells.
    pub fn write_csv(&self, path: &Path) -> Result<(), IngestError> {
        let csv_err = |source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_err)?;
        writer.write_record(COLUMNS).map_err(csv_err)?;
        for row in &self.rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| IngestError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
    }
}
