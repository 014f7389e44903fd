//! # Tracking Normalizer
//!
//! Converts a frame-based JSON tracking document (SkillCorner OpenData and
//! look-alikes) plus its optional sidecar `match_data.json` into the
//! eight-column `TrackingTable` and a merged metadata map.
//!
//! Only an unreadable or non-JSON primary file is an error. Everything below
//! that degrades: unknown shapes give no rows, bad fields become `None`.

use super::fields::{self, as_frame_index, as_identifier, as_integer, as_number};
use super::table::{ObservationRow, TrackingTable};
use super::timestamp::{apply_period_offset, to_seconds};
use crate::config::IngestConfig;
use crate::error::IngestError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Primary file name when a match directory is given.
pub const STRUCTURED_DATA_FILE: &str = "structured_data.json";
/// Sidecar metadata file name, sibling of the primary file.
pub const METADATA_FILE: &str = "match_data.json";

/// Merged session metadata (sidecar fields win over top-level fields).
pub type Metadata = Map<String, Value>;

const NO_FRAMES: &[Value] = &[];

/// Counters collected while normalizing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub frames_seen: usize,
    /// Non-object frames and frames without an entity list
    pub frames_skipped: usize,
    pub frames_without_time: usize,
    pub entities_seen: usize,
    /// Rows removed because x or y did not resolve
    pub rows_dropped: usize,
}

/// Observation before the coordinate filter.
struct PendingRow {
    timestamp: Option<f64>,
    period: Option<i64>,
    frame: Option<i64>,
    entity_id: Option<String>,
    team_id: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    speed: Option<f64>,
}

impl PendingRow {
    fn resolve(self) -> Option<ObservationRow> {
        Some(ObservationRow {
            timestamp: self.timestamp,
            period: self.period,
            frame: self.frame,
            entity_id: self.entity_id,
            team_id: self.team_id,
            x: self.x?,
            y: self.y?,
            speed: self.speed,
        })
    }
}

/// Load a tracking document from a match directory or a primary file path.
pub fn load_tracking(
    path: &Path,
    config: &IngestConfig,
) -> Result<(TrackingTable, Metadata), IngestError> {
    let (table, meta, stats) = load_tracking_with_stats(path, config)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        frames = stats.frames_seen,
        dropped = stats.rows_dropped,
        "tracking document normalized"
    );
    Ok((table, meta))
}

/// Like [`load_tracking`], also returning the ingestion counters.
pub fn load_tracking_with_stats(
    path: &Path,
    config: &IngestConfig,
) -> Result<(TrackingTable, Metadata, IngestStats), IngestError> {
    let data_path = primary_path(path);
    let meta_path = data_path.with_file_name(METADATA_FILE);

    let text = std::fs::read_to_string(&data_path).map_err(|source| IngestError::FileAccess {
        path: data_path.clone(),
        source,
    })?;
    let root: Value = serde_json::from_str(&text).map_err(|source| IngestError::Decode {
        path: data_path.clone(),
        source,
    })?;

    let sidecar = read_sidecar(&meta_path);
    Ok(normalize_document(&root, sidecar.as_ref(), config))
}

fn primary_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(STRUCTURED_DATA_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Sidecar metadata; any failure means "no sidecar".
fn read_sidecar(path: &Path) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(path = %path.display(), %err, "ignoring unreadable metadata sidecar");
            None
        }
    }
}

/// Normalize an in-memory tracking document.
///
/// `sidecar` fields override the document's own top-level fields when it is
/// a JSON object; any other sidecar value is ignored.
pub fn normalize_document(
    root: &Value,
    sidecar: Option<&Value>,
    config: &IngestConfig,
) -> (TrackingTable, Metadata, IngestStats) {
    let (frames, mut meta) = split_document(root);

    if let Some(Value::Object(extra)) = sidecar {
        for (key, value) in extra {
            meta.insert(key.clone(), value.clone());
        }
    }

    let frame_rate = resolve_frame_rate(&meta, config.default_frame_rate);
    if frame_rate.is_none() {
        debug!("frame rate in metadata is not a positive number; frame-derived times disabled");
    }
    let mut stats = IngestStats::default();
    let mut pending = Vec::new();

    for frame in frames {
        stats.frames_seen += 1;
        let Some(frame) = frame.as_object() else {
            stats.frames_skipped += 1;
            continue;
        };

        let period = fields::first_present(frame, fields::PERIOD_KEYS).and_then(as_integer);
        let frame_raw = fields::first_present(frame, fields::FRAME_INDEX_KEYS);
        let frame_no = frame_raw.and_then(as_frame_index);
        let time_raw = fields::first_present(frame, fields::TIME_KEYS);

        // fractional frame indices still time the frame
        let timestamp = to_seconds(time_raw, frame_raw.and_then(as_number), frame_rate)
            .map(|secs| apply_period_offset(secs, period, config.period_offset_secs));
        if timestamp.is_none() {
            stats.frames_without_time += 1;
        }

        let Some(entities) =
            fields::first_present(frame, fields::ENTITY_LIST_KEYS).and_then(Value::as_array)
        else {
            stats.frames_skipped += 1;
            continue;
        };

        for entity in entities.iter().filter_map(Value::as_object) {
            stats.entities_seen += 1;
            pending.push(PendingRow {
                timestamp,
                period,
                frame: frame_no,
                entity_id: fields::first_present(entity, fields::ENTITY_ID_KEYS)
                    .and_then(as_identifier),
                team_id: fields::first_present(entity, fields::TEAM_ID_KEYS)
                    .and_then(as_identifier),
                x: fields::coordinate(entity, "x").and_then(as_number),
                y: fields::coordinate(entity, "y").and_then(as_number),
                speed: fields::first_present(entity, fields::SPEED_KEYS).and_then(as_number),
            });
        }
    }

    let assembled = pending.len();
    let rows: Vec<ObservationRow> = pending.into_iter().filter_map(PendingRow::resolve).collect();
    stats.rows_dropped = assembled - rows.len();

    (TrackingTable::new(rows), meta, stats)
}

/// Frame sequence and top-level metadata of a document.
///
/// The key holding the frames is not copied into the metadata.
fn split_document(root: &Value) -> (&[Value], Metadata) {
    match root {
        Value::Array(frames) => (frames.as_slice(), Metadata::new()),
        Value::Object(obj) => {
            let found = fields::first_present_entry(obj, fields::FRAME_SEQUENCE_KEYS);
            let frames = found
                .and_then(|(_, v)| v.as_array())
                .map(Vec::as_slice)
                .unwrap_or(NO_FRAMES);
            let frames_key = found.map(|(key, _)| key);
            let meta = obj
                .iter()
                .filter(|(key, _)| Some(key.as_str()) != frames_key)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            (frames, meta)
        }
        _ => (NO_FRAMES, Metadata::new()),
    }
}

/// Metadata frame rate, else `default`.
///
/// A rate that is present but not a positive number gives `None`, so frames
/// without an explicit time stay untimed.
fn resolve_frame_rate(meta: &Metadata, default: f64) -> Option<f64> {
    match fields::first_present(meta, fields::FRAME_RATE_KEYS) {
        Some(raw) => as_number(raw).filter(|fps| *fps > 0.0),
        None => Some(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(root: Value) -> (TrackingTable, Metadata, IngestStats) {
        normalize_document(&root, None, &IngestConfig::default())
    }

    #[test]
    fn test_bare_array_rows() {
        let doc = json!([
            {"frame": 1, "timestamp": 0.1, "data": [
                {"id": 1, "team_id": "A", "x": 10.0, "y": 20.0},
                {"id": 2, "team_id": "B", "x": 30.0, "y": 40.0}
            ]},
            {"frame": 2, "timestamp": 0.2, "data": [
                {"id": 1, "team_id": "A", "x": 11.0, "y": 21.0},
                {"id": 2, "team_id": "B", "x": 31.0, "y": 41.0}
            ]}
        ]);
        let (table, meta, stats) = normalize(doc);
        assert_eq!(table.len(), 4);
        assert!(meta.is_empty());
        assert_eq!(stats.frames_seen, 2);
        assert_eq!(stats.rows_dropped, 0);
        let first = &table.rows()[0];
        assert_eq!(first.entity_id.as_deref(), Some("1"));
        assert_eq!(first.team_id.as_deref(), Some("A"));
        assert_eq!(first.timestamp, Some(0.1));
    }

    #[test]
    fn test_clock_timestamp_with_period() {
        let doc = json!({"frames": [
            {"period": 2, "time": "01:23", "players": [{"id": "p", "x": 1, "y": 2}]}
        ]});
        let (table, _, _) = normalize(doc);
        assert_eq!(table.rows()[0].timestamp, Some(83.0 + 2700.0));
        assert_eq!(table.rows()[0].period, Some(2));
    }

    #[test]
    fn test_frame_rate_fallback() {
        let doc = json!([{"frame_id": 50, "entities": [{"id": 1, "x": 0.5, "y": 0.5}]}]);
        let (table, _, _) = normalize(doc);
        assert_eq!(table.rows()[0].timestamp, Some(5.0));
        assert_eq!(table.rows()[0].frame, Some(50));
    }

    #[test]
    fn test_frame_rate_from_metadata() {
        let doc = json!({
            "fps": "25",
            "samples": [{"frame": 50, "objects": [{"id": 1, "x": 0.0, "y": 0.0}]}]
        });
        let (table, meta, _) = normalize(doc);
        assert_eq!(table.rows()[0].timestamp, Some(2.0));
        assert_eq!(meta.get("fps"), Some(&json!("25")));
        assert!(!meta.contains_key("samples"));
    }

    #[test]
    fn test_sidecar_overrides_top_level() {
        let doc = json!({"frame_rate": 5, "competition": "x", "frames": [
            {"frame": 50, "data": [{"id": 1, "x": 1.0, "y": 1.0}]}
        ]});
        let sidecar = json!({"frame_rate": 25, "home": "Team A"});
        let (table, meta, _) = normalize_document(&doc, Some(&sidecar), &IngestConfig::default());
        assert_eq!(meta.get("frame_rate"), Some(&json!(25)));
        assert_eq!(meta.get("competition"), Some(&json!("x")));
        assert_eq!(meta.get("home"), Some(&json!("Team A")));
        assert_eq!(table.rows()[0].timestamp, Some(2.0));
    }

    #[test]
    fn test_non_object_sidecar_ignored() {
        let doc = json!({"frame_rate": 5, "frames": []});
        let sidecar = json!([1, 2, 3]);
        let (_, meta, _) = normalize_document(&doc, Some(&sidecar), &IngestConfig::default());
        assert_eq!(meta.get("frame_rate"), Some(&json!(5)));
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        assert!(normalize(json!({"matches": []})).0.is_empty());
        assert!(normalize(json!(42)).0.is_empty());
        assert!(normalize(json!({"frames": {"0": {}}})).0.is_empty());
    }

    #[test]
    fn test_missing_coordinates_dropped() {
        let doc = json!([{"frame": 1, "data": [
            {"id": 1, "speed": 3.2},
            {"id": 2, "position": {"x": 4.0, "y": 5.0}},
            {"id": 3, "coordinates": {"x": 6.0}},
            {"id": 4, "x": "left", "y": 1.0}
        ]}]);
        let (table, _, stats) = normalize(doc);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].entity_id.as_deref(), Some("2"));
        assert_eq!(stats.entities_seen, 4);
        assert_eq!(stats.rows_dropped, 3);
    }

    #[test]
    fn test_zero_values_are_kept() {
        let doc = json!([{"frame": 0, "timestamp": 0, "data": [
            {"id": 0, "team_id": 0, "teamId": 9, "x": 0, "y": 0.0, "speed": 0, "v": 7.0}
        ]}]);
        let (table, _, _) = normalize(doc);
        let row = &table.rows()[0];
        assert_eq!(row.entity_id.as_deref(), Some("0"));
        assert_eq!(row.team_id.as_deref(), Some("0"));
        assert_eq!((row.x, row.y), (0.0, 0.0));
        assert_eq!(row.speed, Some(0.0));
        assert_eq!(row.timestamp, Some(0.0));
        assert_eq!(row.frame, Some(0));
    }

    #[test]
    fn test_soft_failures_become_missing() {
        let doc = json!([
            "not a frame",
            {"frame": 3, "timestamp": "whenever", "period": "first", "data": [
                {"team": [1], "x": 1.0, "y": 2.0, "speed": "quick"},
                "not an entity"
            ]},
            {"frame": 4, "data": {"id": 1}}
        ]);
        let (table, _, stats) = normalize(doc);
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.period, None);
        assert_eq!(row.timestamp, Some(0.3));
        assert_eq!(row.entity_id, None);
        assert_eq!(row.team_id, None);
        assert_eq!(row.speed, None);
        assert_eq!(stats.frames_skipped, 2);
    }

    #[test]
    fn test_unresolved_timestamp_keeps_rows() {
        let doc = json!([{"period": 2, "data": [{"id": 1, "x": 1.0, "y": 1.0}]}]);
        let (table, _, stats) = normalize(doc);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].timestamp, None);
        assert_eq!(table.rows()[0].period, Some(2));
        assert_eq!(stats.frames_without_time, 1);
    }

    #[test]
    fn test_unusable_frame_rate_leaves_frames_untimed() {
        let doc = json!({"fps": "abc", "frames": [
            {"frame": 50, "data": [{"id": 1, "x": 1.0, "y": 1.0}]},
            {"frame": 51, "time": "00:05", "data": [{"id": 1, "x": 2.0, "y": 1.0}]}
        ]});
        let (table, _, stats) = normalize(doc);
        assert_eq!(table.rows()[0].timestamp, None);
        assert_eq!(table.rows()[0].frame, Some(50));
        assert_eq!(table.rows()[1].timestamp, Some(5.0));
        assert_eq!(stats.frames_without_time, 1);

        let zero = json!({"frame_rate": 0, "frames": [
            {"frame": 50, "data": [{"id": 1, "x": 1.0, "y": 1.0}]}
        ]});
        assert_eq!(normalize(zero).0.rows()[0].timestamp, None);
    }

    #[test]
    fn test_fractional_frame_is_timed_but_not_indexed() {
        let doc = json!([{"frame": 50.5, "data": [{"id": 1, "x": 1.0, "y": 1.0}]}]);
        let (table, _, _) = normalize(doc);
        let row = &table.rows()[0];
        assert_eq!(row.frame, None);
        assert!((row.timestamp.unwrap() - 5.05).abs() < 1e-9);
    }

    #[test]
    fn test_config_frame_rate_default() {
        let doc = json!([{"frame": 50, "data": [{"id": 1, "x": 1.0, "y": 1.0}]}]);
        let config = IngestConfig::default().with_frame_rate(25.0);
        let (table, _, _) = normalize_document(&doc, None, &config);
        assert_eq!(table.rows()[0].timestamp, Some(2.0));
    }
}
