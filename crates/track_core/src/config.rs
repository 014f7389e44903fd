//! # Configuration
//!
//! Tunables for ingestion and rendering, loadable from YAML.
//!
//! ```rust
//! use track_core::config::ToolConfig;
//!
//! let cfg = ToolConfig::from_yaml_str("ingest:\n  default_frame_rate: 25.0\n").unwrap();
//! assert_eq!(cfg.ingest.default_frame_rate, 25.0);
//! assert_eq!(cfg.ingest.period_offset_secs, 2700.0);
//! ```

use crate::error::IngestError;
use crate::viz::PitchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seconds added per period beyond the first (45 minutes).
pub const DEFAULT_PERIOD_OFFSET_SECS: f64 = 2700.0;

/// Frame rate assumed when the metadata carries none (SkillCorner OpenData is 10 fps).
pub const DEFAULT_FRAME_RATE: f64 = 10.0;

/// Tracking normalizer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Fallback frame rate (frames per second) for frame-index timestamps
    pub default_frame_rate: f64,
    /// Offset applied per period: (period - 1) * period_offset_secs
    pub period_offset_secs: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_frame_rate: DEFAULT_FRAME_RATE,
            period_offset_secs: DEFAULT_PERIOD_OFFSET_SECS,
        }
    }
}

impl IngestConfig {
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        self.default_frame_rate = fps;
        self
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub ingest: IngestConfig,
    pub pitch: PitchConfig,
}

impl ToolConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, IngestError> {
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|source| IngestError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::{Orientation, PitchType};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = ToolConfig::default();
        assert_eq!(cfg.ingest.default_frame_rate, 10.0);
        assert_eq!(cfg.ingest.period_offset_secs, 2700.0);
        assert_eq!(cfg.pitch.pitch_type, PitchType::StatsBomb);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "pitch:\n  orientation: vertical\n  pitch_type: uefa\n  dpi: 72\n";
        let cfg = ToolConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.pitch.orientation, Orientation::Vertical);
        assert_eq!(cfg.pitch.pitch_type, PitchType::Uefa);
        assert_eq!(cfg.pitch.dpi, 72);
        assert_eq!(cfg.pitch.figsize, (10.0, 6.0));
        assert_eq!(cfg.ingest, IngestConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ingest:\n  default_frame_rate: 25").unwrap();
        let cfg = ToolConfig::load(file.path()).unwrap();
        assert_eq!(cfg.ingest.default_frame_rate, 25.0);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ingest: [unclosed").unwrap();
        let err = ToolConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Config { .. }));
    }
}
