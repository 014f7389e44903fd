//! Generic CSV tracking/event loaders (Metrica-style exports).
//!
//! First row is the header. No schema validation; ragged rows are kept as-is.

use crate::error::IngestError;
use std::path::Path;

/// Header plus raw string records of a CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell values of a named column; short rows yield `None`.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(
            self.records
                .iter()
                .map(|r| r.get(idx).map(String::as_str))
                .collect(),
        )
    }

    /// Named column coerced to numbers; empty or non-numeric cells are `None`.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let cells = self.column(name)?;
        Some(
            cells
                .into_iter()
                .map(|c| c.and_then(|s| s.trim().parse::<f64>().ok()))
                .collect(),
        )
    }
}

/// Read any CSV file with a header row.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable::new(headers, records))
}

/// Load a generic-provider tracking CSV.
pub fn load_tracking_csv(path: &Path) -> Result<CsvTable, IngestError> {
    read_csv_table(path)
}

/// Load a generic-provider events CSV.
pub fn load_events_csv(path: &Path) -> Result<CsvTable, IngestError> {
    read_csv_table(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EVENTS: &str = "\
Team,Type,Subtype,Period,Start Frame,Start Time [s],Start X,Start Y
Home,SET PIECE,KICK OFF,1,1,0.04,0.5,0.5
Away,PASS,,1,25,1.0,0.4,
Home,BALL LOST,INTERCEPTION,1,100
";

    #[test]
    fn test_events_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        fs::write(&path, EVENTS).unwrap();

        let table = load_events_csv(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers()[1], "Type");
        assert_eq!(table.column_index("Start Frame"), Some(4));

        let types = table.column("Type").unwrap();
        assert_eq!(types, vec![Some("SET PIECE"), Some("PASS"), Some("BALL LOST")]);

        let start_y = table.numeric_column("Start Y").unwrap();
        assert_eq!(start_y, vec![Some(0.5), None, None]);
        assert!(table.column("Missing").is_none());
    }

    #[test]
    fn test_tracking_csv_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracking.csv");
        fs::write(&path, "Period,Frame,Time [s],Player1_x,Player1_y\n").unwrap();

        let table = load_tracking_csv(&path).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 5);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileAccess { .. }));
    }
}
