//! Reference Loader: turns the delimited lookup tables (countries, airports,
//! airline call-sign prefixes) into key-value mappings and persists them as
//! JSON for the route pipeline.
//!
//! [`build_mapping`] is generic over a projection `Fn(&RawRow) -> Option<(key, value)>`;
//! returning `None` skips the row. [`projections`] holds the three projections
//! matching the source files, and [`ReferenceTables`] reads the persisted
//! mappings back.

pub mod projections;
mod tables;

pub use tables::{AirportEntry, ReferenceTables};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::output::write_json_atomic;

/// One row of a delimited source, addressable by header name or position.
pub struct RawRow<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Returns the field under `column`, or `None` if the header or the field is absent.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h.trim() == column)
            .and_then(|idx| self.record.get(idx))
    }

    /// Returns the first field regardless of its header.
    pub fn first(&self) -> Option<&'a str> {
        self.record.get(0)
    }
}

/// Result of streaming one reference table.
#[derive(Debug)]
pub struct ReferenceLoad<V> {
    pub entries: BTreeMap<String, V>,
    pub rows: usize,
    pub skipped: usize,
}

/// Streams `reader` row by row, projecting each into a `(key, value)` pair.
///
/// Later rows overwrite earlier ones with the same key. Rows the projection
/// rejects, and rows the CSV parser cannot decode, are skipped and counted.
///
/// # Errors
///
/// Returns an error only on an I/O failure of the underlying reader.
pub fn build_mapping<R, V, F>(reader: R, projection: F) -> Result<ReferenceLoad<V>>
where
    R: Read,
    F: Fn(&RawRow<'_>) -> Option<(String, V)>,
{
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut load = ReferenceLoad {
        entries: BTreeMap::new(),
        rows: 0,
        skipped: 0,
    };
    let mut record = StringRecord::new();

    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                load.rows += 1;
                load.skipped += 1;
                debug!(error = %e, "Unreadable reference row");
                continue;
            }
        }

        load.rows += 1;
        match projection(&RawRow::new(&headers, &record)) {
            Some((key, value)) => {
                load.entries.insert(key, value);
            }
            None => {
                load.skipped += 1;
                debug!(line = record.position().map(|p| p.line()), "Reference row skipped");
            }
        }
    }

    Ok(load)
}

/// Builds one mapping from the CSV at `source` and writes it as JSON to `destination`.
///
/// Returns the number of entries written.
#[tracing::instrument(skip(projection), fields(source = %source.display(), destination = %destination.display()))]
pub fn generate_mapping<V, F>(source: &Path, destination: &Path, projection: F) -> Result<usize>
where
    V: Serialize,
    F: Fn(&RawRow<'_>) -> Option<(String, V)>,
{
    let file = File::open(source)
        .with_context(|| format!("failed to open reference table {}", source.display()))?;
    let load = build_mapping(BufReader::new(file), projection)
        .with_context(|| format!("failed to read reference table {}", source.display()))?;

    if load.skipped > 0 {
        warn!(
            skipped = load.skipped,
            rows = load.rows,
            "Some reference rows could not be projected"
        );
    }

    write_json_atomic(destination, &load.entries)?;

    info!(entries = load.entries.len(), rows = load.rows, "Reference mapping written");
    Ok(load.entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_pair(row: &RawRow<'_>) -> Option<(String, String)> {
        let key = row.get("Code")?.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), row.get("Name")?.to_string()))
    }

    #[test]
    fn test_build_mapping_collects_rows() {
        let csv = "Code,Name\nJP,Japan\nUS,United States\n";
        let load = build_mapping(csv.as_bytes(), project_pair).unwrap();

        assert_eq!(load.rows, 2);
        assert_eq!(load.skipped, 0);
        assert_eq!(load.entries["JP"], "Japan");
        assert_eq!(load.entries["US"], "United States");
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let csv = "Code,Name\nJP,Nippon\nJP,Japan\n";
        let load = build_mapping(csv.as_bytes(), project_pair).unwrap();

        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries["JP"], "Japan");
    }

    #[test]
    fn test_rejected_rows_are_skipped_not_fatal() {
        let csv = "Code,Name\n,Nowhere\nJP\nFR,France\n";
        let load = build_mapping(csv.as_bytes(), project_pair).unwrap();

        assert_eq!(load.rows, 3);
        assert_eq!(load.skipped, 2);
        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries["FR"], "France");
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let mut bytes = b"Code,Name\nJP,Japan\n".to_vec();
        bytes.extend_from_slice(b"XX,\xff\xfe\n");
        bytes.extend_from_slice(b"FR,France\n");

        let load = build_mapping(bytes.as_slice(), project_pair).unwrap();

        assert_eq!(load.skipped, 1);
        assert_eq!(load.entries.len(), 2);
    }

    #[test]
    fn test_raw_row_lookup_by_header_and_position() {
        let headers = StringRecord::from(vec!["ICAO ", "OPERATOR"]);
        let record = StringRecord::from(vec!["KAL", "KOREAN AIR"]);
        let row = RawRow::new(&headers, &record);

        assert_eq!(row.get("ICAO"), Some("KAL"));
        assert_eq!(row.get("OPERATOR"), Some("KOREAN AIR"));
        assert_eq!(row.get("MISSING"), None);
        assert_eq!(row.first(), Some("KAL"));
    }

    #[test]
    fn test_generate_mapping_writes_sorted_json() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("isolist.csv");
        let destination = dir.path().join("countryCodes.json");
        std::fs::write(&source, "Code,Name\nUS,United States\nJP,Japan\n").unwrap();

        let written = generate_mapping(&source, &destination, project_pair).unwrap();

        assert_eq!(written, 2);
        let content = std::fs::read_to_string(&destination).unwrap();
        assert_eq!(content, r#"{"JP":"Japan","US":"United States"}"#);
    }

    #[test]
    fn test_generate_mapping_missing_source_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("absent.csv");
        let destination = dir.path().join("out.json");

        let err = generate_mapping(&source, &destination, project_pair).unwrap_err();

        assert!(format!("{err:#}").contains("absent.csv"));
        assert!(!destination.exists());
    }
}
