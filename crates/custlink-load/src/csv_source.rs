use crate::error::{LoadError, Result};
use crate::source::RowSource;
use custlink_core::RawRow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RowSource for CsvSource {
    fn source_name(&self) -> &'static str {
        "csv"
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        let file = File::open(&self.path).map_err(|source| LoadError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_csv(file)
    }
}

/// Reads a header row followed by data rows. Short rows are allowed; blank rows are skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if index == 0 {
                header.trim_start_matches(BOM).to_string()
            } else {
                header.to_string()
            }
        })
        .collect();
    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(LoadError::Parse("csv header row is empty".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.trim().is_empty())
            .map(|(header, value)| (header.as_str(), value))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
