use crate::csv_source::CsvSource;
use crate::error::{LoadError, Result};
use crate::json_source::JsonSource;
use custlink_core::RawRow;
use std::path::Path;

pub trait RowSource {
    fn source_name(&self) -> &'static str;
    fn fetch_rows(&self) -> Result<Vec<RawRow>>;
}

/// Picks a source for `path` by file extension.
pub fn open_source(path: &Path) -> Result<Box<dyn RowSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("json") => Ok(Box::new(JsonSource::new(path))),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let source = open_source(path)?;
    let rows = source.fetch_rows()?;
    tracing::debug!(
        source = source.source_name(),
        path = %path.display(),
        rows = rows.len(),
        "rows loaded"
    );
    Ok(rows)
}
