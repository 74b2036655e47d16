pub mod csv_source;
pub mod error;
pub mod json_source;
pub mod source;

pub use csv_source::CsvSource;
pub use error::{LoadError, Result};
pub use json_source::JsonSource;
pub use source::{load_rows, open_source, RowSource};
