use crate::error::{LoadError, Result};
use crate::source::RowSource;
use custlink_core::RawRow;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RowSource for JsonSource {
    fn source_name(&self) -> &'static str {
        "json"
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        let data = fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_json(&data)
    }
}

/// Reads an array of objects, one per row. Scalars become cell text; nulls are absent.
pub fn parse_json(data: &str) -> Result<Vec<RawRow>> {
    let value: Value = serde_json::from_str(data)?;
    let Value::Array(items) = value else {
        return Err(LoadError::Parse("expected a json array of rows".to_string()));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(LoadError::Parse(format!("row {index}: expected an object")));
        };
        let mut row = RawRow::new();
        for (header, value) in fields {
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                other => other.to_string(),
            };
            row.insert(&header, text);
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::parse_json;
    use crate::error::LoadError;

    #[test]
    fn parse_json_renders_scalars_as_text() {
        let data = r#"[
            {"user_phone_number": 6364682957, "order_value": 200.5, "user_name": null, "paid": true}
        ]"#;
        let rows = parse_json(data).expect("parse json");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("user_phone_number"), Some("6364682957"));
        assert_eq!(rows[0].get("order_value"), Some("200.5"));
        assert_eq!(rows[0].get("user_name"), None);
        assert_eq!(rows[0].get("paid"), Some("true"));
    }

    #[test]
    fn parse_json_requires_array_of_objects() {
        assert!(matches!(
            parse_json(r#"{"a": 1}"#),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(parse_json("[1, 2]"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_json("not json"), Err(LoadError::Json(_))));
    }
}
