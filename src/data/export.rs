use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::RangeMatch;

/// Write table rows as a pretty-printed JSON array of records keyed by the
/// CSV column names.
pub fn write_records_json(path: &Path, rows: &[RangeMatch]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows).context("serializing table rows")?;
    writer.flush().context("flushing export")?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value as JsonValue};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn writes_records_with_column_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.json");
        let rows = vec![
            RangeMatch {
                model_year: 2019,
                make: "TESLA".into(),
                model: "MODEL 3".into(),
                electric_range: Some(220),
            },
            RangeMatch {
                model_year: 2023,
                make: "TESLA".into(),
                model: "MODEL Y".into(),
                electric_range: None,
            },
        ];

        write_records_json(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let written: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(
            written,
            json!([
                {"Model Year": 2019, "Make": "TESLA", "Model": "MODEL 3", "Electric Range": 220},
                {"Model Year": 2023, "Make": "TESLA", "Model": "MODEL Y", "Electric Range": null},
            ])
        );
    }

    #[test]
    fn empty_table_is_empty_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("none.json");
        write_records_json(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        assert!(write_records_json(&path, &[]).is_err());
    }
}
