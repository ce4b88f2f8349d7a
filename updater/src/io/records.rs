//! Record document load/save helpers.
//!
//! A record document is a JSON array of objects. Shape is not checked here;
//! [`update_records`](crate::core::record::update_records) reports shape
//! errors as type errors.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Path argument that means stdin (input) or stdout (output).
pub const STDIO: &str = "-";

/// Read a JSON document from `source`, or from stdin when `source` is `-`.
pub fn read_document(source: &str) -> Result<Value> {
    if source == STDIO {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read records from stdin")?;
        let value = serde_json::from_str(&buf).context("parse records from stdin")?;
        tracing::debug!(bytes = buf.len(), "loaded records from stdin");
        return Ok(value);
    }
    load_records(Path::new(source))
}

/// Load a JSON document from disk.
pub fn load_records(path: &Path) -> Result<Value> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .with_context(|| format!("parse records {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "loaded records");
    Ok(value)
}

/// Serialize `records` with a trailing newline.
pub fn render_records(records: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    let mut buf = rendered.context("serialize records json")?;
    buf.push('\n');
    Ok(buf)
}

/// Atomically write `records` to `path` (temp file + rename).
pub fn write_records(path: &Path, records: &Value, pretty: bool) -> Result<()> {
    let buf = render_records(records, pretty)?;
    write_atomic(path, &buf, "json.tmp")?;
    tracing::debug!(path = %path.display(), "wrote records");
    Ok(())
}

pub(crate) fn write_atomic(path: &Path, contents: &str, tmp_extension: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension(tmp_extension);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{items_json, temp_records};
    use serde_json::json;

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested/out.json");
        let records = items_json(&[(1, 10), (2, 20)]);

        write_records(&path, &records, true).expect("write");
        assert_eq!(load_records(&path).expect("load"), records);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn read_document_reads_files() {
        let records = items_json(&[(1, 10)]);
        let (_dir, path) = temp_records(&records).expect("temp records");
        let source = path.to_str().expect("utf-8 path");
        assert_eq!(read_document(source).expect("read"), records);
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "[{").expect("write");
        let err = load_records(&path).expect_err("parse error");
        assert!(format!("{:#}", err).contains("broken.json"));
    }

    #[test]
    fn render_compact_and_pretty() {
        let records = json!([{"id": 1}]);
        assert_eq!(render_records(&records, false).expect("render"), "[{\"id\":1}]\n");
        assert_eq!(
            render_records(&records, true).expect("render"),
            "[\n  {\n    \"id\": 1\n  }\n]\n"
        );
    }
}
