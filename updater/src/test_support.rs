//! Test-only helpers for constructing record sequences.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::keyed::Keyed;

/// Deterministic record used across tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub value: i64,
}

impl Keyed for Item {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }
}

/// Create an item named `Item {id}`.
pub fn item(id: u32, value: i64) -> Item {
    Item {
        id,
        name: format!("Item {}", id),
        value,
    }
}

/// Create items from `(id, value)` pairs, in order.
pub fn items(pairs: &[(u32, i64)]) -> Vec<Item> {
    pairs.iter().map(|&(id, value)| item(id, value)).collect()
}

/// JSON array form of [`items`].
pub fn items_json(pairs: &[(u32, i64)]) -> Value {
    serde_json::to_value(items(pairs)).unwrap_or(Value::Null)
}

/// Write `value` as pretty JSON into `dir/name` and return the path.
pub fn write_json_file(dir: &Path, name: &str, value: &Value) -> io::Result<PathBuf> {
    let path = dir.join(name);
    let mut payload = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    payload.push('\n');
    fs::write(&path, payload)?;
    Ok(path)
}

/// Write `value` into a fresh temp dir as `records.json`.
///
/// The returned `TempDir` must outlive every use of the path.
pub fn temp_records(value: &Value) -> io::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = write_json_file(dir.path(), "records.json", value)?;
    Ok((dir, path))
}
