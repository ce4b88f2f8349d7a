//! Orchestration for `updater apply`.

use anyhow::{Result, bail};
use serde_json::Value;

use crate::core::invariants::validate_unique_record_ids;
use crate::core::record::{RecordUpdate, update_records};
use crate::core::transform::Transform;
use crate::io::config::UpdaterConfig;

/// Interpret a CLI id: JSON when it parses (`2`, `"2"`, `null`), else a string.
pub fn parse_id(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Apply `transform` to every record in `records` keyed by `id`.
///
/// With `require_unique_ids` set, duplicate ids abort before any transform
/// runs.
pub fn apply_update(
    records: &Value,
    id: &Value,
    transform: &Transform,
    cfg: &UpdaterConfig,
) -> Result<RecordUpdate> {
    if cfg.require_unique_ids {
        let errors = validate_unique_record_ids(records, &cfg.id_field)?;
        if !errors.is_empty() {
            bail!("duplicate ids:\n- {}", errors.join("\n- "));
        }
    }

    let update = update_records(records, &cfg.id_field, id, |record| {
        transform.apply(record, &cfg.id_field)
    })?;

    if update.is_match() {
        tracing::debug!(%id, matched = ?update.matched, ops = transform.ops().len(), "updated records");
    } else {
        tracing::warn!(%id, id_field = %cfg.id_field, "no record matched; output equals input");
    }
    Ok(update)
}
