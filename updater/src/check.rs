//! Orchestration for `updater check`.

use anyhow::{Result, bail};
use serde_json::Value;

use crate::core::invariants::validate_unique_record_ids;
use crate::core::record::record_ids;
use crate::io::config::UpdaterConfig;

/// Summary of a successful uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub records: usize,
    /// Records that have no id field and can never be matched.
    pub without_id: usize,
}

/// Verify that `records` is a record list with unique ids.
pub fn check_records(records: &Value, cfg: &UpdaterConfig) -> Result<CheckOutcome> {
    let errors = validate_unique_record_ids(records, &cfg.id_field)?;
    if !errors.is_empty() {
        bail!("duplicate ids:\n- {}", errors.join("\n- "));
    }
    let ids = record_ids(records, &cfg.id_field)?;
    let without_id = ids.iter().filter(|id| id.is_none()).count();
    if without_id > 0 {
        tracing::warn!(without_id, id_field = %cfg.id_field, "records without id field");
    }
    Ok(CheckOutcome {
        records: ids.len(),
        without_id,
    })
}
