//! Data-described transforms for JSON records.
//!
//! A [`Transform`] is the `update_fn` the CLI hands to
//! [`update_records`](crate::core::record::update_records): an ordered list of
//! field operations that never touch the record id.

use std::mem;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::record::{UpdateError, kind_of};

/// One top-level field operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum FieldOp {
    /// Set or overwrite `field`.
    Set { field: String, value: Value },
    /// Add `by` to the numeric `field`.
    Inc { field: String, by: Number },
    /// Remove `field` if present.
    Unset { field: String },
    /// Apply a JSON merge patch (RFC 7386) to the whole record.
    Merge { patch: Value },
}

impl FieldOp {
    /// Parse `field=JSON`. A value that is not valid JSON is taken as a string.
    pub fn parse_set(raw: &str) -> Result<Self, String> {
        let (field, value) = split_assignment(raw)?;
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        Ok(Self::Set { field, value })
    }

    /// Parse `field=NUMBER`.
    pub fn parse_inc(raw: &str) -> Result<Self, String> {
        let (field, by) = split_assignment(raw)?;
        let by = match serde_json::from_str(by) {
            Ok(Value::Number(by)) => by,
            _ => return Err(format!("'{}' is not a number", by)),
        };
        Ok(Self::Inc { field, by })
    }

    pub fn parse_unset(raw: &str) -> Result<Self, String> {
        let field = raw.trim();
        if field.is_empty() {
            return Err("field name must not be empty".to_string());
        }
        Ok(Self::Unset {
            field: field.to_string(),
        })
    }

    /// Parse a JSON object used as a merge patch.
    pub fn parse_merge(raw: &str) -> Result<Self, String> {
        match serde_json::from_str(raw) {
            Ok(patch @ Value::Object(_)) => Ok(Self::Merge { patch }),
            Ok(other) => Err(format!("merge patch must be an object, got {}", kind_of(&other))),
            Err(err) => Err(format!("invalid merge patch: {}", err)),
        }
    }

    fn touches(&self, id_field: &str) -> bool {
        match self {
            Self::Set { field, .. } | Self::Inc { field, .. } | Self::Unset { field } => {
                field == id_field
            }
            Self::Merge { patch } => patch
                .as_object()
                .is_some_and(|fields| fields.contains_key(id_field)),
        }
    }

    fn apply_to(&self, fields: &mut Map<String, Value>) -> Result<(), UpdateError> {
        match self {
            Self::Set { field, value } => {
                fields.insert(field.clone(), value.clone());
            }
            Self::Inc { field, by } => {
                let current = match fields.get(field) {
                    Some(Value::Number(current)) => current,
                    Some(other) => {
                        return Err(UpdateError::type_error(format!(
                            "cannot increment '{}': value is {}",
                            field,
                            kind_of(other)
                        )));
                    }
                    None => {
                        return Err(UpdateError::type_error(format!(
                            "cannot increment '{}': field is missing",
                            field
                        )));
                    }
                };
                let sum = add_numbers(field, current, by)?;
                fields.insert(field.clone(), Value::Number(sum));
            }
            Self::Unset { field } => {
                fields.remove(field);
            }
            Self::Merge { patch } => {
                if !patch.is_object() {
                    return Err(UpdateError::type_error(format!(
                        "merge patch must be an object, got {}",
                        kind_of(patch)
                    )));
                }
                let mut target = Value::Object(mem::take(fields));
                merge_patch(&mut target, patch);
                if let Value::Object(merged) = target {
                    *fields = merged;
                }
            }
        }
        Ok(())
    }
}

/// Ordered field operations applied to a single record.
///
/// An empty transform is the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform {
    ops: Vec<FieldOp>,
}

impl Transform {
    pub fn new(ops: Vec<FieldOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[FieldOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Return a new record with every op applied in order.
    ///
    /// Fails with [`UpdateError::IdField`] if any op targets `id_field`, and
    /// with [`UpdateError::Type`] if `record` is not an object or an
    /// increment hits a non-numeric field. `record` itself is never modified.
    pub fn apply(&self, record: &Value, id_field: &str) -> Result<Value, UpdateError> {
        if self.ops.iter().any(|op| op.touches(id_field)) {
            return Err(UpdateError::IdField {
                field: id_field.to_string(),
            });
        }
        let mut fields = record.as_object().cloned().ok_or_else(|| {
            UpdateError::type_error(format!("expected a record, got {}", kind_of(record)))
        })?;
        for op in &self.ops {
            op.apply_to(&mut fields)?;
        }
        Ok(Value::Object(fields))
    }
}

fn split_assignment(raw: &str) -> Result<(String, &str), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((field.to_string(), value))
}

/// Integer + integer stays an integer (i64 when it fits, else u64); anything
/// else is a float sum.
fn add_numbers(field: &str, current: &Number, by: &Number) -> Result<Number, UpdateError> {
    let overflow = || UpdateError::Overflow {
        field: field.to_string(),
    };
    if let (Some(a), Some(b)) = (as_integer(current), as_integer(by)) {
        let sum = a + b;
        if let Ok(sum) = i64::try_from(sum) {
            return Ok(Number::from(sum));
        }
        return u64::try_from(sum).map(Number::from).map_err(|_| overflow());
    }
    match (current.as_f64(), by.as_f64()) {
        (Some(a), Some(b)) => Number::from_f64(a + b).ok_or_else(overflow),
        _ => Err(overflow()),
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_fields) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_fields) = target {
        for (key, value) in patch_fields {
            if value.is_null() {
                target_fields.remove(key);
            } else {
                merge_patch(target_fields.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}
