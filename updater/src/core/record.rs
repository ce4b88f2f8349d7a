//! Keyed update over dynamic JSON records.
//!
//! Unlike the typed API, a JSON document can have the wrong shape at runtime:
//! the list may not be an array, or an element may be `null` and have no field
//! to read. Both are reported as [`UpdateError::Type`]. Other non-object
//! elements simply never match.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while updating JSON records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// Input has the wrong shape (not a list, a null element, not a number).
    #[error("type error: {message}")]
    Type { message: String },
    /// A transform tried to modify the field records are keyed by.
    #[error("field '{field}' is the record id and cannot be modified")]
    IdField { field: String },
    #[error("integer overflow incrementing '{field}'")]
    Overflow { field: String },
}

impl UpdateError {
    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }
}

/// Result of [`update_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    /// The new JSON array, same length and order as the input.
    pub records: Value,
    /// Indices of records that were passed through the transform.
    pub matched: Vec<usize>,
}

impl RecordUpdate {
    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Replace every record whose `id_field` equals `id` with `update_fn(record)`.
///
/// Ids compare with [`ids_equal`]: `1` matches `1.0`, `2` never matches `"2"`.
/// Elements without `id_field`, including non-object elements such as `5` or
/// `"x"`, never match and are carried through unchanged. A `null` element is a
/// type error. The first transform error is returned and no partial array is
/// produced.
pub fn update_records<F>(
    list: &Value,
    id_field: &str,
    id: &Value,
    mut update_fn: F,
) -> Result<RecordUpdate, UpdateError>
where
    F: FnMut(&Value) -> Result<Value, UpdateError>,
{
    let ids = record_ids(list, id_field)?;
    let records = list.as_array().map(Vec::as_slice).unwrap_or_default();

    let mut output = Vec::with_capacity(records.len());
    let mut matched = Vec::new();
    for (index, (record, record_id)) in records.iter().zip(&ids).enumerate() {
        if record_id.is_some_and(|record_id| ids_equal(record_id, id)) {
            output.push(update_fn(record)?);
            matched.push(index);
        } else {
            output.push(record.clone());
        }
    }

    Ok(RecordUpdate {
        records: Value::Array(output),
        matched,
    })
}

/// Ids of all elements in `list`, in order.
///
/// `None` where an object lacks `id_field` or the element is not an object.
/// Fails when `list` is not an array or holds a `null` element.
pub fn record_ids<'a>(list: &'a Value, id_field: &str) -> Result<Vec<Option<&'a Value>>, UpdateError> {
    let records = list.as_array().ok_or_else(|| {
        UpdateError::type_error(format!(
            "expected an array of records, got {}",
            kind_of(list)
        ))
    })?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Null => Err(UpdateError::type_error(format!(
                "element at index {} is null, cannot read '{}'",
                index, id_field
            ))),
            Value::Object(fields) => Ok(fields.get(id_field)),
            _ => Ok(None),
        })
        .collect()
}

/// Id equality: numbers compare by numeric value, everything else by `==`.
pub fn ids_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return a == b;
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return a == b;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        _ => a == b,
    }
}

/// Human-readable JSON kind for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
