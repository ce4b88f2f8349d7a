//! Immutable update-by-key over ordered record sequences.
//!
//! The crate keeps the same split the CLI relies on:
//!
//! - **[`core`]**: Pure, deterministic logic (the keyed update, its fallible and
//!   JSON-record variants, data-described transforms). No I/O.
//! - **[`io`]**: Loading and writing record documents and configuration.
//!
//! The binary wires both together behind `updater apply` and `updater check`.

pub mod apply;
pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::keyed::Keyed;
pub use crate::core::record::{RecordUpdate, UpdateError, update_records};
pub use crate::core::transform::{FieldOp, Transform};
pub use crate::core::update::{matching_positions, try_update_list_item, update_list_item};
