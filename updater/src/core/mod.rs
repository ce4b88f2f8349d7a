//! Deterministic, pure logic shared by the updater.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! sequences and return deterministic outputs suitable for tests.

pub mod invariants;
pub mod keyed;
pub mod record;
pub mod transform;
pub mod update;
