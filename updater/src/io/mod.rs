//! I/O helpers for updater commands.

pub mod config;
pub mod records;
