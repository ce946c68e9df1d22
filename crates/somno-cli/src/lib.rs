//! somno-cli library root.
//!
//! Re-exports the config and replay modules so integration tests can
//! exercise them without going through argument parsing.

pub mod config;
pub mod replay;
