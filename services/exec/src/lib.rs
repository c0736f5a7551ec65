//! Enclave Exec Library Crate
//!
//! Replays recorded script execution response streams through the SDK's
//! aggregator and renders the outcome. The `enclave-exec` binary is a thin
//! wrapper around this library.

pub mod config;
pub mod render;
pub mod transcript;
