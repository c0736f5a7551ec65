//! Enclave SDK
//!
//! Client-side types and helpers for the enclave engine's script execution
//! API. This crate re-exports the wire shapes from `enclave-api-types` and the
//! response handling from `enclave-core`.

pub use enclave_api_types as api;
pub use enclave_core::*;
