//! svy_core - core types, confidence-level domain, rounding policy, and errors.
//!
//! This crate is **I/O-free**. It defines the stable value types used across
//! the engine (`svy_io`, `svy_algo`, `svy_pipeline`, `svy_cli`):
//!
//! - Error taxonomy: `InvalidParameter` / `InsufficientData`
//! - Closed confidence-level domain with the fixed Z table
//! - Data-model entities (sample results, quotas, workload, intervals, points)
//! - Decimal rounding policy shared by every computation
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod confidence;
pub mod entities;
pub mod errors;
pub mod rounding;

pub use confidence::ConfidenceLevel;
pub use errors::CoreError;
