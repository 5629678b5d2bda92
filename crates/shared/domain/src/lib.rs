//! # Domain
//!
//! Configuration sections, shared constants and the feature-slice registry.
//! Only `serde` is allowed here: no networking, no file access, no logic
//! beyond defaults and small helpers.

pub mod config;
pub mod constants;
pub mod registry;
