//! Shared types and models for the FarmFlow crop risk platform
//!
//! This crate contains the I/O-free domain: crop and snapshot types, the
//! feature normalizer and the reference DCRI calculation. It is shared
//! between the backend and the browser (via WASM).

pub mod models;
pub mod normalization;
pub mod types;
pub mod validation;

pub use models::*;
pub use normalization::*;
pub use types::*;
pub use validation::*;
