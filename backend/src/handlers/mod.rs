//! HTTP handlers

mod dcri;
mod health;

pub use dcri::*;
pub use health::*;
