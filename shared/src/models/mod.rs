//! Domain models for the FarmFlow crop risk platform

mod crop;
mod dcri;
mod soil;
mod weather;

pub use crop::*;
pub use dcri::*;
pub use soil::*;
pub use weather::*;
