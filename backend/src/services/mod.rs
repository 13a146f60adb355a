//! DCRI services: scoring, crop state and the daily revision

pub mod conditions;
pub mod crop_store;
pub mod listing;
pub mod revision;
pub mod scheduler;
pub mod scoring;

pub use crop_store::CropStore;
pub use listing::{CropListing, CropTypePolicy, ListingOutcome, ListingService};
pub use revision::{run_daily_revision, RevisionUpdate};
pub use scoring::{select_scorer, RiskScorer, ScoringStrategy};
