//! # Utility Functions (`utils`)
//!
//! Helpers around whole runs: trajectory serialization and parallel batches.

pub mod serialization;
pub mod parallel;

pub use serialization::SerializationError;
pub use parallel::{run_batch, run_seeds, BatchResult};
