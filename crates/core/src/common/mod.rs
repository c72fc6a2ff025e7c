//! Common types shared by the accumulators and the session.
//!
//! This module provides the small building blocks used across the crate:
//! 1. **Access Direction:** Read/write classification of cache references.
//! 2. **Hit/Miss Outcome:** Tri-state outcome carried by samples and trace entries.
//! 3. **Derived Metrics:** Ratios that are explicitly undefined on a zero denominator.
//! 4. **Error Handling:** The crate error type and `Result` alias.

/// Access direction and hit/miss outcome definitions.
pub mod data;

/// Error types.
pub mod error;

/// Derived ratio type with an explicit undefined state.
pub mod metric;

pub use data::{Direction, HitMiss};
pub use error::{Result, StatsError};
pub use metric::Metric;
