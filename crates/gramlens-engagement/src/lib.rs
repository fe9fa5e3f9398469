//! Engagement analysis for gramlens.
//!
//! Pure ranking, baseline, and outlier computation over canonical posts,
//! plus CSV export of the result. [`analyze`] does no I/O; sources feed it
//! and the CLI renders what comes out.

pub mod analyze;
pub mod error;
pub mod export;
pub mod types;

pub use analyze::{analyze, OUTLIER_MULTIPLIER};
pub use error::ExportError;
pub use export::{write_csv, write_csv_file};
pub use types::{AccountMean, AnalyzedPost, EngagementReport};
