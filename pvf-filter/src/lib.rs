//! pvf-filter - pageview log filter
//!
//! Reads pageview lines (`domain title views bytes`), keeps English article
//! records, sums views per title and writes the titles by descending views.

pub mod ingest;
pub mod output;

pub use ingest::{run, FilterReport, FilterRun, FilterStats, LineOutcome};
pub use output::{write_records, OutputFormat};
