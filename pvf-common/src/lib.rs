//! # PVF Common Library
//!
//! Shared code for the pageview filter tools including:
//! - Field decoding (whitespace split + percent-decoding of titles)
//! - Validation rules for pageview records
//! - Record sorting (views descending, title ascending)
//! - Aggregation of accepted records
//! - Configuration loading

pub mod aggregate;
pub mod config;
pub mod decode;
pub mod error;
pub mod record;
pub mod rules;
pub mod sort;

pub use aggregate::Aggregator;
pub use decode::{decode, percent_decode};
pub use error::{Error, Result};
pub use record::PageviewRecord;
pub use rules::{check_all_rules, check_field_count, Rule, RuleSet};
pub use sort::sort_records;
