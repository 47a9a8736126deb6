//! Line ingestion driver
//!
//! Feeds raw lines through decode → validate → aggregate and keeps counters
//! for every outcome. Rejected lines are dropped silently (logged at trace
//! level only); nothing here is fatal except I/O errors on the reader.

use pvf_common::{decode, Aggregator, Error, PageviewRecord, Rule, RuleSet};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::{debug, info, trace};

/// What happened to a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Passed every rule and was added to the aggregate
    Accepted(PageviewRecord),
    /// Failed the given rule
    Rejected(Rule),
    /// Passed every rule but views/bytes are not unsigned integers
    Malformed(String),
    /// Empty or whitespace-only line, not counted
    Blank,
}

/// Counters for a filter run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub lines_read: u64,
    pub accepted: u64,
    pub malformed: u64,
    /// Rejections keyed by the first rule that failed
    pub rejected: BTreeMap<Rule, u64>,
}

impl FilterStats {
    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }

    pub fn rejected_by(&self, rule: Rule) -> u64 {
        self.rejected.get(&rule).copied().unwrap_or(0)
    }
}

/// Output of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    /// Views descending, title ascending
    pub records: Vec<(String, u64)>,
    pub stats: FilterStats,
}

/// Stateful single pass over input lines
#[derive(Debug, Default)]
pub struct FilterRun {
    rules: RuleSet,
    aggregator: Aggregator,
    stats: FilterStats,
}

impl FilterRun {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            aggregator: Aggregator::new(),
            stats: FilterStats::default(),
        }
    }

    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }
        self.stats.lines_read += 1;

        let fields = decode(line);
        match self.rules.validate(&fields) {
            Ok(record) => {
                self.stats.accepted += 1;
                self.aggregator.add(&record);
                LineOutcome::Accepted(record)
            }
            Err(Error::Rejected(rule)) => {
                trace!(%rule, line, "Line rejected");
                *self.stats.rejected.entry(rule).or_insert(0) += 1;
                LineOutcome::Rejected(rule)
            }
            Err(e) => {
                debug!("Skipping malformed line {:?}: {}", line, e);
                self.stats.malformed += 1;
                LineOutcome::Malformed(e.to_string())
            }
        }
    }

    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    /// Fold a run over another slice of input into this one
    pub fn merge(&mut self, other: FilterRun) {
        self.aggregator.merge(other.aggregator);
        self.stats.lines_read += other.stats.lines_read;
        self.stats.accepted += other.stats.accepted;
        self.stats.malformed += other.stats.malformed;
        for (rule, count) in other.stats.rejected {
            *self.stats.rejected.entry(rule).or_insert(0) += count;
        }
    }

    pub fn finish(self) -> FilterReport {
        info!(
            "Filtered {} lines: {} accepted, {} rejected, {} malformed, {} distinct titles",
            self.stats.lines_read,
            self.stats.accepted,
            self.stats.total_rejected(),
            self.stats.malformed,
            self.aggregator.len()
        );
        FilterReport {
            records: self.aggregator.into_sorted(),
            stats: self.stats,
        }
    }
}

/// Read every line from `reader` and return the sorted aggregate.
///
/// Lines that are not valid UTF-8 are decoded lossily rather than aborting
/// the run.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails.
pub fn run<R: BufRead>(rules: RuleSet, mut reader: R) -> pvf_common::Result<FilterReport> {
    let mut filter = FilterRun::new(rules);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        filter.process_line(&line);
    }

    Ok(filter.finish())
}
