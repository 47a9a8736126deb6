//! Output writers for sorted records

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

/// Output format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `title<TAB>views`, one record per line
    #[default]
    Tsv,
    /// JSON array of `{"title", "views"}` objects
    Json,
}

#[derive(Serialize)]
struct TitleViews<'a> {
    title: &'a str,
    views: u64,
}

/// Write records in the given format, preserving their order
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[(String, u64)],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Tsv => {
            for (title, views) in records {
                writeln!(writer, "{}\t{}", title, views)?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<TitleViews<'_>> = records
                .iter()
                .map(|(title, views)| TitleViews { title, views: *views })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &rows)?;
            writeln!(writer)?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<(String, u64)> {
        vec![("Rust".to_string(), 12), ("Go".to_string(), 3)]
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        write_records(&mut out, &records(), OutputFormat::Tsv).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Rust\t12\nGo\t3\n");
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_records(&mut out, &records(), OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["title"], "Rust");
        assert_eq!(parsed[0]["views"], 12);
        assert_eq!(parsed[1]["title"], "Go");
    }

    #[test]
    fn test_write_empty() {
        let mut out = Vec::new();
        write_records(&mut out, &[], OutputFormat::Tsv).unwrap();
        assert!(out.is_empty());

        let mut out = Vec::new();
        write_records(&mut out, &[], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
