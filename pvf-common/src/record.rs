//! Accepted pageview record

use crate::decode::{BYTES_FIELD, DOMAIN_FIELD, TITLE_FIELD, VIEWS_FIELD};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A decoded line that passed every validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageviewRecord {
    /// Project domain code (`en`, `en.m`)
    pub domain: String,
    /// Decoded article title
    pub title: String,
    /// Number of views in the log interval
    pub views: u64,
    /// Total response size in bytes
    pub bytes: u64,
}

impl PageviewRecord {
    /// Build a record from a 4-field array.
    ///
    /// Does not apply validation rules; callers go through
    /// [`crate::rules::RuleSet::validate`].
    pub(crate) fn from_fields(fields: &[String]) -> Result<Self> {
        let field = |index: usize| {
            fields
                .get(index)
                .ok_or_else(|| Error::InvalidInput(format!("missing field {}", index)))
        };

        let views = parse_count(field(VIEWS_FIELD)?, "view count")?;
        let bytes = parse_count(field(BYTES_FIELD)?, "byte size")?;

        Ok(Self {
            domain: field(DOMAIN_FIELD)?.clone(),
            title: field(TITLE_FIELD)?.clone(),
            views,
            bytes,
        })
    }
}

fn parse_count(value: &str, what: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| Error::InvalidInput(format!("invalid {} '{}': {}", what, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_from_fields_parses_counts() {
        let record = PageviewRecord::from_fields(&fields(&["en", "Title", "34", "1024"])).unwrap();
        assert_eq!(record.domain, "en");
        assert_eq!(record.title, "Title");
        assert_eq!(record.views, 34);
        assert_eq!(record.bytes, 1024);
    }

    #[test]
    fn test_from_fields_rejects_non_numeric_views() {
        let result = PageviewRecord::from_fields(&fields(&["en", "Title", "many", "0"]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_fields_rejects_negative_bytes() {
        let result = PageviewRecord::from_fields(&fields(&["en", "Title", "1", "-5"]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_fields_missing_field() {
        let result = PageviewRecord::from_fields(&fields(&["en", "Title"]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
