//! Validation rules for decoded pageview lines
//!
//! Each rule is an independent predicate over a decoded field array. A record
//! is accepted only when every rule holds. Rules are evaluated in
//! [`Rule::all`] order and evaluation stops at the first failure.
//!
//! # Rules
//! 1. **Length** - exactly 4 fields, none containing whitespace
//! 2. **Domain** - domain code is `en` or `en.m`
//! 3. **SpecialPage** - title is not `Main_Page` or `-`
//! 4. **Prefix** - title has no namespace prefix (no `:`)
//! 5. **MediaSuffix** - title does not end in an image extension
//! 6. **Disambiguation** - title does not end in `(disambiguation)`
//! 7. **FirstLetter** - title starts with an uppercase letter or a digit
//!
//! Length gates the others: downstream rules assume a 4-field array and are
//! never evaluated for any other shape.
//!
//! The free functions use the compiled-default [`RuleSet`]. Use
//! [`RuleSet::from_config`] to apply a [`FilterConfig`] loaded from TOML.

use crate::config::FilterConfig;
use crate::decode::{DOMAIN_FIELD, TITLE_FIELD};
use crate::record::PageviewRecord;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of fields in a well-formed line
pub const FIELD_COUNT: usize = 4;

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(RuleSet::default);

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Exactly [`FIELD_COUNT`] fields, none containing whitespace
    Length,
    /// Domain code is one of the accepted domains
    Domain,
    /// Title is not a special page
    SpecialPage,
    /// Title carries no `Namespace:` prefix
    Prefix,
    /// Title does not end in a rejected file extension
    MediaSuffix,
    /// Title is not a disambiguation page
    Disambiguation,
    /// Title starts with an uppercase letter or a digit
    FirstLetter,
}

impl Rule {
    /// All rules in evaluation order
    pub fn all() -> &'static [Rule] {
        &[
            Rule::Length,
            Rule::Domain,
            Rule::SpecialPage,
            Rule::Prefix,
            Rule::MediaSuffix,
            Rule::Disambiguation,
            Rule::FirstLetter,
        ]
    }

    /// Canonical snake_case name, as used in config and statistics
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Length => "length",
            Rule::Domain => "domain",
            Rule::SpecialPage => "special_page",
            Rule::Prefix => "prefix",
            Rule::MediaSuffix => "media_suffix",
            Rule::Disambiguation => "disambiguation",
            Rule::FirstLetter => "first_letter",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Rule::all()
            .iter()
            .copied()
            .find(|rule| rule.name() == normalized)
            .ok_or_else(|| Error::Config(format!("Unknown rule '{}'", s)))
    }
}

/// Rule parameters resolved from a [`FilterConfig`]
#[derive(Debug, Clone)]
pub struct RuleSet {
    domains: Vec<String>,
    special_pages: Vec<String>,
    /// Lowercased for case-insensitive suffix matching
    rejected_extensions: Vec<String>,
    disambiguation_marker: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl RuleSet {
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            domains: config.domains.clone(),
            special_pages: config.special_pages.clone(),
            rejected_extensions: config
                .rejected_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
            disambiguation_marker: config.disambiguation_marker.clone(),
        }
    }

    /// Evaluate one rule
    pub fn check(&self, rule: Rule, fields: &[String]) -> bool {
        match rule {
            Rule::Length => self.check_field_count(fields),
            Rule::Domain => self.check_domain(fields),
            Rule::SpecialPage => self.check_special_page(fields),
            Rule::Prefix => self.check_prefix(fields),
            Rule::MediaSuffix => self.check_media_suffix(fields),
            Rule::Disambiguation => self.check_disambiguation(fields),
            Rule::FirstLetter => self.check_first_letter(fields),
        }
    }

    /// First rule the fields fail, or `None` when the record is accepted
    pub fn first_failure(&self, fields: &[String]) -> Option<Rule> {
        Rule::all()
            .iter()
            .copied()
            .find(|&rule| !self.check(rule, fields))
    }

    pub fn check_all_rules(&self, fields: &[String]) -> bool {
        self.first_failure(fields).is_none()
    }

    /// Validate and convert into a typed record
    ///
    /// # Errors
    ///
    /// - [`Error::Rejected`] naming the first failing rule
    /// - [`Error::InvalidInput`] if views or bytes is not an unsigned integer
    pub fn validate(&self, fields: &[String]) -> Result<PageviewRecord> {
        if let Some(rule) = self.first_failure(fields) {
            return Err(Error::Rejected(rule));
        }
        PageviewRecord::from_fields(fields)
    }

    pub fn check_field_count(&self, fields: &[String]) -> bool {
        fields.len() == FIELD_COUNT
            && fields
                .iter()
                .all(|field| !field.is_empty() && !field.contains(char::is_whitespace))
    }

    pub fn check_domain(&self, fields: &[String]) -> bool {
        fields
            .get(DOMAIN_FIELD)
            .is_some_and(|domain| self.domains.iter().any(|d| d == domain))
    }

    pub fn check_special_page(&self, fields: &[String]) -> bool {
        title(fields).is_some_and(|title| !self.special_pages.iter().any(|p| p == title))
    }

    pub fn check_prefix(&self, fields: &[String]) -> bool {
        title(fields).is_some_and(|title| !title.contains(':'))
    }

    pub fn check_media_suffix(&self, fields: &[String]) -> bool {
        title(fields).is_some_and(|title| {
            let lowered = title.to_ascii_lowercase();
            !self
                .rejected_extensions
                .iter()
                .any(|ext| lowered.ends_with(ext.as_str()))
        })
    }

    pub fn check_disambiguation(&self, fields: &[String]) -> bool {
        title(fields).is_some_and(|title| !title.ends_with(self.disambiguation_marker.as_str()))
    }

    pub fn check_first_letter(&self, fields: &[String]) -> bool {
        title(fields)
            .and_then(|title| title.chars().next())
            .is_some_and(|first| first.is_uppercase() || first.is_ascii_digit())
    }
}

fn title(fields: &[String]) -> Option<&str> {
    fields.get(TITLE_FIELD).map(String::as_str)
}

/// Exactly 4 fields, none of which would split further on whitespace
pub fn check_field_count(fields: &[String]) -> bool {
    DEFAULT_RULES.check_field_count(fields)
}

/// Domain is `en` or `en.m` (case-sensitive)
pub fn check_domain(fields: &[String]) -> bool {
    DEFAULT_RULES.check_domain(fields)
}

/// Title is neither `Main_Page` nor `-`
pub fn check_special_page(fields: &[String]) -> bool {
    DEFAULT_RULES.check_special_page(fields)
}

/// Title contains no `:`
pub fn check_prefix(fields: &[String]) -> bool {
    DEFAULT_RULES.check_prefix(fields)
}

/// Title does not end in `.png`, `.jpg`, `.jpeg`, `.gif` or `.ico` (any case)
pub fn check_media_suffix(fields: &[String]) -> bool {
    DEFAULT_RULES.check_media_suffix(fields)
}

/// Title does not end in `(disambiguation)`
pub fn check_disambiguation(fields: &[String]) -> bool {
    DEFAULT_RULES.check_disambiguation(fields)
}

/// Title starts with an uppercase letter or a digit
pub fn check_first_letter(fields: &[String]) -> bool {
    DEFAULT_RULES.check_first_letter(fields)
}

/// Composite gate: true only if every rule passes
///
/// # Examples
///
/// ```
/// use pvf_common::{check_all_rules, decode};
///
/// assert!(check_all_rules(&decode("en Valid_title 10 100")));
/// assert!(!check_all_rules(&decode("en Media%3ABad 10 100")));
/// ```
pub fn check_all_rules(fields: &[String]) -> bool {
    DEFAULT_RULES.check_all_rules(fields)
}

/// First failing rule under the default rule set
pub fn first_failure(fields: &[String]) -> Option<Rule> {
    DEFAULT_RULES.first_failure(fields)
}

/// Validate under the default rule set
///
/// # Errors
///
/// See [`RuleSet::validate`].
pub fn validate(fields: &[String]) -> Result<PageviewRecord> {
    DEFAULT_RULES.validate(fields)
}
