//! Field decoding for raw pageview lines
//!
//! A raw line is split on runs of whitespace. Only the title field is
//! percent-decoded; domain and the numeric fields are passed through verbatim.
//! The field count is not checked here, see [`crate::rules::check_field_count`].

/// Index of the domain code within a field array
pub const DOMAIN_FIELD: usize = 0;
/// Index of the (percent-encoded) title within a field array
pub const TITLE_FIELD: usize = 1;
/// Index of the view count within a field array
pub const VIEWS_FIELD: usize = 2;
/// Index of the byte size within a field array
pub const BYTES_FIELD: usize = 3;

/// Split a raw line into fields and decode the title.
///
/// # Examples
///
/// ```
/// use pvf_common::decode::decode;
///
/// assert_eq!(decode("en User%3AK6ka 34 0"), vec!["en", "User:K6ka", "34", "0"]);
/// assert_eq!(decode("en 34 0").len(), 3);
/// ```
pub fn decode(line: &str) -> Vec<String> {
    line.split_whitespace()
        .enumerate()
        .map(|(index, field)| {
            if index == TITLE_FIELD {
                percent_decode(field)
            } else {
                field.to_string()
            }
        })
        .collect()
}

/// Reverse `%XX` escaping in a single pass.
///
/// Hex digits may be upper or lower case. A `%` that is not followed by two
/// hex digits is kept as-is, so decoding never fails. Decoded bytes that do not
/// form valid UTF-8 are replaced with U+FFFD.
///
/// # Examples
///
/// ```
/// use pvf_common::decode::percent_decode;
///
/// assert_eq!(percent_decode("User%3aK6ka"), "User:K6ka");
/// assert_eq!(percent_decode("Topic%2520"), "Topic%20");
/// assert_eq!(percent_decode("100%"), "100%");
/// ```
pub fn percent_decode(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }

    String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
}
