//! ID normalization utilities.
//!
//! Provides functions for deriving URL-friendly identifiers from display
//! labels. Used for tag filter ids and anywhere a stable, lowercase key is
//! needed for a human-entered string.

/// Normalize a label to a lowercase, hyphen-separated id.
///
/// Performs the following transformations:
/// 1. Converts to lowercase
/// 2. Replaces each run of whitespace with a single hyphen
///
/// Leading or trailing whitespace also becomes a hyphen; nothing else is
/// stripped, so punctuation and non-ASCII letters survive unchanged.
///
/// # Examples
///
/// ```
/// use notiblog_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Next JS"), "next-js");
/// assert_eq!(normalize_id("Mixed   Case"), "mixed-case");
/// assert_eq!(normalize_id("회고"), "회고");
/// assert_eq!(normalize_id("C++"), "c++");
/// ```
pub fn normalize_id(label: &str) -> String {
    let mut id = String::with_capacity(label.len());
    let mut in_whitespace = false;

    for c in label.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    id
}
