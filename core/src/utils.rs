//! Helpers shared by the wif crates.

use std::fmt::Debug;

/// Redacts a secret so it can be logged.
///
/// - Values shorter than 12 characters are entirely redacted.
/// - Longer values keep only their first and last three characters.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.0;
        if v.is_empty() {
            return f.write_str("EMPTY");
        }

        let edges = (v.len() >= 12)
            .then(|| v.get(..3).zip(v.get(v.len() - 3..)))
            .flatten();
        match edges {
            Some((head, tail)) => write!(f, "{head}***{tail}"),
            None => f.write_str("***"),
        }
    }
}
