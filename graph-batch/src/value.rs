use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar the graph API encodes inconsistently, sometimes as a JSON string
/// and sometimes as a JSON number.
///
/// Decoding accepts either form so a single unstable field cannot fail the
/// whole entity. Consumers go through the accessors instead of assuming one
/// representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    /// Returns the string form, if the API sent a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StringOrNumber::String(s) => Some(s),
            StringOrNumber::Number(_) => None,
        }
    }

    /// Returns the value as an `i64`, parsing string encodings of integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StringOrNumber::String(s) => s.trim().parse().ok(),
            StringOrNumber::Number(n) => n.as_i64(),
        }
    }

    /// Returns the value as a `u64`, parsing string encodings of integers.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            StringOrNumber::String(s) => s.trim().parse().ok(),
            StringOrNumber::Number(n) => n.as_u64(),
        }
    }

    /// Returns the value as an `f64`, parsing string encodings of numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StringOrNumber::String(s) => s.trim().parse().ok(),
            StringOrNumber::Number(n) => n.as_f64(),
        }
    }

    /// Renders the value as an identifier string regardless of encoding.
    ///
    /// Graph ids exceed the `f64` mantissa, so numeric ids are formatted from
    /// the original number rather than through a float.
    pub fn to_id_string(&self) -> String {
        match self {
            StringOrNumber::String(s) => s.clone(),
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrNumber::String(s) => f.write_str(s),
            StringOrNumber::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for StringOrNumber {
    fn from(value: &str) -> Self {
        StringOrNumber::String(value.to_string())
    }
}

impl From<i64> for StringOrNumber {
    fn from(value: i64) -> Self {
        StringOrNumber::Number(value.into())
    }
}
