//! Keyword-argument values with numeric coercion.

use serde::Serialize;
use std::fmt;

/// A decoded `k=v` value from a macro invocation.
///
/// Coercion is tried in order: integer, float, literal string. A value that
/// fails both numeric parses is simply kept as a string, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    pub fn coerce(raw: &str) -> ArgValue {
        if let Ok(i) = raw.parse::<i64>() {
            return ArgValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return ArgValue::Float(f);
        }
        ArgValue::Str(raw.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(x) => write!(f, "{}", x),
            ArgValue::Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_integers() {
        assert_eq!(ArgValue::coerce("42"), ArgValue::Int(42));
        assert_eq!(ArgValue::coerce("-7"), ArgValue::Int(-7));
        assert_eq!(ArgValue::coerce("0"), ArgValue::Int(0));
    }

    #[test]
    fn coerces_floats() {
        assert_eq!(ArgValue::coerce("3.14"), ArgValue::Float(3.14));
        assert_eq!(ArgValue::coerce("-0.5"), ArgValue::Float(-0.5));
    }

    #[test]
    fn falls_through_to_string() {
        assert_eq!(ArgValue::coerce("hello"), ArgValue::Str("hello".to_string()));
        assert_eq!(ArgValue::coerce("1.2.3"), ArgValue::Str("1.2.3".to_string()));
        assert_eq!(ArgValue::coerce(""), ArgValue::Str(String::new()));
    }

    #[test]
    fn displays_like_the_raw_token() {
        assert_eq!(ArgValue::coerce("42").to_string(), "42");
        assert_eq!(ArgValue::coerce("3.14").to_string(), "3.14");
        assert_eq!(ArgValue::coerce("release").to_string(), "release");
    }
}
