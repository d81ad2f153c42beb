//! Core preference types
//!
//! [`PrefValue`] and [`PrefEntry`] describe directives read back from an
//! override file. [`PrefLiteral`] is the compile-time value stored in the
//! preference catalog and knows how to render itself as a directive literal.

use std::fmt;

/// The function name used by a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefType {
    /// `user_pref(...)`
    User,
    /// `pref(...)`
    Default,
    /// `lock_pref(...)`
    Locked,
    /// `sticky_pref(...)`
    Sticky,
}

/// A value parsed from an override file
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Null,
}

impl PrefValue {
    /// Convert a lexed number into an integer when it has no fractional part
    pub fn from_f64(n: f64) -> Self {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
            PrefValue::Integer(n as i64)
        } else {
            PrefValue::Float(n)
        }
    }
}

/// A single directive read from an override file
#[derive(Debug, Clone, PartialEq)]
pub struct PrefEntry {
    pub key: String,
    pub value: PrefValue,
    pub pref_type: PrefType,
    /// 1-indexed line the directive starts on
    pub line: usize,
}

/// A literal value in the preference catalog
///
/// Rendering via [`fmt::Display`] produces the exact literal grammar Firefox
/// accepts in `user.js`: `true`/`false`, a decimal integer, or a
/// double-quoted string with JavaScript escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefLiteral {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl PrefLiteral {
    /// Whether a parsed value is the same preference value as this literal
    pub fn matches(&self, value: &PrefValue) -> bool {
        match (self, value) {
            (PrefLiteral::Bool(a), PrefValue::Bool(b)) => a == b,
            (PrefLiteral::Int(a), PrefValue::Integer(b)) => a == b,
            (PrefLiteral::Str(a), PrefValue::String(b)) => *a == b,
            _ => false,
        }
    }
}

impl fmt::Display for PrefLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefLiteral::Bool(b) => write!(f, "{}", b),
            PrefLiteral::Int(n) => write!(f, "{}", n),
            PrefLiteral::Str(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literals() {
        assert_eq!(PrefLiteral::Bool(true).to_string(), "true");
        assert_eq!(PrefLiteral::Bool(false).to_string(), "false");
        assert_eq!(PrefLiteral::Int(-2).to_string(), "-2");
        assert_eq!(PrefLiteral::Str("").to_string(), "\"\"");
        assert_eq!(PrefLiteral::Str("off").to_string(), "\"off\"");
    }

    #[test]
    fn test_render_string_escapes() {
        assert_eq!(
            PrefLiteral::Str("a \"b\" c\\d\n").to_string(),
            r#""a \"b\" c\\d\n""#
        );
    }

    #[test]
    fn test_literal_matches() {
        assert!(PrefLiteral::Bool(false).matches(&PrefValue::Bool(false)));
        assert!(!PrefLiteral::Bool(false).matches(&PrefValue::Bool(true)));
        assert!(PrefLiteral::Int(2).matches(&PrefValue::Integer(2)));
        assert!(!PrefLiteral::Int(2).matches(&PrefValue::Float(2.5)));
        assert!(PrefLiteral::Str("off").matches(&PrefValue::String("off".to_string())));
        assert!(!PrefLiteral::Int(1).matches(&PrefValue::Bool(true)));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(PrefValue::from_f64(3.0), PrefValue::Integer(3));
        assert_eq!(PrefValue::from_f64(-1.0), PrefValue::Integer(-1));
        assert_eq!(PrefValue::from_f64(0.5), PrefValue::Float(0.5));
    }
}
