//! Parser for user.js override files
//!
//! A small recursive descent parser over the tokens produced by
//! [`crate::lexer`]. It is used to read back an override file after settings
//! were written, so the writer can skip values that are already in effect and
//! verify that every requested directive landed.
//!
//! # Format
//!
//! ```text
//! user_pref("preference.name", value);
//! pref("preference.name", value);           // default
//! lock_pref("preference.name", value);      // locked
//! sticky_pref("preference.name", value);    // sticky
//! ```
//!
//! # Example
//!
//! ```rust
//! use ffopt::{parse_user_js, PrefType, PrefValue};
//!
//! let content = r#"
//!     // managed by ffopt
//!     user_pref("privacy.resistFingerprinting", true);
//!     user_pref("security.tls.version.min", 3);
//! "#;
//!
//! let prefs = parse_user_js(content)?;
//! assert_eq!(prefs.len(), 2);
//! assert_eq!(prefs[0].value, PrefValue::Bool(true));
//! assert_eq!(prefs[1].pref_type, PrefType::User);
//! # Ok::<(), ffopt::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Spanned, Token};
use crate::types::{PrefEntry, PrefType, PrefValue};
use std::collections::HashMap;
use std::path::Path;

/// Parse the contents of an override file into its directives, in file order
pub fn parse_user_js(content: &str) -> Result<Vec<PrefEntry>> {
    Parser::new(content)?.parse()
}

/// Read and parse an override file in one step
pub fn parse_user_js_file(path: &Path) -> Result<Vec<PrefEntry>> {
    let content = std::fs::read_to_string(path)?;
    parse_user_js(&content)
}

/// Map each key to the value Firefox will end up using
///
/// When a key is set more than once the last directive wins, which is how
/// Firefox itself evaluates user.js.
pub fn effective_values(entries: &[PrefEntry]) -> HashMap<&str, &PrefValue> {
    entries
        .iter()
        .map(|e| (e.key.as_str(), &e.value))
        .collect()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Spanned,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    fn parse(&mut self) -> Result<Vec<PrefEntry>> {
        let mut preferences = Vec::new();
        while self.current.token != Token::Eof {
            preferences.push(self.parse_statement()?);
        }
        Ok(preferences)
    }

    /// statement := pref_fn "(" string "," value ")" ";"
    fn parse_statement(&mut self) -> Result<PrefEntry> {
        let line = self.current.line;
        let pref_type = self.parse_pref_type()?;
        self.expect(Token::LeftParen)?;
        let key = self.expect_string()?;
        self.expect(Token::Comma)?;
        let value = self.parse_value()?;
        self.expect(Token::RightParen)?;
        self.expect(Token::Semicolon)?;

        Ok(PrefEntry {
            key,
            value,
            pref_type,
            line,
        })
    }

    fn parse_pref_type(&mut self) -> Result<PrefType> {
        let pref_type = match &self.current.token {
            Token::Identifier(ident) => match ident.as_str() {
                "user_pref" => PrefType::User,
                "pref" => PrefType::Default,
                "lock_pref" => PrefType::Locked,
                "sticky_pref" => PrefType::Sticky,
                _ => {
                    return Err(self.error(format!(
                        "Unknown pref function '{}'. Expected user_pref, pref, lock_pref, or sticky_pref",
                        ident
                    )))
                }
            },
            other => {
                return Err(self.error(format!("Expected pref function name, got {:?}", other)))
            }
        };
        self.advance()?;
        Ok(pref_type)
    }

    fn parse_value(&mut self) -> Result<PrefValue> {
        let value = match self.advance()? {
            Token::String(s) => PrefValue::String(s),
            Token::Number(n) => PrefValue::from_f64(n),
            Token::Boolean(b) => PrefValue::Bool(b),
            Token::Null => PrefValue::Null,
            other => return Err(self.error(format!("Expected value, got {:?}", other))),
        };
        Ok(value)
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.current.token != expected {
            return Err(self.error(format!(
                "Expected {:?}, got {:?}",
                expected, self.current.token
            )));
        }
        self.advance()?;
        Ok(())
    }

    fn expect_string(&mut self) -> Result<String> {
        if !matches!(self.current.token, Token::String(_)) {
            return Err(self.error(format!("Expected string, got {:?}", self.current.token)));
        }
        match self.advance()? {
            Token::String(s) => Ok(s),
            _ => unreachable!(),
        }
    }

    /// Move to the next token, returning the one just consumed
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next).token)
    }

    fn error(&self, message: String) -> Error {
        Error::Parser {
            line: self.current.line,
            column: self.current.column,
            message,
        }
    }
}
