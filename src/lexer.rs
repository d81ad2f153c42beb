//! Lexer for user.js override files
//!
//! Splits the directive syntax `user_pref("key", value);` into tokens. Line
//! and block comments are skipped, string escapes are resolved, and every
//! token carries the position it started at so the parser can report errors
//! against the line a user actually wrote.

use crate::error::{Error, Result};
use std::iter::Peekable;
use std::str::Chars;

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Directive name (user_pref, pref, lock_pref, sticky_pref)
    Identifier(String),
    /// String literal with escapes already processed
    String(String),
    /// Numeric literal
    Number(f64),
    Boolean(bool),
    Null,
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Eof,
}

/// A token together with its starting position (1-indexed)
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Spanned> {
        self.skip_trivia()?;

        let (line, column) = (self.line, self.column);
        let token = match self.chars.peek().copied() {
            None => Token::Eof,
            Some('(') => self.single(Token::LeftParen),
            Some(')') => self.single(Token::RightParen),
            Some(',') => self.single(Token::Comma),
            Some(';') => self.single(Token::Semicolon),
            Some('"') | Some('\'') => self.lex_string()?,
            Some('-') | Some('0'..='9') => self.lex_number()?,
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(),
            Some(c) => return Err(self.error(format!("Unexpected character: '{}'", c))),
        };

        Ok(Spanned {
            token,
            line,
            column,
        })
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    /// Consume one character, keeping line/column in sync
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: String) -> Error {
        Error::Lexer {
            line: self.line,
            column: self.column,
            message,
        }
    }

    /// Skip whitespace, `// ...`, `# ...` and `/* ... */`
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some(&'#') => self.skip_line(),
                Some(&'/') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    match self.chars.peek() {
                        Some(&'/') => self.skip_line(),
                        Some(&'*') => {
                            self.bump();
                            let mut prev = '\0';
                            loop {
                                match self.bump() {
                                    Some('/') if prev == '*' => break,
                                    Some(c) => prev = c,
                                    None => {
                                        return Err(Error::Lexer {
                                            line,
                                            column,
                                            message: "Unterminated block comment".to_string(),
                                        })
                                    }
                                }
                            }
                        }
                        _ => {
                            return Err(Error::Lexer {
                                line,
                                column,
                                message: "Unexpected character: '/'".to_string(),
                            })
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "null" => Token::Null,
            _ => Token::Identifier(ident),
        }
    }

    fn lex_string(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        let quote = self.bump();
        let mut result = String::new();

        loop {
            match self.bump() {
                Some(c) if Some(c) == quote => return Ok(Token::String(result)),
                Some('\\') => result.push(self.lex_escape()?),
                Some(c) => result.push(c),
                None => {
                    return Err(Error::Lexer {
                        line,
                        column,
                        message: "Unterminated string literal".to_string(),
                    })
                }
            }
        }
    }

    /// Resolve the escape following a backslash
    fn lex_escape(&mut self) -> Result<char> {
        let c = match self.bump() {
            Some(c) => c,
            None => return Err(self.error("Unexpected end of input in escape sequence".into())),
        };

        Ok(match c {
            '"' | '\'' | '\\' => c,
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\x08',
            'f' => '\x0c',
            '0' if !matches!(self.chars.peek(), Some(&('0'..='9'))) => '\0',
            'x' => self.lex_hex_escape(2)?,
            'u' => self.lex_hex_escape(4)?,
            other => return Err(self.error(format!("Invalid escape sequence: \\{}", other))),
        })
    }

    fn lex_hex_escape(&mut self, digits: usize) -> Result<char> {
        let mut hex = String::with_capacity(digits);
        while hex.len() < digits {
            match self.chars.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(*c);
                    self.bump();
                }
                _ => break,
            }
        }

        if hex.len() != digits {
            return Err(self.error(format!("Incomplete hex escape: {}", hex)));
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .map(|cp| char::from_u32(cp).unwrap_or('\u{FFFD}'))
            .ok_or_else(|| self.error(format!("Invalid hex escape: {}", hex)))
    }

    fn lex_number(&mut self) -> Result<Token> {
        let mut num = String::new();

        if let Some(&'-') = self.chars.peek() {
            num.push('-');
            self.bump();
        }

        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' {
                num.push(c);
                self.bump();
            } else if (c == '+' || c == '-') && num.ends_with(['e', 'E']) {
                num.push(c);
                self.bump();
            } else {
                break;
            }
        }

        num.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| self.error(format!("Failed to parse number: {}", num)))
    }
}
