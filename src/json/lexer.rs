//! JSON lexer/tokenizer.
//!
//! Splits raw text into an ordered sequence of token slices borrowed from
//! the input. Tokens are structural characters, quoted strings (quotes
//! included, escapes untouched), numeric literals and the keywords `true`,
//! `false` and `null`.
//!
//! The number grammar here is deliberately loose: digits, an optional
//! fraction and an optional exponent are consumed greedily and the parser
//! does the full format check.

use super::limits::Limits;
use crate::error::LexError;

/// JSON lexer that produces one token slice at a time.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str, limits: Limits) -> Result<Self, LexError> {
        if input.len() > limits.max_input_size {
            return Err(LexError::InputTooLarge {
                size: input.len(),
                limit: limits.max_input_size,
            });
        }

        Ok(Self {
            input,
            pos: 0,
            limits,
        })
    }

    /// Get the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Peek at the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Consume and return the current character.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !matches!(c, ' ' | '\t' | '\n' | '\r') {
                break;
            }
            self.advance();
        }
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<&'a str>, LexError> {
        self.skip_whitespace();

        let start = self.pos;
        let token = match self.peek() {
            None => return Ok(None),
            Some('{' | '}' | '[' | ']' | ':' | ',') => {
                self.advance();
                &self.input[start..self.pos]
            }
            Some('"') => self.read_string()?,
            Some('-' | '0'..='9') => self.read_number(),
            Some(c @ ('t' | 'f' | 'n')) => self.read_literal(c)?,
            Some(c) => return Err(LexError::UnexpectedCharacter(c)),
        };
        Ok(Some(token))
    }

    /// Read a string token up to the closing unescaped quote.
    ///
    /// A backslash always swallows the character after it, so `"a\\"` ends
    /// at its last quote while `"a\"` runs on.
    fn read_string(&mut self) -> Result<&'a str, LexError> {
        let start = self.pos;
        // Opening quote
        self.advance();

        loop {
            match self.advance() {
                None => return Err(LexError::UnclosedString),
                Some('"') => break,
                Some('\\') => {
                    if self.advance().is_none() {
                        return Err(LexError::UnclosedString);
                    }
                }
                Some(_) => {}
            }
        }

        let token = &self.input[start..self.pos];
        let length = token.len() - 2;
        if length > self.limits.max_string_length {
            return Err(LexError::StringTooLong {
                length,
                limit: self.limits.max_string_length,
            });
        }

        Ok(token)
    }

    /// Read a number token: `-? digits (. digits)? ([eE] [+-]? digits)?`,
    /// with every digit run allowed to be empty.
    fn read_number(&mut self) -> &'a str {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }
        self.skip_digits();

        if self.peek() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        if let Some('e' | 'E') = self.peek() {
            self.advance();
            if let Some('+' | '-') = self.peek() {
                self.advance();
            }
            self.skip_digits();
        }

        &self.input[start..self.pos]
    }

    fn skip_digits(&mut self) {
        while let Some('0'..='9') = self.peek() {
            self.advance();
        }
    }

    /// Read one of the keyword literals, matched by fixed length.
    fn read_literal(&mut self, first: char) -> Result<&'a str, LexError> {
        let rest = &self.input[self.pos..];
        for literal in ["true", "false", "null"] {
            if rest.starts_with(literal) {
                let start = self.pos;
                self.pos += literal.len();
                return Ok(&self.input[start..self.pos]);
            }
        }

        Err(LexError::UnexpectedCharacter(first))
    }
}

/// Tokenize text with the default limits.
pub fn tokenize(text: &str) -> Result<Vec<&str>, LexError> {
    tokenize_with_limits(text, Limits::default())
}

/// Tokenize text with custom limits.
pub fn tokenize_with_limits(text: &str, limits: Limits) -> Result<Vec<&str>, LexError> {
    let mut lexer = Lexer::new(text, limits)?;
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
