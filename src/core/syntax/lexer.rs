//! Narrow tokenizer for Java source.
//!
//! Produces only what the recognizer needs: words, literals and punctuation.
//! Comments are dropped, except `/** */` documentation comments, which are
//! attached to the token that follows them.

use crate::core::error::ParseError;
use crate::core::source::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Word,
    Integer,
    Float,
    String,
    Char,
    /// One punctuation character, or one of `...`, `::`, `->`.
    Punct,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Documentation comment immediately preceding this token, verbatim.
    pub doc: Option<String>,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

const MULTI_CHAR_PUNCT: [&str; 3] = ["...", "::", "->"];

pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: usize,
    col: usize,
    pending_doc: Option<String>,
    tokens: Vec<Token>,
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            pending_doc: None,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        // A leading byte-order mark is not part of the program.
        if self.source.starts_with('\u{feff}') {
            self.pos = '\u{feff}'.len_utf8();
        }

        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.bump();
                continue;
            }
            if self.starts_with("//") {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with("/*") {
                self.block_comment()?;
                continue;
            }

            let (start, line, col) = (self.pos, self.line, self.col);
            let kind = if c == '"' {
                self.string()?
            } else if c == '\'' {
                self.char_literal()?
            } else if c.is_ascii_digit()
                || (c == '.' && self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()))
            {
                self.number()
            } else if c == '_' || c == '$' || c.is_alphabetic() {
                self.word();
                TokenKind::Word
            } else {
                self.punct();
                TokenKind::Punct
            };

            self.tokens.push(Token {
                kind,
                span: Span::new(start, self.pos, line, col),
                doc: self.pending_doc.take(),
            });
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.pos, self.pos, self.line, self.col),
            doc: None,
        });
        Ok(self.tokens)
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.source[self.pos..].starts_with(pattern)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn bump_str(&mut self, pattern: &str) {
        for _ in pattern.chars() {
            self.bump();
        }
    }

    fn error(&self, message: &str, line: usize, col: usize) -> ParseError {
        ParseError::new(message, line, col)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self) -> Result<(), ParseError> {
        let (start, line, col) = (self.pos, self.line, self.col);
        // `/**/` is an empty block comment, not documentation.
        let is_doc = self.starts_with("/**") && !self.starts_with("/**/");
        self.bump_str("/*");
        loop {
            if self.starts_with("*/") {
                self.bump_str("*/");
                break;
            }
            if self.bump().is_none() {
                return Err(self.error("unterminated comment", line, col));
            }
        }
        if is_doc {
            self.pending_doc = Some(self.source[start..self.pos].to_string());
        }
        Ok(())
    }

    fn string(&mut self) -> Result<TokenKind, ParseError> {
        let (line, col) = (self.line, self.col);
        if self.starts_with("\"\"\"") {
            self.bump_str("\"\"\"");
            loop {
                if self.starts_with("\\") {
                    self.bump();
                    self.bump();
                    continue;
                }
                if self.starts_with("\"\"\"") {
                    self.bump_str("\"\"\"");
                    return Ok(TokenKind::String);
                }
                if self.bump().is_none() {
                    return Err(self.error("unterminated text block", line, col));
                }
            }
        }

        self.bump();
        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::String),
                Some('\\') => {
                    self.bump();
                }
                Some('\n') | None => {
                    return Err(self.error("unterminated string literal", line, col));
                }
                Some(_) => {}
            }
        }
    }

    fn char_literal(&mut self) -> Result<TokenKind, ParseError> {
        let (line, col) = (self.line, self.col);
        self.bump();
        loop {
            match self.bump() {
                Some('\'') => return Ok(TokenKind::Char),
                Some('\\') => {
                    self.bump();
                }
                Some('\n') | None => {
                    return Err(self.error("unterminated character literal", line, col));
                }
                Some(_) => {}
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        let start = self.pos;
        let is_hex = self.starts_with("0x") || self.starts_with("0X");
        let mut is_float = false;

        while let Some(c) = self.peek_char() {
            let exponent = if is_hex {
                matches!(c, 'p' | 'P')
            } else {
                matches!(c, 'e' | 'E')
            };
            if exponent {
                is_float = true;
                self.bump();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.bump();
                }
                continue;
            }
            if c == '.' {
                // `1..2` never occurs in Java; `1.foo()` does not either, but a
                // trailing `...` belongs to varargs, not to the number.
                if self.starts_with("...") {
                    break;
                }
                is_float = true;
                self.bump();
                continue;
            }
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
                continue;
            }
            break;
        }

        let text = &self.source[start..self.pos];
        let last = text.chars().last().unwrap_or('0');
        if !is_hex && matches!(last, 'f' | 'F' | 'd' | 'D') {
            is_float = true;
        }
        if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    fn word(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '_' || c == '$' || c.is_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn punct(&mut self) {
        for pattern in MULTI_CHAR_PUNCT {
            if self.starts_with(pattern) {
                self.bump_str(pattern);
                return;
            }
        }
        self.bump();
    }
}
