//! Character-level lexer for Internet Message Format header fields.
//!
//! This module breaks raw text into typed tokens under mode-dependent rules
//! following the RFC 5322 grammar. The parser selects a [`Mode`] for every
//! fetch; the lexer classifies the next run of characters accordingly and
//! resolves folding whitespace, nested comments, and quoted-pair escapes so
//! the parser only ever sees normalized token text.

#![allow(clippy::missing_errors_doc)]

mod token;

pub use token::{Mode, Token, TokenKind};

use crate::{Error, Result};

/// Lexer state: the input buffer and a cursor.
///
/// The lexer holds no token of its own. [`Lexer::next_token`] hands each
/// token to the caller and irreversibly advances the cursor; there is no
/// pushback. One instance owns exclusive, sequential access to its input and
/// is not meant to be shared.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given input.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current byte position in the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Peeks at the current byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advances by one byte and returns it.
    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Reads the next token under the given mode.
    pub fn next_token(&mut self, mode: Mode) -> Result<Token> {
        match mode {
            Mode::Default => self.next_default(),
            Mode::DomainLiteral => self.next_domain_literal(),
            Mode::FieldName => self.next_field_name(),
            Mode::Body => self.next_body(),
        }
    }

    fn next_default(&mut self) -> Result<Token> {
        let Some(byte) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, ""));
        };

        match byte {
            b'(' => self.read_comment(),
            b'"' => self.read_quoted_string(),
            b'\r' => self.read_crlf_or_fold(),
            b' ' | b'\t' => self.read_fws(),
            b'<' => Ok(self.single(TokenKind::LAngle, "<")),
            b'>' => Ok(self.single(TokenKind::RAngle, ">")),
            b'@' => Ok(self.single(TokenKind::At, "@")),
            b',' => Ok(self.single(TokenKind::Comma, ",")),
            b';' => Ok(self.single(TokenKind::Semicolon, ";")),
            b':' => Ok(self.single(TokenKind::Colon, ":")),
            b'[' => Ok(self.single(TokenKind::LBracket, "[")),
            b']' => Ok(self.single(TokenKind::RBracket, "]")),
            _ if is_atext(byte) => self.read_dot_atom(),
            _ => Err(self.error(&format!("Unexpected character: {byte:#04x}"))),
        }
    }

    fn next_domain_literal(&mut self) -> Result<Token> {
        match self.peek() {
            Some(byte) if is_dtext(byte) => {
                let mut text = String::new();
                while let Some(byte) = self.peek() {
                    if is_dtext(byte) {
                        self.advance();
                        text.push(char::from(byte));
                    } else {
                        break;
                    }
                }
                Ok(Token::new(TokenKind::DomainText, text))
            }
            Some(b' ' | b'\t' | b'\r') => self.read_fws(),
            Some(b']') => Ok(self.single(TokenKind::RBracket, "]")),
            Some(byte) => {
                Err(self.error(&format!("Unexpected character in domain literal: {byte:#04x}")))
            }
            None => Err(self.error("Domain literal is missing its closing bracket")),
        }
    }

    /// Reads one header field name including its trailing colon, or the bare
    /// CRLF separating the header section from the body.
    fn next_field_name(&mut self) -> Result<Token> {
        match self.peek() {
            None => Ok(Token::new(TokenKind::Eof, "")),
            Some(b'\r') => {
                self.advance();
                if self.advance() == Some(b'\n') {
                    Ok(Token::new(TokenKind::Crlf, "\r\n"))
                } else {
                    Err(self.error("Expected LF after CR"))
                }
            }
            Some(_) => {
                let mut text = String::new();
                loop {
                    match self.peek() {
                        Some(b':') => {
                            self.advance();
                            if text.is_empty() {
                                return Err(self.error("Field name is empty"));
                            }
                            text.push(':');
                            return Ok(Token::new(TokenKind::FieldName, text));
                        }
                        Some(byte) if is_ftext(byte) => {
                            self.advance();
                            text.push(char::from(byte));
                        }
                        Some(byte) => {
                            return Err(self
                                .error(&format!("Unexpected character in field name: {byte:#04x}")));
                        }
                        None => {
                            return Err(self.error("Field name is missing its trailing colon"));
                        }
                    }
                }
            }
        }
    }

    /// Reads raw body text up to the next line terminator.
    fn next_body(&mut self) -> Result<Token> {
        match self.peek() {
            None => Ok(Token::new(TokenKind::Eof, "")),
            Some(b'\r') => {
                self.advance();
                if self.advance() == Some(b'\n') {
                    Ok(Token::new(TokenKind::Crlf, "\r\n"))
                } else {
                    Err(self.error("Expected LF after CR"))
                }
            }
            Some(_) => {
                let start = self.pos;
                while let Some(byte) = self.peek() {
                    if byte == b'\r' {
                        break;
                    }
                    self.advance();
                }
                let text = String::from_utf8(self.input[start..self.pos].to_vec())
                    .map_err(|_| self.error("Invalid UTF-8 in body text"))?;
                Ok(Token::new(TokenKind::BodyText, text))
            }
        }
    }

    /// Consumes one byte and wraps it as a single-character token.
    fn single(&mut self, kind: TokenKind, text: &str) -> Token {
        self.pos += 1;
        Token::new(kind, text)
    }

    /// Reads folding whitespace: a WSP run, optionally continued across one
    /// CRLF fold that must itself be followed by WSP.
    fn read_fws(&mut self) -> Result<Token> {
        let mut text = String::new();
        self.take_wsp_run(&mut text);
        if self.peek() == Some(b'\r') {
            self.advance();
            if self.advance() != Some(b'\n') {
                return Err(self.error("Expected LF after CR"));
            }
            text.push_str("\r\n");
            if !matches!(self.peek(), Some(b' ' | b'\t')) {
                return Err(self.error("Expected WSP after CRLF fold"));
            }
            self.take_wsp_run(&mut text);
        }
        Ok(Token::new(TokenKind::Fws, text))
    }

    /// Reads a CRLF in default mode: folded into whitespace when WSP
    /// follows, otherwise the structural line terminator.
    fn read_crlf_or_fold(&mut self) -> Result<Token> {
        self.advance();
        if self.advance() != Some(b'\n') {
            return Err(self.error("Expected LF after CR"));
        }
        if matches!(self.peek(), Some(b' ' | b'\t')) {
            let mut text = String::from("\r\n");
            self.take_wsp_run(&mut text);
            Ok(Token::new(TokenKind::Fws, text))
        } else {
            Ok(Token::new(TokenKind::Crlf, "\r\n"))
        }
    }

    fn take_wsp_run(&mut self, text: &mut String) {
        while let Some(byte) = self.peek() {
            if is_wsp(byte) {
                self.advance();
                text.push(char::from(byte));
            } else {
                break;
            }
        }
    }

    /// Reads a quoted string. The outer quotes are kept in the token text,
    /// embedded folding whitespace stays verbatim, and quoted-pairs are
    /// reduced to the escaped character.
    fn read_quoted_string(&mut self) -> Result<Token> {
        self.advance();
        let mut text = String::from("\"");
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.advance();
                    text.push('"');
                    return Ok(Token::new(TokenKind::QuotedString, text));
                }
                Some(b'\\') => {
                    self.advance();
                    match self.advance() {
                        Some(byte) if is_wsp(byte) || is_vchar(byte) => {
                            text.push(char::from(byte));
                        }
                        Some(byte) => {
                            return Err(
                                self.error(&format!("Invalid quoted-pair target: {byte:#04x}"))
                            );
                        }
                        None => {
                            return Err(self.error("Closing quote for quoted string is missing"));
                        }
                    }
                }
                Some(byte) if is_qtext(byte) => {
                    self.advance();
                    text.push(char::from(byte));
                }
                Some(b' ' | b'\t' | b'\r') => {
                    let fws = self.read_fws()?;
                    text.push_str(&fws.text);
                }
                Some(byte) => {
                    return Err(self.error(&format!(
                        "Unexpected character in quoted string: {byte:#04x}"
                    )));
                }
                None => return Err(self.error("Closing quote for quoted string is missing")),
            }
        }
    }

    /// Reads one run of atom characters.
    fn read_atom_text(&mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(byte) = self.peek() {
            if is_atext(byte) {
                self.advance();
                text.push(char::from(byte));
            } else {
                break;
            }
        }
        if text.is_empty() {
            return Err(self.error("Expected atom character"));
        }
        Ok(text)
    }

    /// Reads an atom, extended to a dot-atom when literal dots join further
    /// atom runs. Whitespace or comments around a dot are not tolerated:
    /// a dot not flanked by atom characters fails the lex.
    fn read_dot_atom(&mut self) -> Result<Token> {
        let mut text = self.read_atom_text()?;
        let mut kind = TokenKind::Atom;
        while self.peek() == Some(b'.') {
            self.advance();
            text.push('.');
            text.push_str(&self.read_atom_text()?);
            kind = TokenKind::DotAtom;
        }
        Ok(Token::new(kind, text))
    }

    /// Reads a parenthesized comment, recursing for nested comments to any
    /// depth. The token text is the contents with parentheses stripped and
    /// quoted-pairs unescaped; the parser discards it either way.
    fn read_comment(&mut self) -> Result<Token> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(b')') => {
                    self.advance();
                    return Ok(Token::new(TokenKind::Comment, text));
                }
                Some(b'(') => {
                    let nested = self.read_comment()?;
                    text.push_str(&nested.text);
                }
                Some(b'\\') => {
                    self.advance();
                    match self.advance() {
                        Some(byte) if is_wsp(byte) || is_vchar(byte) => {
                            text.push(char::from(byte));
                        }
                        Some(byte) => {
                            return Err(
                                self.error(&format!("Invalid quoted-pair target: {byte:#04x}"))
                            );
                        }
                        None => {
                            return Err(self.error("Comment is missing its closing parenthesis"));
                        }
                    }
                }
                Some(byte) if is_ctext(byte) => {
                    self.advance();
                    text.push(char::from(byte));
                }
                Some(b' ' | b'\t' | b'\r') => {
                    let fws = self.read_fws()?;
                    text.push_str(&fws.text);
                }
                Some(byte) => {
                    return Err(self.error(&format!("Unexpected character in comment: {byte:#04x}")));
                }
                None => return Err(self.error("Comment is missing its closing parenthesis")),
            }
        }
    }

    /// Creates a lexical error at the current position.
    fn error(&self, message: &str) -> Error {
        Error::Lexical {
            position: self.pos,
            message: message.to_string(),
        }
    }
}

/// Returns true if the byte may appear in an atom (RFC 5322 atext).
#[must_use]
pub const fn is_atext(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
        )
}

/// Returns true for printable US-ASCII excluding backslash and double quote.
#[must_use]
pub const fn is_qtext(byte: u8) -> bool {
    matches!(byte, 33 | 35..=91 | 93..=126)
}

/// Returns true for printable US-ASCII excluding parentheses and backslash.
#[must_use]
pub const fn is_ctext(byte: u8) -> bool {
    matches!(byte, 33..=39 | 42..=91 | 93..=126)
}

/// Returns true for printable US-ASCII excluding `[`, `]`, and backslash.
#[must_use]
pub const fn is_dtext(byte: u8) -> bool {
    matches!(byte, 33..=90 | 94..=126)
}

/// Returns true for printable US-ASCII excluding the colon.
#[must_use]
pub const fn is_ftext(byte: u8) -> bool {
    matches!(byte, 33..=57 | 59..=126)
}

/// Returns true for space or horizontal tab.
#[must_use]
pub const fn is_wsp(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

/// Returns true for visible US-ASCII (0x21 through 0x7E).
#[must_use]
pub const fn is_vchar(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E)
}
