//! Recursive-descent parser for the mailbox, group, and address-list grammar.
//!
//! The parser drives the lexer one token at a time, selecting the lexical
//! mode for every fetch, and reconstructs a normalized textual form of each
//! address: comments dropped, every run of folding whitespace collapsed to a
//! single space, quoted-pairs reduced to the escaped character. Grammar
//! recursion mirrors the grammar itself: one function per production, no
//! pushback, no backtracking.

#![allow(clippy::missing_errors_doc)]

pub mod lexer;

mod address;

pub use address::{Address, AddressGroup, Addresses};

use crate::{Error, Result};
use lexer::{Lexer, Mode, Token, TokenKind};

/// Parses a single mailbox or group from a header-field value.
///
/// Convenience wrapper over [`Parser::parse_mailbox_or_group`].
pub fn parse_mailbox_or_group(input: &str) -> Result<Addresses> {
    Parser::new(input).parse_mailbox_or_group()
}

/// Address-grammar parser.
///
/// Owns the lexer plus the single live token. Each instance parses one
/// field value or message sequentially and is not safe to share across
/// concurrent operations; every parse call allocates its own result graph
/// with no reference back to the source buffer.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a header-field value or message text.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input.as_bytes()),
            current: Token::new(TokenKind::Eof, ""),
        }
    }

    /// Rereads the last fetched token without advancing.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Fetches the next token under the given mode into the cursor.
    pub(crate) fn advance(&mut self, mode: Mode) -> Result<()> {
        self.current = self.lexer.next_token(mode)?;
        Ok(())
    }

    /// Skips folding whitespace and comments, leaving the next semantically
    /// significant token in the cursor. Crossing at least one whitespace run
    /// prefixes the token text with a single space; comments alone leave no
    /// trace in the output.
    fn next_significant(&mut self) -> Result<()> {
        let mut crossed_fws = false;
        loop {
            self.advance(Mode::Default)?;
            match self.current.kind {
                TokenKind::Fws => crossed_fws = true,
                TokenKind::Comment => {}
                _ => break,
            }
        }
        if crossed_fws {
            self.current.text.insert(0, ' ');
        }
        Ok(())
    }

    /// Requires the cursor to hold the given token kind.
    fn expect(&self, kind: TokenKind) -> Result<()> {
        if self.current.kind == kind {
            Ok(())
        } else {
            Err(self.grammar(format!("Expected {:?}, got {:?}", kind, self.current.kind)))
        }
    }

    /// Creates a grammar error at the current position.
    pub(crate) fn grammar(&self, message: String) -> Error {
        Error::Grammar {
            position: self.lexer.position(),
            message,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.lexer.peek()
    }

    /// Parses the word run that is common to addr-spec local parts, display
    /// names, and group names. The run stays grammatically ambiguous until
    /// the token left in the cursor disambiguates it.
    fn parse_local_part_or_display_name(&mut self) -> Result<String> {
        self.next_significant()?;
        self.local_part_tail(String::new())
    }

    /// Continues the word run from the token already in the cursor.
    fn local_part_tail(&mut self, mut text: String) -> Result<String> {
        while matches!(
            self.current.kind,
            TokenKind::Atom | TokenKind::DotAtom | TokenKind::QuotedString
        ) {
            text.push_str(&self.current.text);
            self.next_significant()?;
        }
        Ok(text)
    }

    /// Parses one mailbox or group, the element of a mailbox-list or
    /// address-list.
    pub fn parse_mailbox_or_group(&mut self) -> Result<Addresses> {
        let prefix = self.parse_local_part_or_display_name()?;
        self.mailbox_or_group_with(prefix)
    }

    /// Dispatches on the token that disambiguates the word-run prefix:
    /// `@` or `<` continue a mailbox, `:` opens a group.
    fn mailbox_or_group_with(&mut self, prefix: String) -> Result<Addresses> {
        match self.current.kind {
            TokenKind::At | TokenKind::LAngle => {
                Ok(Addresses::Mailbox(self.parse_mailbox_with(prefix)?))
            }
            TokenKind::Colon => Ok(Addresses::Group(self.parse_group(prefix)?)),
            kind => Err(self.grammar(format!("Expected mailbox or group, got {kind:?}"))),
        }
    }

    fn parse_mailbox(&mut self) -> Result<Address> {
        let prefix = self.parse_local_part_or_display_name()?;
        self.parse_mailbox_with(prefix)
    }

    /// Completes a mailbox from its word-run prefix. A cursor holding
    /// neither `@` nor `<` yields the empty address, which is how a group
    /// with no recipients produces its single placeholder member.
    fn parse_mailbox_with(&mut self, prefix: String) -> Result<Address> {
        match self.current.kind {
            TokenKind::At => Ok(Address::new(self.parse_addr_spec(prefix)?)),
            TokenKind::LAngle => Ok(Address::new(self.parse_angle_addr(prefix)?)),
            _ => Ok(Address::empty()),
        }
    }

    /// Parses the `@ domain` remainder of an addr-spec. The domain is a
    /// dot-atom, an atom, or a bracketed domain literal whose interior is
    /// lexed in domain-literal mode with each whitespace run collapsed to
    /// one space.
    fn parse_addr_spec(&mut self, local_part: String) -> Result<String> {
        self.expect(TokenKind::At)?;
        let mut spec = local_part;
        spec.push_str(&self.current.text);
        self.next_significant()?;
        match self.current.kind {
            TokenKind::Atom | TokenKind::DotAtom => spec.push_str(&self.current.text),
            TokenKind::LBracket => {
                spec.push_str(&self.current.text);
                loop {
                    self.advance(Mode::DomainLiteral)?;
                    match self.current.kind {
                        TokenKind::Fws => spec.push(' '),
                        TokenKind::DomainText => spec.push_str(&self.current.text),
                        TokenKind::RBracket => {
                            spec.push(']');
                            break;
                        }
                        kind => {
                            return Err(
                                self.grammar(format!("Unexpected {kind:?} in domain literal"))
                            );
                        }
                    }
                }
            }
            kind => return Err(self.grammar(format!("Expected domain after '@', got {kind:?}"))),
        }
        Ok(spec)
    }

    /// Parses `< addr-spec >`, prepending the display name verbatim.
    fn parse_angle_addr(&mut self, display_name: String) -> Result<String> {
        self.expect(TokenKind::LAngle)?;
        let mut text = display_name;
        text.push_str(&self.current.text);
        let local_part = self.parse_local_part_or_display_name()?;
        text.push_str(&self.parse_addr_spec(local_part)?);
        self.next_significant()?;
        self.expect(TokenKind::RAngle)?;
        text.push_str(&self.current.text);
        Ok(text)
    }

    /// Parses `: [mailbox *("," mailbox)] ;` after a group display name.
    /// Reaching `;` ends the member list even without a trailing comma.
    fn parse_group(&mut self, display_name: String) -> Result<AddressGroup> {
        self.expect(TokenKind::Colon)?;
        let mut group = AddressGroup::new(display_name);
        loop {
            group.push(self.parse_mailbox()?);
            if self.current.kind == TokenKind::Semicolon {
                break;
            }
            self.next_significant()?;
            if self.current.kind != TokenKind::Comma {
                break;
            }
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(group)
    }

    /// Parses a comma-separated address list (the whole value of an
    /// address-bearing header field), terminated by a bare CRLF or end of
    /// input. With `allow_empty`, a value containing only CFWS yields an
    /// empty list (the Bcc case).
    pub fn parse_address_list(&mut self, allow_empty: bool) -> Result<Vec<Addresses>> {
        self.next_significant()?;
        if allow_empty && matches!(self.current.kind, TokenKind::Crlf | TokenKind::Eof) {
            return Ok(Vec::new());
        }
        let mut list = Vec::new();
        loop {
            let prefix = self.local_part_tail(String::new())?;
            list.push(self.mailbox_or_group_with(prefix)?);
            self.next_significant()?;
            match self.current.kind {
                TokenKind::Comma => self.next_significant()?,
                TokenKind::Crlf | TokenKind::Eof => break,
                kind => {
                    return Err(self.grammar(format!("Expected ',' or end of field, got {kind:?}")));
                }
            }
        }
        Ok(list)
    }

    /// Captures an unstructured field value verbatim, following folded
    /// continuation lines. Leaves the cursor on the terminating CRLF or EOF.
    pub(crate) fn parse_unstructured(&mut self) -> Result<String> {
        let mut value = String::new();
        loop {
            self.advance(Mode::Body)?;
            match self.current.kind {
                TokenKind::BodyText => value.push_str(&self.current.text),
                TokenKind::Crlf => {
                    if !matches!(self.peek_byte(), Some(b' ' | b'\t')) {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// Reassembles the message body verbatim from body-mode tokens.
    pub(crate) fn parse_body(&mut self) -> Result<String> {
        let mut body = String::new();
        loop {
            self.advance(Mode::Body)?;
            match self.current.kind {
                TokenKind::BodyText => body.push_str(&self.current.text),
                TokenKind::Crlf => body.push_str("\r\n"),
                _ => break,
            }
        }
        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Parses one mailbox-list element and returns the member names.
    fn parse_names(input: &str) -> Vec<Option<String>> {
        let addresses = parse_mailbox_or_group(input).unwrap();
        addresses.addresses().map(|a| a.name.clone()).collect()
    }

    fn parse_single(input: &str) -> Option<String> {
        let mut names = parse_names(input);
        assert_eq!(names.len(), 1, "expected exactly one address");
        names.remove(0)
    }

    #[test]
    fn test_mailbox() {
        assert_eq!(parse_single("abc@def.com").as_deref(), Some("abc@def.com"));
    }

    #[test]
    fn test_mailbox_with_spaces() {
        assert_eq!(
            parse_single("    abc    @\t\tdef.com\t\t ").as_deref(),
            Some(" abc @ def.com")
        );
    }

    #[test]
    fn test_mailbox_with_fws() {
        assert_eq!(
            parse_single("    abc    @\t\r\n\tdef.com\t\t ").as_deref(),
            Some(" abc @ def.com")
        );
    }

    #[test]
    fn test_mailbox_with_comments() {
        assert_eq!(
            parse_single("abc(Kuka)@(Kuka)def.com ").as_deref(),
            Some("abc@def.com")
        );
    }

    #[test]
    fn test_mailbox_with_spaces_and_comments() {
        assert_eq!(
            parse_single("abc (Kuka) @ (Kuka) def.com ").as_deref(),
            Some("abc @ def.com")
        );
    }

    #[test]
    fn test_quoted_display_name() {
        assert_eq!(
            parse_single("\"Joe Q. Public\" <john.q.public@example.com>").as_deref(),
            Some("\"Joe Q. Public\" <john.q.public@example.com>")
        );
    }

    #[test]
    fn test_atoms_display_name() {
        assert_eq!(
            parse_single("Mary Smith <mary@example.net>").as_deref(),
            Some("Mary Smith <mary@example.net>")
        );
    }

    #[test]
    fn test_colon_inside_quoted_display_name() {
        assert_eq!(
            parse_single("\"Mary Smith: Personal Account\" <smith@home.example>").as_deref(),
            Some("\"Mary Smith: Personal Account\" <smith@home.example>")
        );
    }

    #[test]
    fn test_question_mark_display_name() {
        assert_eq!(
            parse_single("Who? <one@y.test>").as_deref(),
            Some("Who? <one@y.test>")
        );
    }

    #[test]
    fn test_escaped_quotes_in_display_name() {
        assert_eq!(
            parse_single("\"Giant; \\\"Big\\\" Box\" <sysservices@example.net>").as_deref(),
            Some("\"Giant; \"Big\" Box\" <sysservices@example.net>")
        );
    }

    #[test]
    fn test_comments_in_display_name_and_angle_addr() {
        assert_eq!(
            parse_single("Pete(A nice \\) chap) <pete(his account)@silly.test(his host)>")
                .as_deref(),
            Some("Pete <pete@silly.test>")
        );
    }

    #[test]
    fn test_group_with_three_members() {
        let names = parse_names(
            "A Group(Some people)\r\n     :Chris Jones <c@(Chris's host.)public.example>,\r\n            joe@example.org,\r\n     John <jdoe@one.test> (my dear friend); (the end of the group)",
        );
        assert_eq!(
            names,
            [
                Some("Chris Jones <c@public.example>".to_string()),
                Some(" joe@example.org".to_string()),
                Some(" John <jdoe@one.test>".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_group() {
        let names = parse_names("(Empty list)(start)Hidden recipients  :(nobody(that I know))  ;");
        assert_eq!(names, [None]);
    }

    #[test]
    fn test_group_keeps_display_name() {
        let addresses = parse_mailbox_or_group("My Friends: a@x.test;").unwrap();
        match addresses {
            Addresses::Group(group) => assert_eq!(group.display_name, "My Friends"),
            Addresses::Mailbox(_) => panic!("expected a group"),
        }
    }

    #[test]
    fn test_domain_literal() {
        assert_eq!(
            parse_single("jdoe@[192.168.2.1]").as_deref(),
            Some("jdoe@[192.168.2.1]")
        );
    }

    #[test]
    fn test_domain_literal_with_fws() {
        assert_eq!(
            parse_single("jdoe@[ 192.168.2.1 ]").as_deref(),
            Some("jdoe@[ 192.168.2.1 ]")
        );
    }

    #[test]
    fn test_comment_between_domain_dot_and_atom_rejected() {
        let err = parse_mailbox_or_group("John Doe <jdoe@machine(comment).  example>").unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
    }

    #[test]
    fn test_unquoted_dot_in_display_name_rejected() {
        let err = parse_mailbox_or_group("Joe Q. Public <john.q.public@example.com>").unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
    }

    #[test]
    fn test_missing_domain() {
        let err = parse_mailbox_or_group("abc@").unwrap_err();
        assert!(matches!(err, Error::Grammar { .. }));
    }

    #[test]
    fn test_missing_angle_close() {
        let err = parse_mailbox_or_group("Chris <c@x.test").unwrap_err();
        assert!(matches!(err, Error::Grammar { .. }));
    }

    #[test]
    fn test_bare_words_are_not_an_address() {
        let err = parse_mailbox_or_group("just some words").unwrap_err();
        assert!(matches!(err, Error::Grammar { .. }));
    }

    #[test]
    fn test_group_without_semicolon() {
        let err = parse_mailbox_or_group("A Group: a@x.test, b@y.test").unwrap_err();
        assert!(matches!(err, Error::Grammar { .. }));
    }

    #[test]
    fn test_address_list() {
        let mut parser = Parser::new(" a@x.test, Mary <mary@y.test> , z@z.test");
        let list = parser.parse_address_list(false).unwrap();
        let names: Vec<_> = list
            .iter()
            .flat_map(Addresses::addresses)
            .map(|a| a.name.clone())
            .collect();
        assert_eq!(
            names,
            [
                Some(" a@x.test".to_string()),
                Some(" Mary <mary@y.test>".to_string()),
                Some(" z@z.test".to_string()),
            ]
        );
    }

    #[test]
    fn test_address_list_with_group() {
        let mut parser = Parser::new("boss@nil.test, Friends: joe@x.test, jane@y.test;");
        let list = parser.parse_address_list(false).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].len(), 1);
        assert_eq!(list[1].len(), 2);
    }

    #[test]
    fn test_address_list_stops_at_crlf() {
        let mut parser = Parser::new("a@x.test\r\nSubject: hi");
        let list = parser.parse_address_list(false).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_empty_address_list_only_with_allow_empty() {
        let mut parser = Parser::new(" (just a comment) ");
        assert!(parser.parse_address_list(true).unwrap().is_empty());

        let mut parser = Parser::new(" (just a comment) ");
        let err = parser.parse_address_list(false).unwrap_err();
        assert!(matches!(err, Error::Grammar { .. }));
    }
}
