//! Token and lexical-mode types.

/// Lexical mode for a single token fetch.
///
/// The address grammar is context-sensitive: which character classes and
/// terminators apply depends on the grammar position, so the parser passes
/// the mode explicitly on every call to [`super::Lexer::next_token`]. The
/// lexer never stores a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Structured field scanning: atoms, quoted strings, comments, specials.
    Default,
    /// Inside a bracketed `[...]` domain literal.
    DomainLiteral,
    /// Header-name scanning at the start of a line.
    FieldName,
    /// Unstructured trailing content.
    Body,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Folding whitespace, possibly spanning one CRLF fold.
    Fws,
    /// Parenthesized comment, nested comments flattened, parentheses stripped.
    Comment,
    /// Run of atom characters.
    Atom,
    /// Atom runs joined by literal dots.
    DotAtom,
    /// Quoted string; outer quotes kept, quoted-pairs unescaped.
    QuotedString,
    /// `<`
    LAngle,
    /// `>`
    RAngle,
    /// `@`
    At,
    /// Run of domain-literal text.
    DomainText,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// Header field name including the trailing colon.
    FieldName,
    /// Raw body text up to a line terminator.
    BodyText,
    /// Bare CRLF not followed by whitespace.
    Crlf,
    /// End of input.
    Eof,
}

/// A token paired with its normalized textual representation.
///
/// Tokens are ephemeral: the lexer produces one at a time and keeps no copy,
/// so the text owns its characters and never borrows the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was recognized.
    pub kind: TokenKind,
    /// Normalized text: quoted-pairs unescaped, comment parentheses
    /// stripped, single-character tokens verbatim.
    pub text: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
