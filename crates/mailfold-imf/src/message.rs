//! Message-level field dispatch over the address-grammar core.
//!
//! This is the thin orchestration layer: it reads header names, routes the
//! address-bearing fields through the mailbox/group grammar, captures every
//! other field verbatim, and reassembles the body. Date-time and message-id
//! grammars belong to separate consumers and are captured unstructured here.

use crate::Result;
use crate::parser::lexer::{Mode, TokenKind};
use crate::parser::{Address, Addresses, Parser};

/// Header fields whose value parses as a comma-separated address list.
const ADDRESS_FIELDS: &[&str] = &[
    "From",
    "Sender",
    "Reply-To",
    "To",
    "Cc",
    "Bcc",
    "Resent-From",
    "Resent-Sender",
    "Resent-To",
    "Resent-Cc",
    "Resent-Bcc",
];

fn is_address_field(name: &str) -> bool {
    ADDRESS_FIELDS.iter().any(|f| name.eq_ignore_ascii_case(f))
}

/// Bcc may carry an empty (CFWS-only) value.
fn allows_empty_value(name: &str) -> bool {
    name.eq_ignore_ascii_case("Bcc") || name.eq_ignore_ascii_case("Resent-Bcc")
}

/// A parsed header-field value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldBody {
    /// Address-bearing field: one entry per mailbox or group.
    Addresses(Vec<Addresses>),
    /// Any other field, captured verbatim with folds followed.
    Unstructured(String),
}

/// One header field: its name (without the colon) and parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Field name as written, trailing colon stripped.
    pub name: String,
    /// The parsed value.
    pub body: FieldBody,
}

impl Field {
    /// Iterates the parsed addresses of this field, flattening groups.
    /// Empty for unstructured fields.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        let list: &[Addresses] = match &self.body {
            FieldBody::Addresses(list) => list,
            FieldBody::Unstructured(_) => &[],
        };
        list.iter().flat_map(Addresses::addresses)
    }
}

/// A parsed message: the header fields in declaration order, then the body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Header fields in declaration order.
    pub fields: Vec<Field>,
    /// The raw message body, reassembled verbatim.
    pub body: String,
}

impl Message {
    /// Parses a complete message: header fields up to the blank separator
    /// line, then the body.
    ///
    /// Fields named in the address table (`From`, `Sender`, `Reply-To`,
    /// `To`, `Cc`, `Bcc`, and their `Resent-*` counterparts) go through the
    /// address grammar; everything else is captured unstructured.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser::new(input);
        let mut fields = Vec::new();
        let body = loop {
            parser.advance(Mode::FieldName)?;
            match parser.current().kind {
                TokenKind::Eof => break String::new(),
                TokenKind::Crlf => break parser.parse_body()?,
                TokenKind::FieldName => {
                    let raw = &parser.current().text;
                    let name = raw[..raw.len() - 1].to_string();
                    let body = if is_address_field(&name) {
                        tracing::debug!(field = %name, "parsing address field");
                        let list = parser.parse_address_list(allows_empty_value(&name))?;
                        FieldBody::Addresses(list)
                    } else {
                        tracing::trace!(field = %name, "capturing unstructured field");
                        FieldBody::Unstructured(parser.parse_unstructured()?)
                    };
                    fields.push(Field { name, body });
                }
                kind => {
                    return Err(parser.grammar(format!("Unexpected {kind:?} in header section")));
                }
            }
        };
        tracing::trace!(
            fields = fields.len(),
            body_bytes = body.len(),
            "message parsed"
        );
        Ok(Self { fields, body })
    }

    /// Returns the first field with the given name, ASCII case-insensitive.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Iterates the parsed addresses of the named field, flattening groups.
    /// Empty when the field is absent or unstructured.
    pub fn addresses<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Address> + use<'s> {
        self.field(name).into_iter().flat_map(Field::addresses)
    }
}
