//! # mailfold-imf
//!
//! RFC 5322 Internet Message Format header-field parsing library.
//!
//! ## Features
//!
//! - **Address parsing**: mailbox, mailbox-list, group, and address-list
//!   grammar, tolerating folding whitespace, nested parenthetical comments,
//!   and quoted display names
//! - **Normalization**: each parsed address carries one normalized string
//!   with comments removed, whitespace folds collapsed to a single space,
//!   and quoted-pairs reduced to the escaped character
//! - **Message dispatch**: header fields routed by name to the address
//!   grammar or captured unstructured
//! - **Fail-fast errors**: lexical and grammar errors with byte positions,
//!   no silent repair
//!
//! ## Quick Start
//!
//! ### Parsing a single field value
//!
//! ```
//! use mailfold_imf::Parser;
//!
//! let mut parser = Parser::new("Mary Smith <mary@example.net>");
//! let addresses = parser.parse_mailbox_or_group().unwrap();
//!
//! let first = addresses.addresses().next().unwrap();
//! assert_eq!(first.name.as_deref(), Some("Mary Smith <mary@example.net>"));
//! ```
//!
//! ### Groups
//!
//! ```
//! use mailfold_imf::parse_mailbox_or_group;
//!
//! let addresses = parse_mailbox_or_group("A Group:Chris <c@x.test>, joe@y.example;").unwrap();
//! let names: Vec<_> = addresses.addresses().map(|a| a.name.as_deref()).collect();
//! assert_eq!(names, [Some("Chris <c@x.test>"), Some(" joe@y.example")]);
//! ```
//!
//! ### Whole messages
//!
//! ```
//! use mailfold_imf::Message;
//!
//! let message = Message::parse(
//!     "To: joe@example.org\r\nSubject: Hello\r\n\r\nBody text\r\n",
//! ).unwrap();
//!
//! assert_eq!(message.addresses("To").count(), 1);
//! assert_eq!(message.body, "Body text\r\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod message;

pub mod parser;

pub use error::{Error, Result};
pub use message::{Field, FieldBody, Message};
pub use parser::lexer::{Lexer, Mode, Token, TokenKind};
pub use parser::{Address, AddressGroup, Addresses, Parser, parse_mailbox_or_group};
