//! Address data model produced by the parser.

use std::slice;

/// One resolved mailbox.
///
/// `name` holds the fully normalized textual form: optional display name
/// plus addr-spec, with comments removed, each whitespace fold collapsed to
/// a single space, and quoted-pairs unescaped. It is `None` only for the
/// placeholder member of a group that enumerated zero recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Normalized address text, absent for the empty-group placeholder.
    pub name: Option<String>,
}

impl Address {
    pub(crate) fn new(name: String) -> Self {
        Self { name: Some(name) }
    }

    pub(crate) const fn empty() -> Self {
        Self { name: None }
    }
}

/// A named, ordered collection of addresses, e.g. `A Group: a@x, b@y;`.
///
/// The group owns its members exclusively; iteration order is declaration
/// order in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressGroup {
    /// The group's display name. Never part of any member's normalized text.
    pub display_name: String,
    /// Member addresses in parse order.
    pub addresses: Vec<Address>,
}

impl AddressGroup {
    pub(crate) fn new(display_name: String) -> Self {
        Self {
            display_name,
            addresses: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, address: Address) {
        self.addresses.push(address);
    }
}

/// The parser's polymorphic result: a single mailbox or a whole group,
/// either way a sequence of [`Address`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Addresses {
    /// One mailbox.
    Mailbox(Address),
    /// A named group of mailboxes.
    Group(AddressGroup),
}

impl Addresses {
    /// Iterates the contained addresses in declaration order.
    pub fn addresses(&self) -> slice::Iter<'_, Address> {
        match self {
            Self::Mailbox(address) => slice::from_ref(address).iter(),
            Self::Group(group) => group.addresses.iter(),
        }
    }

    /// Number of contained addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Mailbox(_) => 1,
            Self::Group(group) => group.addresses.len(),
        }
    }

    /// Returns true if no addresses are contained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for Addresses {
    type Item = Address;
    type IntoIter = std::vec::IntoIter<Address>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::Mailbox(address) => vec![address].into_iter(),
            Self::Group(group) => group.addresses.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Addresses {
    type Item = &'a Address;
    type IntoIter = slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses()
    }
}
