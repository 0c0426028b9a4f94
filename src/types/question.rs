use core::fmt;

use crate::{
  cursor::{Cursor, Writer},
  error::DecodeError,
};

use super::{DNSClass, Name, RecordType};

/// An entry of the question section.
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                                               |
/// /                     QNAME                     /
/// /                                               /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     QTYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     QCLASS                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
  name: Name,
  ty: RecordType,
  class: DNSClass,
}

impl Question {
  /// Creates a question of class `IN`.
  #[inline]
  pub const fn new(name: Name, ty: RecordType) -> Self {
    Self {
      name,
      ty,
      class: DNSClass::IN,
    }
  }

  /// Sets the class of the question.
  #[inline]
  pub fn with_class(mut self, class: DNSClass) -> Self {
    self.class = class;
    self
  }

  /// Returns the name being asked about.
  #[inline]
  pub const fn name(&self) -> &Name {
    &self.name
  }

  /// Returns the query type.
  #[inline]
  pub const fn ty(&self) -> RecordType {
    self.ty
  }

  /// Returns the query class.
  #[inline]
  pub const fn class(&self) -> DNSClass {
    self.class
  }

  pub(crate) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    Ok(Self {
      name: Name::decode(cur)?,
      ty: RecordType::from_code(cur.read_u16()?),
      class: DNSClass::from_code(cur.read_u16()?),
    })
  }

  pub(crate) fn encode(&self, w: &mut Writer) {
    self.name.encode(w, true);
    w.write_u16(self.ty.code());
    w.write_u16(self.class.code());
  }
}

impl fmt::Display for Question {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, ";{}\t\t{}\t{}", self.name, self.class, self.ty)
  }
}
