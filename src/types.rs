use core::fmt;
use std::collections::HashMap;

mod header;
mod message;
mod name;
mod question;
mod record;
mod record_data;
mod record_type;

pub use header::{Flags, Header, Opcode, ResponseCode};
pub use message::{Message, MessageBuilder};
pub use name::{Labels, Name};
pub use question::Question;
pub use record::{Record, RecordHeader};
pub use record_data::{MX, RecordData, SOA, SRV, TXT};
pub use record_type::{RecordType, UnknownRecordTypeStr};

pub(crate) const MESSAGE_HEADER_SIZE: usize = 12;
pub(crate) const MAX_LABEL_LEN: usize = 63;
pub(crate) const MAX_NAME_LEN: usize = 255;
pub(crate) const MAX_COMPRESSION_OFFSET: usize = 2 << 13;
pub(crate) const COMPRESSION_POINTER_MASK: u16 = 0xC000;

const IPV4_LEN: usize = 4;
const IPV6_LEN: usize = 16;
const U16_SIZE: usize = 2;
const U32_SIZE: usize = 4;

const INVALUE: u16 = 1;
const CSVALUE: u16 = 2;
const CHVALUE: u16 = 3;
const HSVALUE: u16 = 4;
const NONEVALUE: u16 = 254;
const ANYVALUE: u16 = 255;

/// A DNS class.
#[derive(Debug, Copy, Clone, Default)]
pub enum DNSClass {
  /// Internet
  #[default]
  IN,
  /// CSNET, obsolete
  CS,
  /// Chaos
  CH,
  /// Hesiod
  HS,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) NONE, used by dynamic updates
  NONE,
  /// Any class, only valid in questions
  ANY,
  /// Any other class code.
  Unknown(u16),
}

impl DNSClass {
  /// Returns the 16-bit class code.
  #[inline]
  pub const fn code(&self) -> u16 {
    match self {
      Self::IN => INVALUE,
      Self::CS => CSVALUE,
      Self::CH => CHVALUE,
      Self::HS => HSVALUE,
      Self::NONE => NONEVALUE,
      Self::ANY => ANYVALUE,
      Self::Unknown(code) => *code,
    }
  }

  /// Maps a class code to its variant.
  #[inline]
  pub const fn from_code(code: u16) -> Self {
    match code {
      INVALUE => Self::IN,
      CSVALUE => Self::CS,
      CHVALUE => Self::CH,
      HSVALUE => Self::HS,
      NONEVALUE => Self::NONE,
      ANYVALUE => Self::ANY,
      _ => Self::Unknown(code),
    }
  }
}

impl PartialEq for DNSClass {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.code() == other.code()
  }
}

impl Eq for DNSClass {}

impl core::hash::Hash for DNSClass {
  #[inline]
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.code().hash(state);
  }
}

impl From<u16> for DNSClass {
  #[inline]
  fn from(value: u16) -> Self {
    Self::from_code(value)
  }
}

impl From<DNSClass> for u16 {
  #[inline]
  fn from(value: DNSClass) -> u16 {
    value.code()
  }
}

impl fmt::Display for DNSClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::IN => f.write_str("IN"),
      Self::CS => f.write_str("CS"),
      Self::CH => f.write_str("CH"),
      Self::HS => f.write_str("HS"),
      Self::NONE => f.write_str("NONE"),
      Self::ANY => f.write_str("ANY"),
      Self::Unknown(code) => write!(f, "CLASS{code}"),
    }
  }
}

/// Offsets of name suffixes already written to a message, keyed by their
/// uncompressed wire form.
#[derive(Debug, Default)]
pub(crate) struct CompressionMap {
  map: HashMap<Box<[u8]>, u16>,
}

impl CompressionMap {
  #[inline]
  pub(crate) fn new() -> Self {
    Self {
      map: HashMap::new(),
    }
  }

  #[inline]
  pub(crate) fn insert(&mut self, suffix: &[u8], pos: u16) {
    self.map.entry(suffix.into()).or_insert(pos);
  }

  #[inline]
  pub(crate) fn find(&self, suffix: &[u8]) -> Option<u16> {
    self.map.get(suffix).copied()
  }
}
