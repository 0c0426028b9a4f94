use core::fmt;

use crate::{
  cursor::{Cursor, Writer},
  error::DecodeError,
};

const QR_MASK: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const AA_MASK: u16 = 0x0400;
const TC_MASK: u16 = 0x0200;
const RD_MASK: u16 = 0x0100;
const RA_MASK: u16 = 0x0080;
const Z_SHIFT: u16 = 4;
const NIBBLE: u16 = 0x0F;
const Z_BITS: u8 = 0x07;
const AD_BIT: u8 = 0x02;
const CD_BIT: u8 = 0x01;

/// The kind of query in a message.
#[derive(Debug, Copy, Clone, Default)]
pub enum Opcode {
  /// A standard query.
  #[default]
  Query,
  /// An inverse query, obsoleted by RFC 3425.
  IQuery,
  /// A server status request.
  Status,
  /// [RFC 1996](https://tools.ietf.org/html/rfc1996) zone change notification.
  Notify,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) dynamic update.
  Update,
  /// Any other 4-bit value.
  Unassigned(u8),
}

impl Opcode {
  /// Returns the 4-bit code.
  #[inline]
  pub const fn code(&self) -> u8 {
    match self {
      Self::Query => 0,
      Self::IQuery => 1,
      Self::Status => 2,
      Self::Notify => 4,
      Self::Update => 5,
      Self::Unassigned(code) => *code & NIBBLE as u8,
    }
  }

  /// Maps the low four bits of `code` to an opcode.
  #[inline]
  pub const fn from_code(code: u8) -> Self {
    match code & NIBBLE as u8 {
      0 => Self::Query,
      1 => Self::IQuery,
      2 => Self::Status,
      4 => Self::Notify,
      5 => Self::Update,
      code => Self::Unassigned(code),
    }
  }
}

impl PartialEq for Opcode {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.code() == other.code()
  }
}

impl Eq for Opcode {}

impl core::hash::Hash for Opcode {
  #[inline]
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.code().hash(state);
  }
}

impl fmt::Display for Opcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Query => f.write_str("QUERY"),
      Self::IQuery => f.write_str("IQUERY"),
      Self::Status => f.write_str("STATUS"),
      Self::Notify => f.write_str("NOTIFY"),
      Self::Update => f.write_str("UPDATE"),
      Self::Unassigned(_) => write!(f, "OPCODE{}", self.code()),
    }
  }
}

/// The outcome of a query, carried in the RCODE field.
#[derive(Debug, Copy, Clone, Default)]
pub enum ResponseCode {
  /// No error condition.
  #[default]
  NoError,
  /// The server was unable to interpret the query.
  FormErr,
  /// The server was unable to process the query.
  ServFail,
  /// The domain name referenced in the query does not exist.
  NXDomain,
  /// The server does not support the requested kind of query.
  NotImp,
  /// The server refuses to perform the operation for policy reasons.
  Refused,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) a name exists when it should not.
  YXDomain,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) an RR set exists when it should not.
  YXRRSet,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) an RR set that should exist does not.
  NXRRSet,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) the server is not authoritative for the zone.
  NotAuth,
  /// [RFC 2136](https://tools.ietf.org/html/rfc2136) a name is not within the zone.
  NotZone,
  /// Any other 4-bit value.
  Unassigned(u8),
}

impl ResponseCode {
  /// Returns the 4-bit code.
  #[inline]
  pub const fn code(&self) -> u8 {
    match self {
      Self::NoError => 0,
      Self::FormErr => 1,
      Self::ServFail => 2,
      Self::NXDomain => 3,
      Self::NotImp => 4,
      Self::Refused => 5,
      Self::YXDomain => 6,
      Self::YXRRSet => 7,
      Self::NXRRSet => 8,
      Self::NotAuth => 9,
      Self::NotZone => 10,
      Self::Unassigned(code) => *code & NIBBLE as u8,
    }
  }

  /// Maps the low four bits of `code` to a response code.
  #[inline]
  pub const fn from_code(code: u8) -> Self {
    match code & NIBBLE as u8 {
      0 => Self::NoError,
      1 => Self::FormErr,
      2 => Self::ServFail,
      3 => Self::NXDomain,
      4 => Self::NotImp,
      5 => Self::Refused,
      6 => Self::YXDomain,
      7 => Self::YXRRSet,
      8 => Self::NXRRSet,
      9 => Self::NotAuth,
      10 => Self::NotZone,
      code => Self::Unassigned(code),
    }
  }
}

impl PartialEq for ResponseCode {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.code() == other.code()
  }
}

impl Eq for ResponseCode {}

impl core::hash::Hash for ResponseCode {
  #[inline]
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.code().hash(state);
  }
}

impl fmt::Display for ResponseCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::NoError => "NOERROR",
      Self::FormErr => "FORMERR",
      Self::ServFail => "SERVFAIL",
      Self::NXDomain => "NXDOMAIN",
      Self::NotImp => "NOTIMP",
      Self::Refused => "REFUSED",
      Self::YXDomain => "YXDOMAIN",
      Self::YXRRSet => "YXRRSET",
      Self::NXRRSet => "NXRRSET",
      Self::NotAuth => "NOTAUTH",
      Self::NotZone => "NOTZONE",
      Self::Unassigned(_) => return write!(f, "RCODE{}", self.code()),
    })
  }
}

/// The second 16-bit word of the header.
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Every bit pattern is representable, so [`Flags::from_u16`] followed by
/// [`Flags::to_u16`] is the identity.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Flags {
  qr: bool,
  opcode: Opcode,
  aa: bool,
  tc: bool,
  rd: bool,
  ra: bool,
  z: u8,
  rcode: ResponseCode,
}

impl Flags {
  /// Creates flags for a standard query with every bit cleared.
  #[inline]
  pub const fn new() -> Self {
    Self {
      qr: false,
      opcode: Opcode::Query,
      aa: false,
      tc: false,
      rd: false,
      ra: false,
      z: 0,
      rcode: ResponseCode::NoError,
    }
  }

  /// Unpacks a flags word.
  #[inline]
  pub const fn from_u16(bits: u16) -> Self {
    Self {
      qr: bits & QR_MASK != 0,
      opcode: Opcode::from_code(((bits >> OPCODE_SHIFT) & NIBBLE) as u8),
      aa: bits & AA_MASK != 0,
      tc: bits & TC_MASK != 0,
      rd: bits & RD_MASK != 0,
      ra: bits & RA_MASK != 0,
      z: ((bits >> Z_SHIFT) as u8) & Z_BITS,
      rcode: ResponseCode::from_code((bits & NIBBLE) as u8),
    }
  }

  /// Packs the flags into a word.
  #[inline]
  pub const fn to_u16(self) -> u16 {
    let mut bits = ((self.opcode.code() as u16) << OPCODE_SHIFT)
      | (((self.z & Z_BITS) as u16) << Z_SHIFT)
      | self.rcode.code() as u16;
    if self.qr {
      bits |= QR_MASK;
    }
    if self.aa {
      bits |= AA_MASK;
    }
    if self.tc {
      bits |= TC_MASK;
    }
    if self.rd {
      bits |= RD_MASK;
    }
    if self.ra {
      bits |= RA_MASK;
    }
    bits
  }

  /// Returns `true` if the message is a response.
  #[inline]
  pub const fn response(&self) -> bool {
    self.qr
  }

  /// Sets the QR bit.
  #[inline]
  pub const fn with_response(mut self, val: bool) -> Self {
    self.qr = val;
    self
  }

  /// Returns the kind of query.
  #[inline]
  pub const fn opcode(&self) -> Opcode {
    self.opcode
  }

  /// Sets the opcode.
  #[inline]
  pub const fn with_opcode(mut self, val: Opcode) -> Self {
    self.opcode = val;
    self
  }

  /// Returns `true` if the responding server is an authority for the name.
  #[inline]
  pub const fn authoritative(&self) -> bool {
    self.aa
  }

  /// Sets the AA bit.
  #[inline]
  pub const fn with_authoritative(mut self, val: bool) -> Self {
    self.aa = val;
    self
  }

  /// Returns `true` if the message was truncated by the transport.
  #[inline]
  pub const fn truncated(&self) -> bool {
    self.tc
  }

  /// Sets the TC bit.
  #[inline]
  pub const fn with_truncated(mut self, val: bool) -> Self {
    self.tc = val;
    self
  }

  /// Returns `true` if recursion is desired.
  #[inline]
  pub const fn recursion_desired(&self) -> bool {
    self.rd
  }

  /// Sets the RD bit.
  #[inline]
  pub const fn with_recursion_desired(mut self, val: bool) -> Self {
    self.rd = val;
    self
  }

  /// Returns `true` if the server supports recursion.
  #[inline]
  pub const fn recursion_available(&self) -> bool {
    self.ra
  }

  /// Sets the RA bit.
  #[inline]
  pub const fn with_recursion_available(mut self, val: bool) -> Self {
    self.ra = val;
    self
  }

  /// Returns the three Z bits, including AD and CD.
  #[inline]
  pub const fn z(&self) -> u8 {
    self.z
  }

  /// Sets the Z bits. Only the low three bits of `val` are kept.
  #[inline]
  pub const fn with_z(mut self, val: u8) -> Self {
    self.z = val & Z_BITS;
    self
  }

  /// Returns the AD bit ([RFC 4035](https://tools.ietf.org/html/rfc4035)).
  #[inline]
  pub const fn authentic_data(&self) -> bool {
    self.z & AD_BIT != 0
  }

  /// Sets the AD bit.
  #[inline]
  pub const fn with_authentic_data(mut self, val: bool) -> Self {
    self.z = if val { self.z | AD_BIT } else { self.z & !AD_BIT };
    self
  }

  /// Returns the CD bit ([RFC 4035](https://tools.ietf.org/html/rfc4035)).
  #[inline]
  pub const fn checking_disabled(&self) -> bool {
    self.z & CD_BIT != 0
  }

  /// Sets the CD bit.
  #[inline]
  pub const fn with_checking_disabled(mut self, val: bool) -> Self {
    self.z = if val { self.z | CD_BIT } else { self.z & !CD_BIT };
    self
  }

  /// Returns the response code.
  #[inline]
  pub const fn response_code(&self) -> ResponseCode {
    self.rcode
  }

  /// Sets the response code.
  #[inline]
  pub const fn with_response_code(mut self, val: ResponseCode) -> Self {
    self.rcode = val;
    self
  }
}

impl From<u16> for Flags {
  #[inline]
  fn from(value: u16) -> Self {
    Self::from_u16(value)
  }
}

impl From<Flags> for u16 {
  #[inline]
  fn from(value: Flags) -> u16 {
    value.to_u16()
  }
}

impl fmt::Display for Flags {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bits = [
      (self.qr, "qr"),
      (self.aa, "aa"),
      (self.tc, "tc"),
      (self.rd, "rd"),
      (self.ra, "ra"),
      (self.z & !(AD_BIT | CD_BIT) != 0, "z"),
      (self.authentic_data(), "ad"),
      (self.checking_disabled(), "cd"),
    ];
    let mut first = true;
    for (_, name) in bits.iter().filter(|(set, _)| *set) {
      if !first {
        f.write_str(" ")?;
      }
      f.write_str(name)?;
      first = false;
    }
    Ok(())
  }
}

/// The fixed 12-byte message header.
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Header {
  id: u16,
  flags: Flags,
  qdcount: u16,
  ancount: u16,
  nscount: u16,
  arcount: u16,
}

impl Header {
  /// Creates a header.
  #[inline]
  pub const fn new(
    id: u16,
    flags: Flags,
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
  ) -> Self {
    Self {
      id,
      flags,
      qdcount,
      ancount,
      nscount,
      arcount,
    }
  }

  /// Returns the transaction ID.
  #[inline]
  pub const fn id(&self) -> u16 {
    self.id
  }

  /// Returns the flags word.
  #[inline]
  pub const fn flags(&self) -> Flags {
    self.flags
  }

  /// Returns the number of entries in the question section.
  #[inline]
  pub const fn qdcount(&self) -> u16 {
    self.qdcount
  }

  /// Returns the number of records in the answer section.
  #[inline]
  pub const fn ancount(&self) -> u16 {
    self.ancount
  }

  /// Returns the number of records in the authority section.
  #[inline]
  pub const fn nscount(&self) -> u16 {
    self.nscount
  }

  /// Returns the number of records in the additional section.
  #[inline]
  pub const fn arcount(&self) -> u16 {
    self.arcount
  }

  pub(crate) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    Ok(Self {
      id: cur.read_u16()?,
      flags: Flags::from_u16(cur.read_u16()?),
      qdcount: cur.read_u16()?,
      ancount: cur.read_u16()?,
      nscount: cur.read_u16()?,
      arcount: cur.read_u16()?,
    })
  }

  pub(crate) fn encode(&self, w: &mut Writer) {
    w.write_u16(self.id);
    w.write_u16(self.flags.to_u16());
    w.write_u16(self.qdcount);
    w.write_u16(self.ancount);
    w.write_u16(self.nscount);
    w.write_u16(self.arcount);
  }
}

impl fmt::Display for Header {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
      self.flags.opcode, self.flags.rcode, self.id
    )?;
    write!(
      f,
      ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
      self.flags, self.qdcount, self.ancount, self.nscount, self.arcount
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_flags_word_round_trips() {
    for bits in 0..=u16::MAX {
      assert_eq!(Flags::from_u16(bits).to_u16(), bits, "0x{bits:04x}");
    }
  }

  #[test]
  fn unpack_fields() {
    // QR, opcode 2, AA, RD, RA, Z=0b111, RCODE 3
    let flags = Flags::from_u16(0b1_0010_1_0_1_1_111_0011);
    assert!(flags.response());
    assert_eq!(flags.opcode(), Opcode::Status);
    assert!(flags.authoritative());
    assert!(!flags.truncated());
    assert!(flags.recursion_desired());
    assert!(flags.recursion_available());
    assert_eq!(flags.z(), 0b111);
    assert!(flags.authentic_data());
    assert!(flags.checking_disabled());
    assert_eq!(flags.response_code(), ResponseCode::NXDomain);
  }

  #[test]
  fn ad_and_cd_live_in_z() {
    let flags = Flags::new().with_authentic_data(true);
    assert_eq!(flags.z(), AD_BIT);
    assert_eq!(flags.to_u16(), 0x0020);
    let flags = flags.with_checking_disabled(true).with_authentic_data(false);
    assert_eq!(flags.to_u16(), 0x0010);
  }

  #[test]
  fn unassigned_codes() {
    assert_eq!(Opcode::from_code(3), Opcode::Unassigned(3));
    assert_eq!(Opcode::Unassigned(3).to_string(), "OPCODE3");
    assert_eq!(ResponseCode::from_code(15), ResponseCode::Unassigned(15));
    assert_eq!(ResponseCode::Unassigned(15).code(), 15);
  }

  #[test]
  fn header_wire_form() {
    let raw = [0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let mut cur = Cursor::new(&raw);
    let header = Header::decode(&mut cur).unwrap();
    assert_eq!(header.id(), 0x1234);
    assert!(header.flags().recursion_desired());
    assert!(!header.flags().response());
    assert_eq!(header.qdcount(), 1);
    assert_eq!(
      header.to_string(),
      ";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 4660\n\
       ;; flags: rd; QUERY: 1, ANSWER: 0, AUTHORITY: 0, ADDITIONAL: 0"
    );

    let mut w = Writer::new();
    header.encode(&mut w);
    assert_eq!(w.into_inner(), raw);
  }

  #[test]
  fn short_header_is_truncated() {
    let mut cur = Cursor::new(&[0x12, 0x34, 0x01]);
    let err = Header::decode(&mut cur).unwrap_err();
    assert!(err.is_truncated());
  }
}
