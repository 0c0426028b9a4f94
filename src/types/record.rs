use core::fmt;

use crate::{
  cursor::{Cursor, Writer},
  error::{DecodeError, EncodeError},
};

use super::{DNSClass, Name, RecordData, RecordType};

/// The fields all resource records share.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordHeader {
  name: Name,
  ty: RecordType,
  class: DNSClass,
  ttl: i32,
}

impl RecordHeader {
  /// Returns the owner name of the record.
  #[inline]
  pub const fn name(&self) -> &Name {
    &self.name
  }

  /// Returns the type of the record.
  #[inline]
  pub const fn ty(&self) -> RecordType {
    self.ty
  }

  /// Returns the class of the record.
  #[inline]
  pub const fn class(&self) -> DNSClass {
    self.class
  }

  /// Returns the time-to-live of the record, in seconds.
  ///
  /// The field is signed on the wire; values with the high bit set are kept
  /// as they are rather than clamped.
  #[inline]
  pub const fn ttl(&self) -> i32 {
    self.ttl
  }
}

/// A resource record.
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                                               |
/// /                                               /
/// /                      NAME                     /
/// |                                               |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     CLASS                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TTL                      |
/// |                                               |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                   RDLENGTH                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
/// /                     RDATA                     /
/// /                                               /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// RDLENGTH is not stored; it is computed from the RDATA when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
  header: RecordHeader,
  data: RecordData,
}

impl Record {
  /// Creates a new resource record of class `IN`.
  #[inline]
  pub fn from_rdata(name: Name, ttl: i32, data: RecordData) -> Self {
    Self::new(name, DNSClass::IN, ttl, data)
  }

  /// Creates a new resource record.
  #[inline]
  pub fn new(name: Name, class: DNSClass, ttl: i32, data: RecordData) -> Self {
    Self {
      header: RecordHeader {
        name,
        ty: data.ty(),
        class,
        ttl,
      },
      data,
    }
  }

  /// Consumes the record and returns the [`RecordHeader`] and [`RecordData`].
  #[inline]
  pub fn into_components(self) -> (RecordHeader, RecordData) {
    (self.header, self.data)
  }

  /// Returns a reference to the record's header.
  #[inline]
  pub const fn header(&self) -> &RecordHeader {
    &self.header
  }

  /// Returns a reference to the record's data.
  #[inline]
  pub const fn data(&self) -> &RecordData {
    &self.data
  }

  /// Returns the owner name of the record.
  #[inline]
  pub const fn name(&self) -> &Name {
    &self.header.name
  }

  /// Returns the type of the record.
  #[inline]
  pub const fn ty(&self) -> RecordType {
    self.header.ty
  }

  /// Returns the class of the record.
  #[inline]
  pub const fn class(&self) -> DNSClass {
    self.header.class
  }

  /// Returns the time-to-live of the record, in seconds.
  #[inline]
  pub const fn ttl(&self) -> i32 {
    self.header.ttl
  }

  pub(crate) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    let name = Name::decode(cur)?;
    let ty = RecordType::from_code(cur.read_u16()?);
    let class = DNSClass::from_code(cur.read_u16()?);
    let ttl = cur.read_i32()?;
    let rdlength = cur.read_u16()? as usize;

    let start = cur.position();
    let available = cur.remaining();
    if available < rdlength {
      return Err(DecodeError::truncated(start, rdlength, available));
    }

    let end = start + rdlength;
    let data = cur
      .bounded(end, |cur| RecordData::decode(cur, ty, rdlength))
      .map_err(|e| {
        // the message holds all of RDLENGTH, so a short read means the
        // RDATA itself is too short for its type
        if e.is_truncated() {
          DecodeError::malformed_rdata(e.offset(), ty, "RDATA ends inside a field")
        } else {
          e
        }
      })?;

    if cur.position() != end {
      return Err(DecodeError::malformed_rdata(
        cur.position(),
        ty,
        "RDLENGTH does not match the RDATA",
      ));
    }

    Ok(Self {
      header: RecordHeader {
        name,
        ty,
        class,
        ttl,
      },
      data,
    })
  }

  pub(crate) fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
    if self.data.is_unknown() && RecordData::is_typed(self.header.ty) {
      return Err(EncodeError::OpaqueKnownType(self.header.ty));
    }

    self.header.name.encode(w, true);
    w.write_u16(self.header.ty.code());
    w.write_u16(self.header.class.code());
    w.write_i32(self.header.ttl);

    let rdlength_at = w.position();
    w.write_u16(0);
    let start = w.position();
    self.data.encode(w);

    let rdlength = w.position() - start;
    if rdlength > u16::MAX as usize {
      return Err(EncodeError::RDataTooLong(rdlength));
    }
    w.patch_u16(rdlength_at, rdlength as u16);
    Ok(())
  }
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}\t{}\t{}\t{}\t{}",
      self.header.name, self.header.ttl, self.header.class, self.header.ty, self.data
    )
  }
}

#[cfg(test)]
mod tests {
  use std::net::Ipv4Addr;

  use super::*;
  use crate::error::DecodeErrorKind;

  fn decode(buf: &[u8]) -> Result<Record, DecodeError> {
    Record::decode(&mut Cursor::new(buf))
  }

  fn a_record(ttl: [u8; 4], rdata: &[u8]) -> Vec<u8> {
    let mut buf = b"\x07example\x03com\x00\x00\x01\x00\x01".to_vec();
    buf.extend_from_slice(&ttl);
    buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    buf.extend_from_slice(rdata);
    buf
  }

  #[test]
  fn a_record_with_high_bit_ttl() {
    let raw = a_record([0x80, 0x00, 0x00, 0x01], &[93, 184, 216, 34]);
    let record = decode(&raw).unwrap();
    assert_eq!(record.ttl(), i32::MIN + 1);
    assert_eq!(record.data(), &RecordData::A(Ipv4Addr::new(93, 184, 216, 34)));
    assert_eq!(record.ty(), RecordType::A);
    assert_eq!(record.to_string(), "example.com.\t-2147483647\tIN\tA\t93.184.216.34");

    let mut w = Writer::new();
    record.encode(&mut w).unwrap();
    assert_eq!(w.into_inner(), raw);
  }

  #[test]
  fn rdlength_longer_than_rdata() {
    // CNAME RDATA holding a root name plus one stray byte
    let mut raw = b"\x00\x00\x05\x00\x01\x00\x00\x00\x3c\x00\x02".to_vec();
    raw.extend_from_slice(&[0x00, 0xff]);
    let err = decode(&raw).unwrap_err();
    assert!(matches!(
      err.kind(),
      DecodeErrorKind::MalformedRData {
        ty: RecordType::CNAME,
        ..
      }
    ));
  }

  #[test]
  fn rdlength_shorter_than_fields() {
    // MX RDATA claiming 3 bytes: preference plus a label length of 4
    let mut raw = b"\x00\x00\x0f\x00\x01\x00\x00\x00\x3c\x00\x03".to_vec();
    raw.extend_from_slice(&[0x00, 0x0a, 0x04, b'm', b'a', b'i', b'l', 0x00]);
    let err = decode(&raw).unwrap_err();
    assert!(matches!(
      err.kind(),
      DecodeErrorKind::MalformedRData {
        ty: RecordType::MX,
        ..
      }
    ));
  }

  #[test]
  fn rdlength_past_end_is_truncation() {
    let mut raw = a_record([0, 0, 0, 60], &[93, 184, 216, 34]);
    raw.pop();
    let err = decode(&raw).unwrap_err();
    assert!(err.is_truncated());
  }

  #[test]
  fn oversized_rdata_is_rejected() {
    let data = RecordData::Unknown {
      code: 65280,
      data: vec![0; u16::MAX as usize + 1],
    };
    let record = Record::from_rdata(Name::root(), 0, data);
    let mut w = Writer::new();
    assert_eq!(
      record.encode(&mut w).unwrap_err(),
      EncodeError::RDataTooLong(u16::MAX as usize + 1)
    );
  }

  #[test]
  fn opaque_a_is_rejected_before_writing() {
    let data = RecordData::Unknown {
      code: 1,
      data: vec![93, 184, 216, 34],
    };
    let record = Record::from_rdata(Name::root(), 0, data);
    let mut w = Writer::new();
    assert_eq!(
      record.encode(&mut w).unwrap_err(),
      EncodeError::OpaqueKnownType(RecordType::A)
    );
    assert_eq!(w.position(), 0);
  }
}
