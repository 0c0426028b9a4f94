use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{
  cursor::{Cursor, Writer},
  error::DecodeError,
};

use super::{IPV4_LEN, IPV6_LEN, Name, RecordType};

mod mx;
mod soa;
mod srv;
mod txt;

pub use mx::MX;
pub use soa::SOA;
pub use srv::SRV;
pub use txt::TXT;

/// The typed payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordData {
  /// ```text
  /// -- RFC 1035 -- Domain Implementation and Specification    November 1987
  ///
  /// 3.4.1. A RDATA format
  ///
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///     |                    ADDRESS                    |
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///
  /// where:
  ///
  /// ADDRESS         A 32 bit Internet address.
  /// ```
  A(Ipv4Addr),
  /// ```text
  /// 3.3.11. NS RDATA format
  ///
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///     /                   NSDNAME                     /
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///
  /// where:
  ///
  /// NSDNAME         A <domain-name> which specifies a host which should be
  ///                 authoritative for the specified class and domain.
  /// ```
  NS(Name),
  /// ```text
  /// 3.3.1. CNAME RDATA format
  ///
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///     /                     CNAME                     /
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///
  /// where:
  ///
  /// CNAME           A <domain-name> which specifies the canonical or primary
  ///                 name for the owner.  The owner name is an alias.
  /// ```
  CNAME(Name),
  /// Start of a zone of authority, see [`SOA`].
  SOA(SOA),
  /// ```text
  /// 3.3.12. PTR RDATA format
  ///
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///     /                   PTRDNAME                    /
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///
  /// where:
  ///
  /// PTRDNAME        A <domain-name> which points to some location in the
  ///                 domain name space.
  /// ```
  PTR(Name),
  /// Mail exchange, see [`MX`].
  MX(MX),
  /// Descriptive text, see [`TXT`].
  TXT(TXT),
  /// ```text
  /// -- RFC 1886 -- IPv6 DNS Extensions              December 1995
  ///
  /// 2.2 AAAA data format
  ///
  ///    A 128 bit IPv6 address is encoded in the data portion of an AAAA
  ///    resource record in network byte order (high-order byte first).
  /// ```
  AAAA(Ipv6Addr),
  /// Service location, see [`SRV`].
  SRV(SRV),
  /// RDATA of a type this crate does not interpret, kept byte for byte.
  ///
  /// Encoding fails with [`EncodeError::OpaqueKnownType`](crate::EncodeError::OpaqueKnownType)
  /// if `code` names one of the typed variants above.
  Unknown {
    /// The record type code.
    code: u16,
    /// The raw RDATA.
    data: Vec<u8>,
  },
}

impl RecordData {
  /// Returns the type of the record data.
  #[inline]
  pub const fn ty(&self) -> RecordType {
    match self {
      Self::A(_) => RecordType::A,
      Self::NS(_) => RecordType::NS,
      Self::CNAME(_) => RecordType::CNAME,
      Self::SOA(_) => RecordType::SOA,
      Self::PTR(_) => RecordType::PTR,
      Self::MX(_) => RecordType::MX,
      Self::TXT(_) => RecordType::TXT,
      Self::AAAA(_) => RecordType::AAAA,
      Self::SRV(_) => RecordType::SRV,
      Self::Unknown { code, .. } => RecordType::from_code(*code),
    }
  }

  /// Returns `true` if RDATA of type `ty` decodes into a typed variant rather
  /// than [`RecordData::Unknown`].
  #[inline]
  pub const fn is_typed(ty: RecordType) -> bool {
    !matches!(ty, RecordType::ANY | RecordType::Unknown(_))
  }

  /// Returns the size of the RDATA when written without compression.
  pub fn encoded_len(&self) -> usize {
    match self {
      Self::A(_) => IPV4_LEN,
      Self::AAAA(_) => IPV6_LEN,
      Self::NS(name) | Self::CNAME(name) | Self::PTR(name) => name.encoded_len(),
      Self::SOA(soa) => soa.encoded_len(),
      Self::MX(mx) => mx.encoded_len(),
      Self::TXT(txt) => txt.encoded_len(),
      Self::SRV(srv) => srv.encoded_len(),
      Self::Unknown { data, .. } => data.len(),
    }
  }

  /// Decodes `len` bytes of RDATA of type `ty`.
  ///
  /// The cursor is expected to be limited to the end of the RDATA; the caller
  /// verifies that exactly `len` bytes were consumed.
  pub(crate) fn decode(
    cur: &mut Cursor<'_>,
    ty: RecordType,
    len: usize,
  ) -> Result<Self, DecodeError> {
    let start = cur.position();
    Ok(match ty {
      RecordType::A => {
        if len != IPV4_LEN {
          return Err(DecodeError::malformed_rdata(start, ty, "expected 4 bytes"));
        }
        let b = cur.read_bytes(IPV4_LEN)?;
        Self::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
      }
      RecordType::AAAA => {
        if len != IPV6_LEN {
          return Err(DecodeError::malformed_rdata(start, ty, "expected 16 bytes"));
        }
        let mut octets = [0u8; IPV6_LEN];
        octets.copy_from_slice(cur.read_bytes(IPV6_LEN)?);
        Self::AAAA(Ipv6Addr::from(octets))
      }
      RecordType::NS => Self::NS(Name::decode(cur)?),
      RecordType::CNAME => Self::CNAME(Name::decode(cur)?),
      RecordType::PTR => Self::PTR(Name::decode(cur)?),
      RecordType::SOA => Self::SOA(SOA::decode(cur)?),
      RecordType::MX => Self::MX(MX::decode(cur)?),
      RecordType::SRV => Self::SRV(SRV::decode(cur)?),
      RecordType::TXT => Self::TXT(TXT::decode(cur, start + len)?),
      RecordType::ANY | RecordType::Unknown(_) => Self::Unknown {
        code: ty.code(),
        data: cur.read_bytes(len)?.to_vec(),
      },
    })
  }

  /// Writes the RDATA, without the RDLENGTH prefix.
  ///
  /// Names in NS, CNAME, PTR, MX and SOA may be compressed (RFC 1035 §4.1.4);
  /// the SRV target never is (RFC 2782).
  pub(crate) fn encode(&self, w: &mut Writer) {
    match self {
      Self::A(addr) => w.write_bytes(&addr.octets()),
      Self::AAAA(addr) => w.write_bytes(&addr.octets()),
      Self::NS(name) | Self::CNAME(name) | Self::PTR(name) => name.encode(w, true),
      Self::SOA(soa) => soa.encode(w),
      Self::MX(mx) => mx.encode(w),
      Self::TXT(txt) => txt.encode(w),
      Self::SRV(srv) => srv.encode(w),
      Self::Unknown { data, .. } => w.write_bytes(data),
    }
  }
}

impl fmt::Display for RecordData {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::A(addr) => write!(f, "{addr}"),
      Self::AAAA(addr) => write!(f, "{addr}"),
      Self::NS(name) | Self::CNAME(name) | Self::PTR(name) => write!(f, "{name}"),
      Self::SOA(soa) => write!(f, "{soa}"),
      Self::MX(mx) => write!(f, "{mx}"),
      Self::TXT(txt) => write!(f, "{txt}"),
      Self::SRV(srv) => write!(f, "{srv}"),
      // RFC 3597 generic RDATA notation
      Self::Unknown { data, .. } => {
        write!(f, "\\# {}", data.len())?;
        if !data.is_empty() {
          f.write_str(" ")?;
          for b in data {
            write!(f, "{b:02x}")?;
          }
        }
        Ok(())
      }
    }
  }
}

impl From<Ipv4Addr> for RecordData {
  #[inline]
  fn from(value: Ipv4Addr) -> Self {
    Self::A(value)
  }
}

impl From<Ipv6Addr> for RecordData {
  #[inline]
  fn from(value: Ipv6Addr) -> Self {
    Self::AAAA(value)
  }
}

impl From<SOA> for RecordData {
  #[inline]
  fn from(value: SOA) -> Self {
    Self::SOA(value)
  }
}

impl From<MX> for RecordData {
  #[inline]
  fn from(value: MX) -> Self {
    Self::MX(value)
  }
}

impl From<TXT> for RecordData {
  #[inline]
  fn from(value: TXT) -> Self {
    Self::TXT(value)
  }
}

impl From<SRV> for RecordData {
  #[inline]
  fn from(value: SRV) -> Self {
    Self::SRV(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::DecodeErrorKind;

  fn decode(buf: &[u8], ty: RecordType) -> Result<RecordData, DecodeError> {
    let mut cur = Cursor::new(buf);
    let data = cur.bounded(buf.len(), |c| RecordData::decode(c, ty, buf.len()))?;
    assert_eq!(cur.position(), buf.len(), "RDATA not fully consumed");
    Ok(data)
  }

  fn encode(data: &RecordData) -> Vec<u8> {
    let mut w = Writer::new();
    data.encode(&mut w);
    w.into_inner()
  }

  #[test]
  fn a_and_aaaa() {
    let a = decode(&[93, 184, 216, 34], RecordType::A).unwrap();
    assert_eq!(a, RecordData::A(Ipv4Addr::new(93, 184, 216, 34)));
    assert!(a.is_a());
    assert_eq!(a.to_string(), "93.184.216.34");

    let v6: Ipv6Addr = "2606:2800:220:1:248:1893:25c8:1946".parse().unwrap();
    let aaaa = decode(&v6.octets(), RecordType::AAAA).unwrap();
    assert_eq!(aaaa, RecordData::AAAA(v6));
    assert_eq!(encode(&aaaa), v6.octets());
  }

  #[test]
  fn address_length_mismatch() {
    let err = decode(&[1, 2, 3], RecordType::A).unwrap_err();
    assert_eq!(
      err.kind(),
      &DecodeErrorKind::MalformedRData {
        ty: RecordType::A,
        reason: "expected 4 bytes"
      }
    );
    let err = decode(&[0; 4], RecordType::AAAA).unwrap_err();
    assert!(matches!(err.kind(), DecodeErrorKind::MalformedRData { ty: RecordType::AAAA, .. }));
  }

  #[test]
  fn unknown_is_opaque() {
    let raw = [0x00, 0x01, 0xde, 0xad];
    let data = decode(&raw, RecordType::Unknown(99)).unwrap();
    assert!(data.is_unknown());
    assert_eq!(data.ty(), RecordType::Unknown(99));
    assert_eq!(encode(&data), raw);
    assert_eq!(data.to_string(), "\\# 4 0001dead");

    let empty = decode(&[], RecordType::Unknown(10)).unwrap();
    assert_eq!(empty.to_string(), "\\# 0");
  }

  #[test]
  fn name_valued() {
    let raw = b"\x03ns1\x07example\x03net\x00";
    for ty in [RecordType::NS, RecordType::CNAME, RecordType::PTR] {
      let data = decode(raw, ty).unwrap();
      assert_eq!(data.ty(), ty);
      assert_eq!(data.to_string(), "ns1.example.net.");
      assert_eq!(data.encoded_len(), raw.len());
      assert_eq!(encode(&data), raw);
    }
  }

  #[test]
  fn typed_codes_never_decode_opaque() {
    for code in [1, 2, 5, 6, 12, 15, 16, 28, 33, 255, 65280] {
      let ty = RecordType::from_code(code);
      let opaque = matches!(decode(&[], ty), Ok(RecordData::Unknown { .. }));
      assert_eq!(opaque, !RecordData::is_typed(ty), "type {ty}");
    }
  }
}
