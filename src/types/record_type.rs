use core::{fmt, str::FromStr};

use smol_str::SmolStr;

const AVALUE: u16 = 1;
const NSVALUE: u16 = 2;
const CNAMEVALUE: u16 = 5;
const SOAVALUE: u16 = 6;
const PTRVALUE: u16 = 12;
const MXVALUE: u16 = 15;
const TXTVALUE: u16 = 16;
const AAAAVALUE: u16 = 28;
const SRVVALUE: u16 = 33;
const ANYVALUE: u16 = 255;

/// Returned when a string does not name a record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("unknown record type string: {0}")]
pub struct UnknownRecordTypeStr(pub SmolStr);

/// A DNS resource record type.
///
/// Type codes without a dedicated variant are kept as [`RecordType::Unknown`],
/// so every 16-bit value survives a decode/encode round trip.
#[derive(Copy, Clone, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) IPv4 Address record
  A,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Name server record
  NS,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Canonical name record
  CNAME,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Start of authority record
  SOA,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Pointer record
  PTR,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Mail exchange record
  MX,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Text record
  TXT,
  /// [RFC 3596](https://tools.ietf.org/html/rfc3596) IPv6 address record
  AAAA,
  /// [RFC 2782](https://tools.ietf.org/html/rfc2782) Service locator
  SRV,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) All cached records, aka ANY
  ANY,
  /// Any other type code.
  Unknown(u16),
}

impl RecordType {
  /// Returns the 16-bit type code.
  #[inline]
  pub const fn code(&self) -> u16 {
    match self {
      Self::A => AVALUE,
      Self::NS => NSVALUE,
      Self::CNAME => CNAMEVALUE,
      Self::SOA => SOAVALUE,
      Self::PTR => PTRVALUE,
      Self::MX => MXVALUE,
      Self::TXT => TXTVALUE,
      Self::AAAA => AAAAVALUE,
      Self::SRV => SRVVALUE,
      Self::ANY => ANYVALUE,
      Self::Unknown(code) => *code,
    }
  }

  /// Maps a type code to its variant.
  #[inline]
  pub const fn from_code(code: u16) -> Self {
    match code {
      AVALUE => Self::A,
      NSVALUE => Self::NS,
      CNAMEVALUE => Self::CNAME,
      SOAVALUE => Self::SOA,
      PTRVALUE => Self::PTR,
      MXVALUE => Self::MX,
      TXTVALUE => Self::TXT,
      AAAAVALUE => Self::AAAA,
      SRVVALUE => Self::SRV,
      ANYVALUE => Self::ANY,
      _ => Self::Unknown(code),
    }
  }

  /// Returns the mnemonic of the record type, or `None` for unknown codes.
  #[inline]
  pub const fn as_str(&self) -> Option<&'static str> {
    Some(match self {
      Self::A => "A",
      Self::NS => "NS",
      Self::CNAME => "CNAME",
      Self::SOA => "SOA",
      Self::PTR => "PTR",
      Self::MX => "MX",
      Self::TXT => "TXT",
      Self::AAAA => "AAAA",
      Self::SRV => "SRV",
      Self::ANY => "ANY",
      Self::Unknown(_) => return None,
    })
  }
}

impl PartialEq for RecordType {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.code() == other.code()
  }
}

impl Eq for RecordType {}

impl core::hash::Hash for RecordType {
  #[inline]
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.code().hash(state);
  }
}

impl From<u16> for RecordType {
  #[inline]
  fn from(value: u16) -> Self {
    Self::from_code(value)
  }
}

impl From<RecordType> for u16 {
  #[inline]
  fn from(value: RecordType) -> u16 {
    value.code()
  }
}

impl fmt::Display for RecordType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.as_str() {
      Some(s) => f.write_str(s),
      // RFC 3597 generic type notation
      None => write!(f, "TYPE{}", self.code()),
    }
  }
}

impl TryFrom<&str> for RecordType {
  type Error = UnknownRecordTypeStr;

  #[inline]
  fn try_from(value: &str) -> Result<Self, Self::Error> {
    let trimmed = value.trim();
    Ok(match trimmed {
      "A" | "a" => RecordType::A,
      "NS" | "ns" => RecordType::NS,
      "CNAME" | "cname" => RecordType::CNAME,
      "SOA" | "soa" => RecordType::SOA,
      "PTR" | "ptr" => RecordType::PTR,
      "MX" | "mx" => RecordType::MX,
      "TXT" | "txt" => RecordType::TXT,
      "AAAA" | "aaaa" => RecordType::AAAA,
      "SRV" | "srv" => RecordType::SRV,
      "ANY" | "any" => RecordType::ANY,
      _ => {
        return trimmed
          .strip_prefix("TYPE")
          .or_else(|| trimmed.strip_prefix("type"))
          .and_then(|code| code.parse::<u16>().ok())
          .map(RecordType::from_code)
          .ok_or_else(|| UnknownRecordTypeStr(value.into()));
      }
    })
  }
}

impl FromStr for RecordType {
  type Err = UnknownRecordTypeStr;

  #[inline]
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    RecordType::try_from(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_codes_are_preserved() {
    let ty = RecordType::from(41);
    assert_eq!(ty, RecordType::Unknown(41));
    assert_eq!(u16::from(ty), 41);
    assert_eq!(ty.to_string(), "TYPE41");
    // a known code wrapped by hand still compares by value
    assert_eq!(RecordType::Unknown(1), RecordType::A);
  }

  #[test]
  fn parse_mnemonics() {
    assert_eq!("aaaa".parse::<RecordType>().unwrap(), RecordType::AAAA);
    assert_eq!(" MX ".parse::<RecordType>().unwrap(), RecordType::MX);
    assert_eq!("TYPE65".parse::<RecordType>().unwrap(), RecordType::Unknown(65));
    assert_eq!(
      "BOGUS".parse::<RecordType>().unwrap_err(),
      UnknownRecordTypeStr("BOGUS".into())
    );
  }
}
