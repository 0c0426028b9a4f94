use core::fmt;

use crate::{
  RecordType,
  cursor::{Cursor, Writer},
  error::{DecodeError, TxtError},
};

const MAX_CHARACTER_STRING_LEN: usize = 255;

/// ```text
/// 3.3.14. TXT RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                   TXT-DATA                    /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///
/// where:
///
/// TXT-DATA        One or more <character-string>s.
///
/// TXT RRs are used to hold descriptive text.  The semantics of the text
/// depends on the domain where it is found.
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TXT {
  strings: Vec<Vec<u8>>,
}

impl TXT {
  /// Creates a new TXT record data from raw character-strings.
  ///
  /// Fails if any string is longer than 255 bytes.
  pub fn new<I, S>(strings: I) -> Result<Self, TxtError>
  where
    I: IntoIterator<Item = S>,
    S: Into<Vec<u8>>,
  {
    strings
      .into_iter()
      .map(|s| {
        let s = s.into();
        if s.len() > MAX_CHARACTER_STRING_LEN {
          Err(TxtError::StringTooLong(s.len()))
        } else {
          Ok(s)
        }
      })
      .collect::<Result<Vec<_>, _>>()
      .map(|strings| Self { strings })
  }

  /// Returns all of character-strings in the TXT record data.
  #[inline]
  pub fn strings(&self) -> &[Vec<u8>] {
    &self.strings
  }

  /// Consumes the record data and returns the character-strings.
  #[inline]
  pub fn into_strings(self) -> Vec<Vec<u8>> {
    self.strings
  }

  #[inline]
  pub(super) fn encoded_len(&self) -> usize {
    self.strings.iter().map(|s| 1 + s.len()).sum()
  }

  /// Reads character-strings until `end`, which must be hit exactly.
  pub(super) fn decode(cur: &mut Cursor<'_>, end: usize) -> Result<Self, DecodeError> {
    let mut strings = Vec::new();
    while cur.position() < end {
      let at = cur.position();
      let len = cur.read_u8()? as usize;
      if at + 1 + len > end {
        return Err(DecodeError::malformed_rdata(
          at,
          RecordType::TXT,
          "character-string overruns RDATA",
        ));
      }
      strings.push(cur.read_bytes(len)?.to_vec());
    }
    Ok(Self { strings })
  }

  pub(super) fn encode(&self, w: &mut Writer) {
    for s in &self.strings {
      w.write_u8(s.len() as u8);
      w.write_bytes(s);
    }
  }
}

impl fmt::Display for TXT {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, s) in self.strings.iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      f.write_str("\"")?;
      for &b in s {
        match b {
          b'"' | b'\\' => write!(f, "\\{}", b as char)?,
          b' '..=b'~' => write!(f, "{}", b as char)?,
          _ => write!(f, "\\{b:03}")?,
        }
      }
      f.write_str("\"")?;
    }
    Ok(())
  }
}
