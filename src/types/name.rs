use core::{
  fmt,
  hash::{Hash, Hasher},
  str::FromStr,
};

use smallvec_wrapper::XXLargeVec;

use crate::{
  cursor::{Cursor, Writer},
  error::{DecodeError, DecodeErrorKind, NameError},
};

use super::{COMPRESSION_POINTER_MASK, MAX_COMPRESSION_OFFSET, MAX_LABEL_LEN, MAX_NAME_LEN};

const LABEL_KIND_MASK: u8 = 0b1100_0000;
const POINTER_KIND: u8 = 0b1100_0000;
const LITERAL_KIND: u8 = 0;

/// A domain name.
///
/// The name is kept in uncompressed wire form: each label prefixed by its
/// length, without the terminating root label. Labels are stored exactly as
/// decoded, but comparison and hashing ignore ASCII case (RFC 4343).
#[derive(Clone)]
pub struct Name {
  wire: XXLargeVec<u8>,
}

impl PartialEq for Name {
  fn eq(&self, other: &Self) -> bool {
    // length octets are <= 63 and never collide with ASCII letters
    self.wire.eq_ignore_ascii_case(&other.wire)
  }
}

impl Eq for Name {}

impl Hash for Name {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.wire.len());
    for b in self.wire.iter() {
      state.write_u8(b.to_ascii_lowercase());
    }
  }
}

impl Default for Name {
  #[inline]
  fn default() -> Self {
    Self::root()
  }
}

impl fmt::Debug for Name {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Name").field(&format_args!("{self}")).finish()
  }
}

impl fmt::Display for Name {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_root() {
      return f.write_str(".");
    }

    for label in self.labels() {
      for &b in label {
        match b {
          b'.' | b'\\' => write!(f, "\\{}", b as char)?,
          b'!'..=b'~' => write!(f, "{}", b as char)?,
          _ => write!(f, "\\{b:03}")?,
        }
      }
      f.write_str(".")?;
    }
    Ok(())
  }
}

impl FromStr for Name {
  type Err = NameError;

  /// Parses a name in presentation format.
  ///
  /// The trailing dot is optional. `\.` and `\\` escape a literal character
  /// and `\DDD` gives a byte in decimal.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() || s == "." {
      return Ok(Self::root());
    }

    let bytes = s.as_bytes();
    let mut wire = XXLargeVec::with_capacity(bytes.len() + 1);
    let mut label = Vec::with_capacity(MAX_LABEL_LEN);
    let mut i = 0;

    while i < bytes.len() {
      match bytes[i] {
        b'\\' => {
          let rest = &bytes[i + 1..];
          if is_ddd(rest) {
            label.push(ddd_to_byte(rest)?);
            i += 4;
          } else if let Some(&c) = rest.first() {
            label.push(c);
            i += 2;
          } else {
            return Err(NameError::InvalidEscape);
          }
        }
        b'.' => {
          push_label(&mut wire, &label)?;
          label.clear();
          i += 1;
        }
        c => {
          label.push(c);
          i += 1;
        }
      }
    }

    if !label.is_empty() {
      push_label(&mut wire, &label)?;
    }

    Ok(Self { wire })
  }
}

impl TryFrom<&str> for Name {
  type Error = NameError;

  #[inline]
  fn try_from(value: &str) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl Name {
  /// Returns the root name `.`.
  #[inline]
  pub fn root() -> Self {
    Self {
      wire: XXLargeVec::with_capacity(0),
    }
  }

  /// Builds a name from raw labels, most specific first.
  ///
  /// ```
  /// use dns_codec::Name;
  ///
  /// let name = Name::from_labels(["www", "example", "com"]).unwrap();
  /// assert_eq!(name.to_string(), "www.example.com.");
  /// ```
  pub fn from_labels<I, L>(labels: I) -> Result<Self, NameError>
  where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
  {
    let mut wire = XXLargeVec::with_capacity(MAX_NAME_LEN);
    for label in labels {
      push_label(&mut wire, label.as_ref())?;
    }
    Ok(Self { wire })
  }

  /// Returns an iterator over the labels, most specific first.
  #[inline]
  pub fn labels(&self) -> Labels<'_> {
    Labels { wire: &self.wire }
  }

  /// Returns the number of labels, not counting the root.
  #[inline]
  pub fn label_count(&self) -> usize {
    self.labels().count()
  }

  /// Returns `true` if this is the root name.
  #[inline]
  pub fn is_root(&self) -> bool {
    self.wire.is_empty()
  }

  /// Returns the length of the uncompressed wire form, including the root
  /// label.
  #[inline]
  pub fn encoded_len(&self) -> usize {
    self.wire.len() + 1
  }

  /// Returns the uncompressed wire form without the root label.
  #[inline]
  pub fn as_wire(&self) -> &[u8] {
    &self.wire
  }

  /// Reads a name at the cursor, following compression pointers.
  ///
  /// On return the cursor sits right after the name as it appears at the
  /// starting offset: after the terminator, or after the first pointer.
  pub(crate) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    let mut wire = XXLargeVec::with_capacity(MAX_NAME_LEN);
    let mut resume = None;

    loop {
      let at = cur.position();
      let octet = cur.read_u8()?;

      match octet & LABEL_KIND_MASK {
        POINTER_KIND => {
          let low = cur.read_u8()?;
          let target = (((octet & !LABEL_KIND_MASK) as usize) << 8) | low as usize;
          if target >= at {
            return Err(DecodeError::new(
              DecodeErrorKind::InvalidCompressionPointer { target },
              at,
            ));
          }

          if resume.is_none() {
            resume = Some(cur.position());
          }
          cur.seek(target)?;
        }
        LITERAL_KIND => {
          if octet == 0 {
            break;
          }

          let len = octet as usize;
          // the length octet, the label, and the root label still to come
          if wire.len() + 1 + len + 1 > MAX_NAME_LEN {
            return Err(DecodeError::new(DecodeErrorKind::NameTooLong, at));
          }

          let label = cur.read_bytes(len)?;
          wire.push(octet);
          wire.extend_from_slice(label);
        }
        _ => {
          return Err(DecodeError::new(
            DecodeErrorKind::InvalidLabelLength(octet),
            at,
          ));
        }
      }
    }

    if let Some(pos) = resume {
      cur.restore(pos);
    }

    Ok(Self { wire })
  }

  /// Writes the name. With `compress` set and a compressing writer, the
  /// longest suffix already present in the message is replaced by a pointer.
  pub(crate) fn encode(&self, w: &mut Writer, compress: bool) {
    let wire: &[u8] = &self.wire;
    let mut off = 0;

    while off < wire.len() {
      let suffix = &wire[off..];

      if compress {
        let pos = w.position();
        let mut pointer = None;
        if let Some(cmap) = w.compression_map() {
          match cmap.find(suffix) {
            Some(p) => pointer = Some(p),
            None if pos < MAX_COMPRESSION_OFFSET => cmap.insert(suffix, pos as u16),
            None => {}
          }
        }

        if let Some(p) = pointer {
          w.write_u16(COMPRESSION_POINTER_MASK | p);
          return;
        }
      }

      let end = off + 1 + wire[off] as usize;
      w.write_bytes(&wire[off..end]);
      off = end;
    }

    w.write_u8(0);
  }
}

/// An iterator over the labels of a [`Name`].
#[derive(Debug, Clone)]
pub struct Labels<'a> {
  wire: &'a [u8],
}

impl<'a> Iterator for Labels<'a> {
  type Item = &'a [u8];

  fn next(&mut self) -> Option<Self::Item> {
    let (&len, rest) = self.wire.split_first()?;
    let (label, rest) = rest.split_at(len as usize);
    self.wire = rest;
    Some(label)
  }
}

fn push_label(wire: &mut XXLargeVec<u8>, label: &[u8]) -> Result<(), NameError> {
  let len = label.len();
  if len == 0 {
    return Err(NameError::EmptyLabel);
  }

  if len > MAX_LABEL_LEN {
    return Err(NameError::LabelTooLong(len));
  }

  let encoded = wire.len() + 1 + len + 1;
  if encoded > MAX_NAME_LEN {
    return Err(NameError::NameTooLong(encoded));
  }

  wire.push(len as u8);
  wire.extend_from_slice(label);
  Ok(())
}

#[inline]
fn ddd_to_byte(s: &[u8]) -> Result<u8, NameError> {
  let val = (s[0] - b'0') as u16 * 100 + (s[1] - b'0') as u16 * 10 + (s[2] - b'0') as u16;
  u8::try_from(val).map_err(|_| NameError::InvalidEscape)
}

#[inline]
const fn is_ddd(s: &[u8]) -> bool {
  s.len() >= 3 && s[0].is_ascii_digit() && s[1].is_ascii_digit() && s[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode_at(buf: &[u8], at: usize) -> Result<(Name, usize), DecodeError> {
    let mut cur = Cursor::new(buf);
    cur.seek(at).unwrap();
    Name::decode(&mut cur).map(|n| (n, cur.position()))
  }

  #[test]
  fn decode_literal() {
    let buf = b"\x07example\x03com\x00\xff";
    let (name, end) = decode_at(buf, 0).unwrap();
    assert_eq!(name.labels().collect::<Vec<_>>(), [&b"example"[..], b"com"]);
    assert_eq!(end, 13);
    assert_eq!(name.encoded_len(), 13);
  }

  #[test]
  fn decode_root() {
    let (name, end) = decode_at(&[0], 0).unwrap();
    assert!(name.is_root());
    assert_eq!(end, 1);
    assert_eq!(name.to_string(), ".");
  }

  #[test]
  fn pointer_resumes_after_itself() {
    // "example.com" at 0, then "www" + pointer to 0 at 13
    let mut buf = b"\x07example\x03com\x00".to_vec();
    buf.extend_from_slice(b"\x03www\xc0\x00\xaa");
    let (name, end) = decode_at(&buf, 13).unwrap();
    assert_eq!(name, "www.example.com".parse().unwrap());
    assert_eq!(end, 19);
  }

  #[test]
  fn pointer_chain() {
    // "com" at 0, "example" + ptr(0) at 5, ptr(5) at 15
    let buf = b"\x03com\x00\x07example\xc0\x00\xc0\x05";
    let (name, end) = decode_at(buf, 15).unwrap();
    assert_eq!(name.to_string(), "example.com.");
    assert_eq!(end, 17);
  }

  #[test]
  fn forward_pointer_rejected() {
    let buf = b"\xc0\x02\x03com\x00";
    let err = decode_at(buf, 0).unwrap_err();
    assert_eq!(
      err.kind(),
      &DecodeErrorKind::InvalidCompressionPointer { target: 2 }
    );
    assert_eq!(err.offset(), 0);
  }

  #[test]
  fn self_pointer_rejected() {
    let buf = b"\x03www\xc0\x04";
    let err = decode_at(buf, 0).unwrap_err();
    assert_eq!(
      err.kind(),
      &DecodeErrorKind::InvalidCompressionPointer { target: 4 }
    );
  }

  #[test]
  fn reserved_label_kinds_rejected() {
    for octet in [0x40u8, 0x7f, 0x80, 0xbf] {
      let buf = [octet, 0, 0];
      let err = decode_at(&buf, 0).unwrap_err();
      assert_eq!(err.kind(), &DecodeErrorKind::InvalidLabelLength(octet));
    }
  }

  #[test]
  fn looping_pointers_hit_name_limit() {
    // label "a" at 0 followed by a pointer back to it, forever
    let buf = b"\x01a\xc0\x00";
    let err = decode_at(buf, 0).unwrap_err();
    assert_eq!(err.kind(), &DecodeErrorKind::NameTooLong);
  }

  #[test]
  fn name_at_limit() {
    // 3 labels of 63 + one of 61: 64 * 3 + 62 + 1 = 255
    let mut labels = vec!["a".repeat(63); 3];
    labels.push("b".repeat(61));
    let name = Name::from_labels(&labels).unwrap();
    assert_eq!(name.encoded_len(), 255);

    let mut w = Writer::new();
    name.encode(&mut w, false);
    let buf = w.into_inner();
    assert_eq!(decode_at(&buf, 0).unwrap().0, name);

    labels[3].push('b');
    assert_eq!(
      Name::from_labels(&labels).unwrap_err(),
      NameError::NameTooLong(256)
    );
  }

  #[test]
  fn truncated_label() {
    let err = decode_at(b"\x07exam", 0).unwrap_err();
    assert!(err.is_truncated());
    let err = decode_at(b"\x03com\xc0", 4).unwrap_err();
    assert!(err.is_truncated());
  }

  #[test]
  fn case_preserved_but_ignored_in_eq() {
    let (name, _) = decode_at(b"\x07ExAmPlE\x03COM\x00", 0).unwrap();
    assert_eq!(name.to_string(), "ExAmPlE.COM.");
    assert_eq!(name, "example.com.".parse().unwrap());
  }

  #[test]
  fn parse_presentation() {
    let name: Name = r"a\.b.c\032d.\\".parse().unwrap();
    assert_eq!(
      name.labels().collect::<Vec<_>>(),
      [&b"a.b"[..], b"c d", b"\\"]
    );
    assert_eq!(name.to_string(), r"a\.b.c\032d.\\.");

    assert_eq!("a..b".parse::<Name>().unwrap_err(), NameError::EmptyLabel);
    assert_eq!(".com".parse::<Name>().unwrap_err(), NameError::EmptyLabel);
    assert_eq!(r"a\999".parse::<Name>().unwrap_err(), NameError::InvalidEscape);
    assert_eq!(r"a\".parse::<Name>().unwrap_err(), NameError::InvalidEscape);
    assert_eq!(
      "x".repeat(64).parse::<Name>().unwrap_err(),
      NameError::LabelTooLong(64)
    );
  }

  #[test]
  fn encode_literal() {
    let name: Name = "example.com".parse().unwrap();
    let mut w = Writer::new();
    name.encode(&mut w, true);
    assert_eq!(w.into_inner(), b"\x07example\x03com\x00");
  }

  #[test]
  fn encode_reuses_suffixes() {
    let mut w = Writer::compressed();
    let first: Name = "www.example.com".parse().unwrap();
    let second: Name = "mail.example.com".parse().unwrap();
    first.encode(&mut w, true);
    second.encode(&mut w, true);
    first.encode(&mut w, true);
    let buf = w.into_inner();
    // "mail" then a pointer to "example.com" at offset 4
    assert_eq!(&buf[17..], b"\x04mail\xc0\x04\xc0\x00");

    let (a, next) = decode_at(&buf, 17).unwrap();
    assert_eq!(a, second);
    assert_eq!(decode_at(&buf, next).unwrap().0, first);
  }

  #[test]
  fn uncompressed_field_in_compressing_writer() {
    let mut w = Writer::compressed();
    let name: Name = "example.com".parse().unwrap();
    name.encode(&mut w, true);
    name.encode(&mut w, false);
    assert_eq!(w.position(), 26);
  }
}
