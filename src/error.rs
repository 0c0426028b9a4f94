use core::fmt;

use crate::RecordType;

/// The section of a message an entry was being decoded from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Section {
  /// The fixed 12-byte header.
  Header,
  /// The question section.
  Question,
  /// The answer section.
  Answer,
  /// The authority section.
  Authority,
  /// The additional section.
  Additional,
}

impl Section {
  /// Returns the lowercase name of the section.
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Header => "header",
      Self::Question => "question",
      Self::Answer => "answer",
      Self::Authority => "authority",
      Self::Additional => "additional",
    }
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What went wrong while decoding a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeErrorKind {
  /// Fewer bytes remain than a field needs.
  #[error("truncated message: tried to read {needed} bytes, {available} available")]
  TruncatedMessage {
    /// Bytes the read asked for.
    needed: usize,
    /// Bytes left before the end of the message.
    available: usize,
  },
  /// A seek target lies outside the message.
  #[error("offset {target} is outside of the message")]
  InvalidPointer {
    /// The requested absolute offset.
    target: usize,
  },
  /// A compression pointer does not refer strictly backward.
  #[error("compression pointer to {target} does not point backward")]
  InvalidCompressionPointer {
    /// The offset the pointer refers to.
    target: usize,
  },
  /// A label length octet is neither 0..=63 nor a pointer.
  #[error("invalid label length octet 0x{0:02X}")]
  InvalidLabelLength(u8),
  /// A decoded name is longer than 255 bytes.
  #[error("domain name exceeds 255 bytes")]
  NameTooLong,
  /// RDATA does not match its declared length or the shape of its type.
  #[error("malformed {ty} RDATA: {reason}")]
  MalformedRData {
    /// The record type being decoded.
    ty: RecordType,
    /// Short description of the mismatch.
    reason: &'static str,
  },
  /// Bytes remain after the last declared section (strict mode only).
  #[error("{0} trailing bytes after the last section")]
  TrailingBytes(usize),
}

/// The error returned when a message cannot be decoded.
///
/// Decoding is all-or-nothing, so the error is the only thing returned. It
/// carries the byte offset where decoding stopped and, once the header has
/// been read, the section and entry index being decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}{}", Location::new(.section, .index))]
pub struct DecodeError {
  #[source]
  kind: DecodeErrorKind,
  offset: usize,
  section: Option<Section>,
  index: Option<usize>,
}

impl DecodeError {
  #[inline]
  pub(crate) const fn new(kind: DecodeErrorKind, offset: usize) -> Self {
    Self {
      kind,
      offset,
      section: None,
      index: None,
    }
  }

  #[inline]
  pub(crate) const fn truncated(offset: usize, needed: usize, available: usize) -> Self {
    Self::new(DecodeErrorKind::TruncatedMessage { needed, available }, offset)
  }

  #[inline]
  pub(crate) const fn malformed_rdata(offset: usize, ty: RecordType, reason: &'static str) -> Self {
    Self::new(DecodeErrorKind::MalformedRData { ty, reason }, offset)
  }

  /// Attaches the section and entry index, keeping the innermost location if
  /// one was already set.
  #[inline]
  pub(crate) fn within(mut self, section: Section, index: Option<usize>) -> Self {
    if self.section.is_none() {
      self.section = Some(section);
      self.index = index;
    }
    self
  }

  /// Returns what went wrong.
  #[inline]
  pub const fn kind(&self) -> &DecodeErrorKind {
    &self.kind
  }

  /// Returns the absolute byte offset at which decoding failed.
  #[inline]
  pub const fn offset(&self) -> usize {
    self.offset
  }

  /// Returns the section being decoded, if the failure happened inside one.
  #[inline]
  pub const fn section(&self) -> Option<Section> {
    self.section
  }

  /// Returns the zero-based index of the entry within [`section`](Self::section).
  #[inline]
  pub const fn index(&self) -> Option<usize> {
    self.index
  }

  /// Returns `true` if the message ended before a field was complete.
  #[inline]
  pub const fn is_truncated(&self) -> bool {
    matches!(self.kind, DecodeErrorKind::TruncatedMessage { .. })
  }
}

/// The ` (answer #3)` suffix of a [`DecodeError`] message.
struct Location(Option<Section>, Option<usize>);

impl Location {
  #[inline]
  const fn new(section: &Option<Section>, index: &Option<usize>) -> Self {
    Self(*section, *index)
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.0, self.1) {
      (Some(section), Some(index)) => write!(f, " ({section} #{index})"),
      (Some(section), None) => write!(f, " ({section})"),
      _ => Ok(()),
    }
  }
}

/// The error returned when a message cannot be represented on the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
  /// Opaque RDATA is tagged with a type this crate decodes into a typed
  /// variant, so the bytes would not decode back to the same value.
  #[error("opaque RDATA cannot carry the {0} type, use the typed variant")]
  OpaqueKnownType(RecordType),
  /// The RDATA of a record does not fit into the 16-bit RDLENGTH field.
  #[error("RDATA of {0} bytes exceeds 65535 bytes")]
  RDataTooLong(usize),
  /// A section holds more entries than its 16-bit count can express.
  #[error("{section} section holds {count} entries, at most 65535 allowed")]
  TooManyEntries {
    /// The offending section.
    section: Section,
    /// Number of entries in it.
    count: usize,
  },
  /// An encoded message does not fit into a TCP length prefix.
  #[error("message of {0} bytes exceeds 65535 bytes")]
  MessageTooLong(usize),
}

/// The error returned when a domain name is not valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NameError {
  /// A label between two dots is empty.
  #[error("empty label")]
  EmptyLabel,
  /// A label is longer than 63 bytes.
  #[error("label of {0} bytes exceeds 63 bytes")]
  LabelTooLong(usize),
  /// The encoded name is longer than 255 bytes.
  #[error("encoded name of {0} bytes exceeds 255 bytes")]
  NameTooLong(usize),
  /// A backslash escape is incomplete or out of range.
  #[error("invalid escape sequence")]
  InvalidEscape,
}

/// The error returned when TXT record data is not valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TxtError {
  /// A character-string is longer than 255 bytes.
  #[error("TXT string of {0} bytes exceeds 255 bytes")]
  StringTooLong(usize),
}
