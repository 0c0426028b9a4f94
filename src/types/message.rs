use core::fmt;

use crate::{
  DecodeOptions, EncodeOptions,
  cursor::{Cursor, Writer},
  error::{DecodeError, DecodeErrorKind, EncodeError, Section},
};

use super::{Flags, Header, Question, Record};

/// A DNS message: the header and its four sections.
///
/// The section counts of the header are not stored. They are derived from the
/// sections, so a message can never disagree with its own header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Message {
  id: u16,
  flags: Flags,
  questions: Vec<Question>,
  answers: Vec<Record>,
  authorities: Vec<Record>,
  additionals: Vec<Record>,
}

impl Message {
  /// Creates an empty message.
  #[inline]
  pub const fn new(id: u16, flags: Flags) -> Self {
    Self {
      id,
      flags,
      questions: Vec::new(),
      answers: Vec::new(),
      authorities: Vec::new(),
      additionals: Vec::new(),
    }
  }

  /// Returns a builder for a message.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use dns_codec::{Flags, Message, Question, RecordType};
  ///
  /// let msg = Message::builder()
  ///   .with_id(0x1234)
  ///   .with_flags(Flags::new().with_recursion_desired(true))
  ///   .with_question(Question::new("example.com".parse().unwrap(), RecordType::A))
  ///   .build();
  /// assert_eq!(msg.header().qdcount(), 1);
  /// ```
  #[inline]
  pub const fn builder() -> MessageBuilder {
    MessageBuilder::new()
  }

  /// Returns the transaction ID.
  #[inline]
  pub const fn id(&self) -> u16 {
    self.id
  }

  /// Sets the transaction ID.
  #[inline]
  pub fn set_id(&mut self, id: u16) -> &mut Self {
    self.id = id;
    self
  }

  /// Returns the flags word.
  #[inline]
  pub const fn flags(&self) -> Flags {
    self.flags
  }

  /// Sets the flags word.
  #[inline]
  pub fn set_flags(&mut self, flags: Flags) -> &mut Self {
    self.flags = flags;
    self
  }

  /// Returns the header as it would be written, with counts taken from the
  /// sections. Counts above 65535 saturate; such a message cannot be encoded.
  #[inline]
  pub fn header(&self) -> Header {
    Header::new(
      self.id,
      self.flags,
      saturating_count(self.questions.len()),
      saturating_count(self.answers.len()),
      saturating_count(self.authorities.len()),
      saturating_count(self.additionals.len()),
    )
  }

  /// Returns the question section.
  #[inline]
  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  /// Returns the answer section.
  #[inline]
  pub fn answers(&self) -> &[Record] {
    &self.answers
  }

  /// Returns the authority section.
  #[inline]
  pub fn authorities(&self) -> &[Record] {
    &self.authorities
  }

  /// Returns the additional section.
  #[inline]
  pub fn additionals(&self) -> &[Record] {
    &self.additionals
  }

  /// Appends an entry to the question section.
  #[inline]
  pub fn push_question(&mut self, question: Question) -> &mut Self {
    self.questions.push(question);
    self
  }

  /// Appends a record to the answer section.
  #[inline]
  pub fn push_answer(&mut self, record: Record) -> &mut Self {
    self.answers.push(record);
    self
  }

  /// Appends a record to the authority section.
  #[inline]
  pub fn push_authority(&mut self, record: Record) -> &mut Self {
    self.authorities.push(record);
    self
  }

  /// Appends a record to the additional section.
  #[inline]
  pub fn push_additional(&mut self, record: Record) -> &mut Self {
    self.additionals.push(record);
    self
  }

  /// Returns the records of the answer, authority and additional sections,
  /// in wire order.
  #[inline]
  pub fn records(&self) -> impl Iterator<Item = &Record> {
    self
      .answers
      .iter()
      .chain(&self.authorities)
      .chain(&self.additionals)
  }

  /// Decodes a message from the start of `buf`.
  pub(crate) fn decode(buf: &[u8], opts: DecodeOptions) -> Result<Self, DecodeError> {
    let limit = opts.max_len().unwrap_or(buf.len());
    let mut cur = Cursor::with_limit(buf, limit);
    let msg = Self::decode_from(&mut cur)?;

    if opts.strict() && cur.remaining() > 0 {
      return Err(DecodeError::new(
        DecodeErrorKind::TrailingBytes(cur.remaining()),
        cur.position(),
      ));
    }
    Ok(msg)
  }

  /// Decodes a message at the cursor, leaving anything after the last
  /// section unread.
  pub(crate) fn decode_from(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    let header = Header::decode(cur).map_err(|e| e.within(Section::Header, None))?;

    let questions = decode_section(cur, header.qdcount(), Section::Question, Question::decode)?;
    let answers = decode_section(cur, header.ancount(), Section::Answer, Record::decode)?;
    let authorities = decode_section(cur, header.nscount(), Section::Authority, Record::decode)?;
    let additionals = decode_section(cur, header.arcount(), Section::Additional, Record::decode)?;

    Ok(Self {
      id: header.id(),
      flags: header.flags(),
      questions,
      answers,
      authorities,
      additionals,
    })
  }

  /// Encodes the message into a fresh buffer.
  pub(crate) fn encode(&self, opts: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut w = if opts.compress() {
      Writer::compressed()
    } else {
      Writer::new()
    };
    self.encode_into(&mut w)?;
    Ok(w.into_inner())
  }

  pub(crate) fn encode_into(&self, w: &mut Writer) -> Result<(), EncodeError> {
    let header = Header::new(
      self.id,
      self.flags,
      section_count(Section::Question, self.questions.len())?,
      section_count(Section::Answer, self.answers.len())?,
      section_count(Section::Authority, self.authorities.len())?,
      section_count(Section::Additional, self.additionals.len())?,
    );
    header.encode(w);

    for question in &self.questions {
      question.encode(w);
    }
    for record in self.records() {
      record.encode(w)?;
    }
    Ok(())
  }
}

fn decode_section<T>(
  cur: &mut Cursor<'_>,
  count: u16,
  section: Section,
  decode: impl Fn(&mut Cursor<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
  // every entry takes at least 5 bytes, so a lying count cannot force a
  // large allocation
  let mut entries = Vec::with_capacity((count as usize).min(cur.remaining() / 5));
  for index in 0..count as usize {
    entries.push(decode(cur).map_err(|e| e.within(section, Some(index)))?);
  }
  Ok(entries)
}

#[inline]
fn section_count(section: Section, count: usize) -> Result<u16, EncodeError> {
  u16::try_from(count).map_err(|_| EncodeError::TooManyEntries { section, count })
}

#[inline]
fn saturating_count(count: usize) -> u16 {
  u16::try_from(count).unwrap_or(u16::MAX)
}

impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.header())?;

    if !self.questions.is_empty() {
      f.write_str("\n\n;; QUESTION SECTION:")?;
      for question in &self.questions {
        write!(f, "\n{question}")?;
      }
    }

    for (title, records) in [
      ("ANSWER", &self.answers),
      ("AUTHORITY", &self.authorities),
      ("ADDITIONAL", &self.additionals),
    ] {
      if records.is_empty() {
        continue;
      }
      write!(f, "\n\n;; {title} SECTION:")?;
      for record in records {
        write!(f, "\n{record}")?;
      }
    }
    Ok(())
  }
}

/// A builder for [`Message`].
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
  msg: Message,
}

impl MessageBuilder {
  /// Returns a builder for an empty query with ID 0.
  #[inline]
  pub const fn new() -> Self {
    Self {
      msg: Message::new(0, Flags::new()),
    }
  }

  /// Sets the transaction ID.
  #[inline]
  pub fn with_id(mut self, id: u16) -> Self {
    self.msg.id = id;
    self
  }

  /// Sets the flags word.
  #[inline]
  pub fn with_flags(mut self, flags: Flags) -> Self {
    self.msg.flags = flags;
    self
  }

  /// Appends an entry to the question section.
  #[inline]
  pub fn with_question(mut self, question: Question) -> Self {
    self.msg.questions.push(question);
    self
  }

  /// Appends a record to the answer section.
  #[inline]
  pub fn with_answer(mut self, record: Record) -> Self {
    self.msg.answers.push(record);
    self
  }

  /// Appends a record to the authority section.
  #[inline]
  pub fn with_authority(mut self, record: Record) -> Self {
    self.msg.authorities.push(record);
    self
  }

  /// Appends a record to the additional section.
  #[inline]
  pub fn with_additional(mut self, record: Record) -> Self {
    self.msg.additionals.push(record);
    self
  }

  /// Returns the finished message.
  #[inline]
  pub fn build(self) -> Message {
    self.msg
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Name, RecordData, RecordType};

  #[test]
  fn counts_follow_sections() {
    let mut msg = Message::new(7, Flags::new());
    msg.push_question(Question::new(Name::root(), RecordType::NS));
    msg
      .push_answer(Record::from_rdata(Name::root(), 60, RecordData::NS(Name::root())))
      .push_answer(Record::from_rdata(Name::root(), 60, RecordData::NS(Name::root())));
    let header = msg.header();
    assert_eq!(header.qdcount(), 1);
    assert_eq!(header.ancount(), 2);
    assert_eq!(header.nscount(), 0);
    assert_eq!(header.arcount(), 0);
  }

  #[test]
  fn error_names_section_and_entry() {
    // one question that is fine, a second one cut short
    let mut raw = vec![0, 1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0];
    raw.extend_from_slice(b"\x00\x00\x01\x00\x01");
    raw.extend_from_slice(b"\x00\x00\x01");
    let err = Message::decode(&raw, DecodeOptions::new()).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.section(), Some(Section::Question));
    assert_eq!(err.index(), Some(1));

    let err = Message::decode(&raw[..5], DecodeOptions::new()).unwrap_err();
    assert_eq!(err.section(), Some(Section::Header));
    assert_eq!(err.index(), None);
  }

  #[test]
  fn lying_count_fails_without_huge_allocation() {
    let raw = [0, 1, 0, 0, 0xff, 0xff, 0, 0, 0, 0, 0, 0];
    let err = Message::decode(&raw, DecodeOptions::new()).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.index(), Some(0));
  }

  #[test]
  fn display_lists_non_empty_sections() {
    let msg = Message::builder()
      .with_id(1)
      .with_question(Question::new(Name::root(), RecordType::NS))
      .build();
    assert_eq!(
      msg.to_string(),
      ";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1\n\
       ;; flags: ; QUERY: 1, ANSWER: 0, AUTHORITY: 0, ADDITIONAL: 0\n\
       \n\
       ;; QUESTION SECTION:\n\
       ;.\t\tIN\tNS"
    );
  }
}
