#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]

#[cfg(test)]
mod tests;

mod cursor;
mod error;
mod frame;
mod options;
mod types;

pub use cursor::{Cursor, Writer};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, NameError, Section, TxtError};
pub use frame::{
  TCP_LENGTH_PREFIX_SIZE, decode_tcp_frame, decode_tcp_frame_with, encode_tcp_frame,
  encode_tcp_frame_with,
};
pub use options::{DecodeOptions, EncodeOptions};
pub use smol_str::SmolStr;
pub use types::{
  DNSClass, Flags, Header, Labels, MX, Message, MessageBuilder, Name, Opcode, Question, Record,
  RecordData, RecordHeader, RecordType, ResponseCode, SOA, SRV, TXT, UnknownRecordTypeStr,
};

/// Decodes a DNS message from `buf`.
///
/// The header counts decide how many entries each section holds. Bytes after
/// the last section are ignored; use [`decode_message_with`] and
/// [`DecodeOptions::with_strict`] to reject them.
///
/// ## Example
///
/// ```rust
/// use dns_codec::{decode_message, RecordType};
///
/// let query = [
///   0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
///   0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
///   0x00, 0x01, 0x00, 0x01,
/// ];
/// let msg = decode_message(&query).unwrap();
/// assert_eq!(msg.id(), 0x1234);
/// assert_eq!(msg.questions()[0].ty(), RecordType::A);
/// ```
#[inline]
pub fn decode_message(buf: &[u8]) -> Result<Message, DecodeError> {
  Message::decode(buf, DecodeOptions::new())
}

/// Decodes a DNS message from `buf` with the given options.
#[inline]
pub fn decode_message_with(buf: &[u8], opts: DecodeOptions) -> Result<Message, DecodeError> {
  Message::decode(buf, opts)
}

/// Encodes `msg` without name compression.
///
/// Section counts are taken from the sections. Fails only for values the wire
/// format cannot carry, see [`EncodeError`].
#[inline]
pub fn encode_message(msg: &Message) -> Result<Vec<u8>, EncodeError> {
  msg.encode(EncodeOptions::new())
}

/// Encodes `msg` with the given options.
///
/// ## Example
///
/// ```rust
/// use dns_codec::{decode_message, encode_message, encode_message_with, EncodeOptions, Message, Name, Record, RecordData};
/// use std::net::Ipv4Addr;
///
/// let name: Name = "www.example.com".parse().unwrap();
/// let msg = Message::builder()
///   .with_answer(Record::from_rdata(name.clone(), 300, RecordData::A(Ipv4Addr::LOCALHOST)))
///   .with_answer(Record::from_rdata(name, 300, RecordData::A(Ipv4Addr::BROADCAST)))
///   .build();
///
/// let compressed = encode_message_with(&msg, EncodeOptions::new().with_compress(true)).unwrap();
/// let plain = encode_message(&msg).unwrap();
/// assert!(compressed.len() < plain.len());
/// assert_eq!(decode_message(&compressed).unwrap(), decode_message(&plain).unwrap());
/// ```
#[inline]
pub fn encode_message_with(msg: &Message, opts: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
  msg.encode(opts)
}
