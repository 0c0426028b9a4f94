use crate::{
  DecodeOptions, EncodeOptions, Message,
  cursor::Cursor,
  error::{DecodeError, EncodeError},
};

/// Size of the length prefix in front of every message sent over TCP
/// ([RFC 1035 §4.2.2](https://tools.ietf.org/html/rfc1035#section-4.2.2)).
pub const TCP_LENGTH_PREFIX_SIZE: usize = 2;

/// Decodes one length-prefixed message from the start of `buf`.
///
/// Returns the message and the number of bytes the frame took, prefix
/// included, so the caller can advance to the next frame. Bytes after the
/// frame are never read. Offsets in a returned error are relative to the
/// start of the message, as compression pointers are.
///
/// ## Example
///
/// ```rust
/// use dns_codec::{decode_tcp_frame, encode_tcp_frame, Message};
///
/// let mut stream = encode_tcp_frame(&Message::default()).unwrap();
/// stream.extend_from_slice(&[0, 12]);
///
/// let (msg, used) = decode_tcp_frame(&stream).unwrap();
/// assert_eq!(msg, Message::default());
/// assert_eq!(used, 14);
/// assert!(decode_tcp_frame(&stream[used..]).unwrap_err().is_truncated());
/// ```
#[inline]
pub fn decode_tcp_frame(buf: &[u8]) -> Result<(Message, usize), DecodeError> {
  decode_tcp_frame_with(buf, DecodeOptions::new())
}

/// Like [`decode_tcp_frame`], applying `opts` to the message inside the frame.
///
/// In strict mode, bytes inside the frame after the last section are an
/// error. [`DecodeOptions::max_len`] further caps the frame length.
pub fn decode_tcp_frame_with(
  buf: &[u8],
  opts: DecodeOptions,
) -> Result<(Message, usize), DecodeError> {
  let mut cur = Cursor::new(buf);
  let len = cur.read_u16()? as usize;
  let body = cur.read_bytes(len)?;
  let msg = Message::decode(body, opts)?;
  Ok((msg, TCP_LENGTH_PREFIX_SIZE + len))
}

/// Encodes `msg` behind a 2-byte length prefix.
#[inline]
pub fn encode_tcp_frame(msg: &Message) -> Result<Vec<u8>, EncodeError> {
  encode_tcp_frame_with(msg, EncodeOptions::new())
}

/// Like [`encode_tcp_frame`], encoding the message with `opts`.
///
/// Fails with [`EncodeError::MessageTooLong`] if the message does not fit
/// into the length prefix.
pub fn encode_tcp_frame_with(msg: &Message, opts: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
  let body = msg.encode(opts)?;
  let len = u16::try_from(body.len()).map_err(|_| EncodeError::MessageTooLong(body.len()))?;

  let mut frame = Vec::with_capacity(TCP_LENGTH_PREFIX_SIZE + body.len());
  frame.extend_from_slice(&len.to_be_bytes());
  frame.extend_from_slice(&body);
  Ok(frame)
}
