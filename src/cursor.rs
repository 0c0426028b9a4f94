use crate::{
  error::{DecodeError, DecodeErrorKind},
  types::CompressionMap,
};

/// A bounds-checked reader over a DNS message.
///
/// All multi-byte integers are read in network byte order. The cursor never
/// reads past its limit, which is the buffer length unless an explicit cap was
/// given (e.g. the length prefix of a TCP frame).
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
  buf: &'a [u8],
  pos: usize,
  limit: usize,
}

impl<'a> Cursor<'a> {
  /// Creates a cursor over the whole buffer.
  #[inline]
  pub const fn new(buf: &'a [u8]) -> Self {
    Self {
      buf,
      pos: 0,
      limit: buf.len(),
    }
  }

  /// Creates a cursor that will not read past `limit` bytes of `buf`.
  #[inline]
  pub fn with_limit(buf: &'a [u8], limit: usize) -> Self {
    Self {
      buf,
      pos: 0,
      limit: limit.min(buf.len()),
    }
  }

  /// Returns the current absolute offset.
  #[inline]
  pub const fn position(&self) -> usize {
    self.pos
  }

  /// Returns the offset past which nothing can be read.
  #[inline]
  pub const fn limit(&self) -> usize {
    self.limit
  }

  /// Returns the number of readable bytes left.
  #[inline]
  pub const fn remaining(&self) -> usize {
    self.limit.saturating_sub(self.pos)
  }

  /// Moves the cursor to an absolute offset.
  ///
  /// Fails with `InvalidPointer` if the offset is not inside the message.
  #[inline]
  pub fn seek(&mut self, target: usize) -> Result<(), DecodeError> {
    if target >= self.limit {
      return Err(DecodeError::new(
        DecodeErrorKind::InvalidPointer { target },
        self.pos,
      ));
    }
    self.pos = target;
    Ok(())
  }

  /// Returns the next byte without consuming it.
  #[inline]
  pub fn peek_u8(&self) -> Result<u8, DecodeError> {
    if self.remaining() < 1 {
      return Err(DecodeError::truncated(self.pos, 1, 0));
    }
    Ok(self.buf[self.pos])
  }

  /// Reads one byte.
  #[inline]
  pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
    let b = self.peek_u8()?;
    self.pos += 1;
    Ok(b)
  }

  /// Reads a big-endian `u16`.
  #[inline]
  pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
    self.read_array().map(u16::from_be_bytes)
  }

  /// Reads a big-endian `u32`.
  #[inline]
  pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
    self.read_array().map(u32::from_be_bytes)
  }

  /// Reads a big-endian `i32`.
  #[inline]
  pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
    self.read_array().map(i32::from_be_bytes)
  }

  /// Reads exactly `n` bytes.
  pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
    let available = self.remaining();
    if available < n {
      return Err(DecodeError::truncated(self.pos, n, available));
    }
    let bytes = &self.buf[self.pos..self.pos + n];
    self.pos += n;
    Ok(bytes)
  }

  #[inline]
  fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
    let mut out = [0u8; N];
    out.copy_from_slice(self.read_bytes(N)?);
    Ok(out)
  }

  /// Returns to a position saved before a compression jump. Unlike
  /// [`seek`](Self::seek) this accepts the limit itself, since a name may end
  /// exactly at the end of the message.
  #[inline]
  pub(crate) fn restore(&mut self, pos: usize) {
    debug_assert!(pos <= self.limit);
    self.pos = pos;
  }

  /// Runs `f` with the limit lowered to `end`, then puts the old limit back.
  pub(crate) fn bounded<T>(
    &mut self,
    end: usize,
    f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
  ) -> Result<T, DecodeError> {
    let saved = self.limit;
    self.limit = end.min(saved);
    let res = f(self);
    self.limit = saved;
    res
  }
}

/// The write side of [`Cursor`]: an append-only, growable message buffer.
///
/// When created with [`Writer::compressed`], names written through it may be
/// replaced by pointers to earlier occurrences.
#[derive(Debug, Default)]
pub struct Writer {
  buf: Vec<u8>,
  cmap: Option<CompressionMap>,
}

impl Writer {
  /// Creates a writer that spells every name out in full.
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a writer that compresses repeated names.
  #[inline]
  pub fn compressed() -> Self {
    Self {
      buf: Vec::new(),
      cmap: Some(CompressionMap::new()),
    }
  }

  /// Returns the number of bytes written so far.
  #[inline]
  pub fn position(&self) -> usize {
    self.buf.len()
  }

  /// Appends one byte.
  #[inline]
  pub fn write_u8(&mut self, val: u8) {
    self.buf.push(val);
  }

  /// Appends a big-endian `u16`.
  #[inline]
  pub fn write_u16(&mut self, val: u16) {
    self.buf.extend_from_slice(&val.to_be_bytes());
  }

  /// Appends a big-endian `u32`.
  #[inline]
  pub fn write_u32(&mut self, val: u32) {
    self.buf.extend_from_slice(&val.to_be_bytes());
  }

  /// Appends a big-endian `i32`.
  #[inline]
  pub fn write_i32(&mut self, val: i32) {
    self.buf.extend_from_slice(&val.to_be_bytes());
  }

  /// Appends raw bytes.
  #[inline]
  pub fn write_bytes(&mut self, bytes: &[u8]) {
    self.buf.extend_from_slice(bytes);
  }

  /// Overwrites a `u16` written earlier, used to back-fill lengths.
  #[inline]
  pub(crate) fn patch_u16(&mut self, at: usize, val: u16) {
    self.buf[at..at + 2].copy_from_slice(&val.to_be_bytes());
  }

  #[inline]
  pub(crate) fn compression_map(&mut self) -> Option<&mut CompressionMap> {
    self.cmap.as_mut()
  }

  /// Consumes the writer and returns the encoded bytes.
  #[inline]
  pub fn into_inner(self) -> Vec<u8> {
    self.buf
  }
}
