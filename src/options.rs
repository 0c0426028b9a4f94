/// Options for [`decode_message_with`](crate::decode_message_with).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  strict: bool,
  max_len: Option<usize>,
}

impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl DecodeOptions {
  /// Returns a new instance of [`DecodeOptions`].
  ///
  /// Trailing bytes are ignored and the whole buffer is readable.
  #[inline]
  pub const fn new() -> Self {
    Self {
      strict: false,
      max_len: None,
    }
  }

  /// Returns `true` if bytes after the last section are rejected.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use dns_codec::DecodeOptions;
  ///
  /// let opts = DecodeOptions::new().with_strict(true);
  /// assert!(opts.strict());
  /// ```
  #[inline]
  pub const fn strict(&self) -> bool {
    self.strict
  }

  /// Sets whether bytes after the last section fail the decode with
  /// [`TrailingBytes`](crate::DecodeErrorKind::TrailingBytes).
  #[inline]
  pub const fn with_strict(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  /// Returns the number of leading bytes of the buffer the decoder may read.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use dns_codec::DecodeOptions;
  ///
  /// let opts = DecodeOptions::new().with_max_len(512);
  /// assert_eq!(opts.max_len(), Some(512));
  /// ```
  #[inline]
  pub const fn max_len(&self) -> Option<usize> {
    self.max_len
  }

  /// Caps the decoder to the first `max_len` bytes of the buffer. Anything
  /// past the cap is treated as if the buffer ended there.
  #[inline]
  pub const fn with_max_len(mut self, max_len: usize) -> Self {
    self.max_len = Some(max_len);
    self
  }
}

/// Options for [`encode_message_with`](crate::encode_message_with).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
  compress: bool,
}

impl EncodeOptions {
  /// Returns a new instance of [`EncodeOptions`], writing every name in full.
  #[inline]
  pub const fn new() -> Self {
    Self { compress: false }
  }

  /// Returns `true` if repeated names are replaced by compression pointers.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use dns_codec::EncodeOptions;
  ///
  /// let opts = EncodeOptions::new().with_compress(true);
  /// assert!(opts.compress());
  /// ```
  #[inline]
  pub const fn compress(&self) -> bool {
    self.compress
  }

  /// Sets whether repeated names are replaced by compression pointers.
  #[inline]
  pub const fn with_compress(mut self, compress: bool) -> Self {
    self.compress = compress;
    self
  }
}
