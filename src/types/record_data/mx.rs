use core::fmt;

use crate::{
  cursor::{Cursor, Writer},
  error::DecodeError,
  types::{Name, U16_SIZE},
};

/// ```text
/// 3.3.9. MX RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                  PREFERENCE                   |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                   EXCHANGE                    /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MX {
  preference: u16,
  exchange: Name,
}

impl MX {
  /// Creates a new MX record data.
  #[inline]
  pub const fn new(preference: u16, exchange: Name) -> Self {
    Self {
      preference,
      exchange,
    }
  }

  /// The preference given to this RR among others at the same owner.
  /// Lower values are preferred.
  #[inline]
  pub const fn preference(&self) -> u16 {
    self.preference
  }

  /// The host willing to act as a mail exchange for the owner name.
  #[inline]
  pub const fn exchange(&self) -> &Name {
    &self.exchange
  }

  #[inline]
  pub(super) fn encoded_len(&self) -> usize {
    U16_SIZE + self.exchange.encoded_len()
  }

  pub(super) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    let preference = cur.read_u16()?;
    let exchange = Name::decode(cur)?;
    Ok(Self {
      preference,
      exchange,
    })
  }

  pub(super) fn encode(&self, w: &mut Writer) {
    w.write_u16(self.preference);
    self.exchange.encode(w, true);
  }
}

impl fmt::Display for MX {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.preference, self.exchange)
  }
}
