use core::fmt;

use crate::{
  cursor::{Cursor, Writer},
  error::DecodeError,
  types::{Name, U32_SIZE},
};

/// ```text
/// 3.3.13. SOA RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                     MNAME                     /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                     RNAME                     /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    SERIAL                     |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    REFRESH                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                     RETRY                     |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    EXPIRE                     |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    MINIMUM                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SOA {
  mname: Name,
  rname: Name,
  serial: u32,
  refresh: u32,
  retry: u32,
  expire: u32,
  minimum: u32,
}

impl SOA {
  /// Creates a new SOA record data. The timers are in seconds.
  #[inline]
  #[allow(clippy::too_many_arguments)]
  pub const fn new(
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
  ) -> Self {
    Self {
      mname,
      rname,
      serial,
      refresh,
      retry,
      expire,
      minimum,
    }
  }

  /// The name server that was the original or primary source of data for
  /// this zone.
  #[inline]
  pub const fn mname(&self) -> &Name {
    &self.mname
  }

  /// The mailbox of the person responsible for this zone.
  #[inline]
  pub const fn rname(&self) -> &Name {
    &self.rname
  }

  /// The version number of the original copy of the zone.
  #[inline]
  pub const fn serial(&self) -> u32 {
    self.serial
  }

  /// Time interval before the zone should be refreshed.
  #[inline]
  pub const fn refresh(&self) -> u32 {
    self.refresh
  }

  /// Time interval that should elapse before a failed refresh is retried.
  #[inline]
  pub const fn retry(&self) -> u32 {
    self.retry
  }

  /// Upper limit on the time interval that can elapse before the zone is no
  /// longer authoritative.
  #[inline]
  pub const fn expire(&self) -> u32 {
    self.expire
  }

  /// The minimum TTL field that should be exported with any RR from this zone.
  #[inline]
  pub const fn minimum(&self) -> u32 {
    self.minimum
  }

  #[inline]
  pub(super) fn encoded_len(&self) -> usize {
    self.mname.encoded_len() + self.rname.encoded_len() + 5 * U32_SIZE
  }

  pub(super) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    Ok(Self {
      mname: Name::decode(cur)?,
      rname: Name::decode(cur)?,
      serial: cur.read_u32()?,
      refresh: cur.read_u32()?,
      retry: cur.read_u32()?,
      expire: cur.read_u32()?,
      minimum: cur.read_u32()?,
    })
  }

  pub(super) fn encode(&self, w: &mut Writer) {
    self.mname.encode(w, true);
    self.rname.encode(w, true);
    w.write_u32(self.serial);
    w.write_u32(self.refresh);
    w.write_u32(self.retry);
    w.write_u32(self.expire);
    w.write_u32(self.minimum);
  }
}

impl fmt::Display for SOA {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} {} {} {} {} {}",
      self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
    )
  }
}
