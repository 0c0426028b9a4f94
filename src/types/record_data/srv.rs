use core::fmt;

use crate::{
  cursor::{Cursor, Writer},
  error::DecodeError,
  types::{Name, U16_SIZE},
};

/// ```text
/// RFC 2782                       DNS SRV RR                  February 2000
///
/// The format of the SRV RR
///
///  _Service._Proto.Name TTL Class SRV Priority Weight Port Target
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SRV {
  priority: u16,
  weight: u16,
  port: u16,
  target: Name,
}

impl SRV {
  /// Creates a new SRV record data.
  #[inline]
  pub const fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
    Self {
      priority,
      weight,
      port,
      target,
    }
  }

  /// ```text
  ///  Priority
  /// The priority of this target host.  A client MUST attempt to
  /// contact the target host with the lowest-numbered priority it can
  /// reach; target hosts with the same priority SHOULD be tried in an
  /// order defined by the weight field.
  /// ```
  #[inline]
  pub const fn priority(&self) -> u16 {
    self.priority
  }

  /// ```text
  ///  Weight
  /// A server selection mechanism.  The weight field specifies a
  /// relative weight for entries with the same priority. Larger
  /// weights SHOULD be given a proportionately higher probability of
  /// being selected.
  /// ```
  #[inline]
  pub const fn weight(&self) -> u16 {
    self.weight
  }

  /// ```text
  ///  Port
  /// The port on this target host of this service.
  /// ```
  #[inline]
  pub const fn port(&self) -> u16 {
    self.port
  }

  /// ```text
  ///  Target
  /// The domain name of the target host.  Unless and until permitted
  /// by future standards action, name compression is not to be used
  /// for this field.
  ///
  /// A Target of "." means that the service is decidedly not
  /// available at this domain.
  /// ```
  #[inline]
  pub const fn target(&self) -> &Name {
    &self.target
  }

  #[inline]
  pub(super) fn encoded_len(&self) -> usize {
    3 * U16_SIZE + self.target.encoded_len()
  }

  pub(super) fn decode(cur: &mut Cursor<'_>) -> Result<Self, DecodeError> {
    Ok(Self {
      priority: cur.read_u16()?,
      weight: cur.read_u16()?,
      port: cur.read_u16()?,
      // senders must not compress the target, but pointers are accepted
      target: Name::decode(cur)?,
    })
  }

  pub(super) fn encode(&self, w: &mut Writer) {
    w.write_u16(self.priority);
    w.write_u16(self.weight);
    w.write_u16(self.port);
    self.target.encode(w, false);
  }
}

impl fmt::Display for SRV {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} {} {}",
      self.priority, self.weight, self.port, self.target
    )
  }
}
