use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{
  DNSClass, Flags, MX, Message, Name, Question, Record, RecordData, RecordType, SOA, SRV, TXT,
};

/// Generates one `#[test]` per record fixture, named `<suite>_<fixture>`, that
/// runs `suite` on the fixture.
macro_rules! test_suites {
  ($suite:ident {
    $($name:ident),+$(,)?
  }) => {
    $(
      paste::paste! {
        #[test]
        fn [< $suite _ $name >]() {
          $crate::tests::initialize_tests_tracing();
          $suite($crate::tests::fixtures::[< $name >]());
        }
      }
    )*
  }
}

mod compression;
mod truncation;

/// Initialize the tracing for the unit tests.
pub fn initialize_tests_tracing() {
  use std::sync::Once;
  static TRACE: Once = Once::new();
  TRACE.call_once(|| {
    let filter = std::env::var("DNS_CODEC_TESTING_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing::subscriber::set_global_default(
      tracing_subscriber::fmt::fmt()
        .without_time()
        .with_line_number(true)
        .with_env_filter(filter)
        .with_file(false)
        .with_target(true)
        .with_ansi(true)
        .with_test_writer()
        .finish(),
    )
    .unwrap();
  });
}

pub(crate) fn name(s: &str) -> Name {
  s.parse().unwrap()
}

/// A response asking for `record`'s name and type, carrying `record` in
/// every record section.
pub(crate) fn response_with(record: Record) -> Message {
  Message::builder()
    .with_id(0xcafe)
    .with_flags(
      Flags::new()
        .with_response(true)
        .with_recursion_desired(true)
        .with_recursion_available(true),
    )
    .with_question(Question::new(record.name().clone(), record.ty()))
    .with_answer(record.clone())
    .with_authority(record.clone())
    .with_additional(record)
    .build()
}

/// One record per supported RDATA shape.
pub(crate) mod fixtures {
  use super::*;

  pub(crate) fn a() -> Record {
    Record::from_rdata(
      name("example.com"),
      300,
      RecordData::A(Ipv4Addr::new(93, 184, 216, 34)),
    )
  }

  pub(crate) fn aaaa() -> Record {
    Record::from_rdata(
      name("example.com"),
      300,
      RecordData::AAAA(Ipv6Addr::new(0x2606, 0x2800, 0x220, 1, 0x248, 0x1893, 0x25c8, 0x1946)),
    )
  }

  pub(crate) fn ns() -> Record {
    Record::from_rdata(
      name("example.com"),
      172800,
      RecordData::NS(name("a.iana-servers.net")),
    )
  }

  pub(crate) fn cname() -> Record {
    Record::from_rdata(
      name("www.example.com"),
      3600,
      RecordData::CNAME(name("example.com")),
    )
  }

  pub(crate) fn soa() -> Record {
    Record::from_rdata(
      name("example.com"),
      3600,
      RecordData::SOA(SOA::new(
        name("ns.icann.org"),
        name("noc.dns.icann.org"),
        2024081411,
        7200,
        3600,
        1209600,
        3600,
      )),
    )
  }

  pub(crate) fn mx() -> Record {
    Record::from_rdata(
      name("example.com"),
      3600,
      RecordData::MX(MX::new(10, name("mail.example.com"))),
    )
  }

  pub(crate) fn txt() -> Record {
    Record::from_rdata(
      name("example.com"),
      -1,
      RecordData::TXT(TXT::new(["v=spf1 -all", "", "\u{e9}t\u{e9}"]).unwrap()),
    )
  }

  pub(crate) fn ptr() -> Record {
    Record::from_rdata(
      name("34.216.184.93.in-addr.arpa"),
      86400,
      RecordData::PTR(name("example.com")),
    )
  }

  pub(crate) fn srv() -> Record {
    Record::from_rdata(
      name("_sip._tcp.example.com"),
      60,
      RecordData::SRV(SRV::new(10, 60, 5060, name("sip.example.com"))),
    )
  }

  pub(crate) fn unknown() -> Record {
    Record::new(
      name("example.com"),
      DNSClass::Unknown(0x00fd),
      0,
      RecordData::Unknown {
        code: 65280,
        data: vec![0xde, 0xad, 0xbe, 0xef],
      },
    )
  }

  pub(crate) fn chaos() -> Record {
    Record::new(
      name("version.bind"),
      DNSClass::CH,
      0,
      RecordData::TXT(TXT::new(["9.18.0"]).unwrap()),
    )
  }

  #[test]
  fn fixture_types_match() {
    assert_eq!(a().ty(), RecordType::A);
    assert_eq!(unknown().ty(), RecordType::Unknown(65280));
    assert_eq!(chaos().class(), DNSClass::CH);
  }
}
