use crate::{
  EncodeOptions, Message, Name, Record, RecordData, SRV, TXT, decode_message, encode_message,
  encode_message_with,
};

use super::{name, response_with};

fn compressed(msg: &Message) -> Vec<u8> {
  encode_message_with(msg, EncodeOptions::new().with_compress(true)).unwrap()
}

fn compression_transparent(record: Record) {
  let msg = response_with(record);
  let plain = encode_message(&msg).unwrap();
  let packed = compressed(&msg);
  tracing::debug!(plain = plain.len(), packed = packed.len(), "compressed");

  // the owner name repeats in every section
  assert!(packed.len() < plain.len());
  assert_eq!(decode_message(&packed).unwrap(), decode_message(&plain).unwrap());
  assert_eq!(decode_message(&packed).unwrap(), msg);
}

test_suites!(compression_transparent {
  a,
  aaaa,
  ns,
  cname,
  soa,
  mx,
  txt,
  ptr,
  srv,
  unknown,
  chaos,
});

#[test]
fn rdata_names_point_at_owner() {
  let msg = response_with(super::fixtures::cname());
  let packed = compressed(&msg);
  // header, question "www.example.com" + type/class, then the answer owner
  // as a pointer to the question name
  assert_eq!(&packed[33..35], &[0xc0, 0x0c]);
  // CNAME RDATA "example.com" points into the question name: RDLENGTH 2
  assert_eq!(&packed[43..47], &[0x00, 0x02, 0xc0, 0x10]);
}

#[test]
fn srv_target_is_spelled_out() {
  let target = name("sip.example.com");
  let msg = Message::builder()
    .with_answer(Record::from_rdata(
      target.clone(),
      60,
      RecordData::A("192.0.2.1".parse().unwrap()),
    ))
    .with_answer(Record::from_rdata(
      name("_sip._tcp.example.com"),
      60,
      RecordData::SRV(SRV::new(0, 0, 5060, target.clone())),
    ))
    .build();

  let packed = compressed(&msg);
  let tail = &packed[packed.len() - target.encoded_len()..];
  assert_eq!(tail, b"\x03sip\x07example\x03com\x00");
  assert_eq!(decode_message(&packed).unwrap(), msg);
}

#[test]
fn pointers_stay_below_offset_limit() {
  // pad the message past 0x3FFF so later names cannot be pointer targets
  let filler = TXT::new(std::iter::repeat_n(vec![b'.'; 255], 70)).unwrap();
  let late: Name = name("late.example.org");
  let msg = Message::builder()
    .with_answer(Record::from_rdata(Name::root(), 0, RecordData::TXT(filler)))
    .with_answer(Record::from_rdata(late.clone(), 0, RecordData::PTR(late.clone())))
    .with_answer(Record::from_rdata(late.clone(), 0, RecordData::PTR(late)))
    .build();

  let plain = encode_message(&msg).unwrap();
  assert!(plain.len() > 0x4000);
  let packed = compressed(&msg);
  assert_eq!(packed, plain);
  assert_eq!(decode_message(&packed).unwrap(), msg);
}
