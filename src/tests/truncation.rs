use crate::{
  EncodeOptions, Record, decode_message, decode_tcp_frame, encode_message_with, encode_tcp_frame,
};

use super::response_with;

fn assert_every_prefix_truncated(wire: &[u8]) {
  for cut in 0..wire.len() {
    match decode_message(&wire[..cut]) {
      Err(err) => assert!(err.is_truncated(), "cut at {cut}: {err}"),
      Ok(msg) => panic!("cut at {cut} decoded: {msg:?}"),
    }
  }
}

fn truncated_everywhere(record: Record) {
  let msg = response_with(record);
  for compress in [false, true] {
    let wire = encode_message_with(&msg, EncodeOptions::new().with_compress(compress)).unwrap();
    assert!(decode_message(&wire).is_ok());
    assert_every_prefix_truncated(&wire);
  }
}

test_suites!(truncated_everywhere {
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
fn partial_tcp_frame() {
  let frame = encode_tcp_frame(&response_with(super::fixtures::srv())).unwrap();
  for cut in 0..frame.len() {
    let err = decode_tcp_frame(&frame[..cut]).unwrap_err();
    assert!(err.is_truncated(), "cut at {cut}: {err}");
  }
  assert_eq!(decode_tcp_frame(&frame).unwrap().1, frame.len());
}
