//! Reads DNS packets as hex, one per line, from stdin and prints them.
//!
//! ```text
//! echo "1234 0100 0001 0000 0000 0000 07 6578616d706c65 03 636f6d 00 0001 0001" \
//!   | cargo run --example dnsparse
//! ```
//!
//! Pass `--strict` to reject bytes after the last section, and `--tcp` if each
//! line carries a 2-byte length prefix. `DNS_CODEC_LOG` sets the log filter.

use std::io::{self, BufRead};

use dns_codec::{DecodeError, DecodeOptions, Message, decode_message_with, decode_tcp_frame_with};

fn parse(packet: &[u8], opts: DecodeOptions, tcp: bool) -> Result<Message, DecodeError> {
  if tcp {
    let (msg, used) = decode_tcp_frame_with(packet, opts)?;
    if used < packet.len() {
      tracing::debug!(left = packet.len() - used, "ignoring bytes after the frame");
    }
    Ok(msg)
  } else {
    decode_message_with(packet, opts)
  }
}

fn main() -> io::Result<()> {
  let filter = std::env::var("DNS_CODEC_LOG").unwrap_or_else(|_| "info".to_owned());
  tracing_subscriber::fmt::fmt()
    .without_time()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(io::stderr)
    .init();

  let mut strict = false;
  let mut tcp = false;
  for arg in std::env::args().skip(1) {
    match arg.as_str() {
      "--strict" => strict = true,
      "--tcp" => tcp = true,
      other => tracing::warn!(arg = other, "ignoring unknown argument"),
    }
  }
  let opts = DecodeOptions::new().with_strict(strict);

  for (lineno, line) in io::stdin().lock().lines().enumerate() {
    let line = line?;
    let hex: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if hex.is_empty() {
      continue;
    }

    let packet = match hex::decode(&hex) {
      Ok(packet) => packet,
      Err(e) => {
        tracing::warn!(line = lineno + 1, err = %e, "not a hex string");
        continue;
      }
    };

    match parse(&packet, opts, tcp) {
      Ok(msg) => {
        tracing::info!(
          line = lineno + 1,
          len = packet.len(),
          id = msg.id(),
          questions = msg.questions().len(),
          answers = msg.answers().len(),
          authorities = msg.authorities().len(),
          additionals = msg.additionals().len(),
          "decoded"
        );
        tracing::debug!(?msg);
        println!("{msg}\n");
      }
      Err(e) => {
        tracing::warn!(
          line = lineno + 1,
          offset = e.offset(),
          section = e.section().map(|s| s.as_str()),
          index = e.index(),
          err = %e.kind(),
          "failed to decode"
        );
      }
    }
  }

  Ok(())
}
