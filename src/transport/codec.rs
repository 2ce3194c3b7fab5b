//! Line framing.
//!
//! Incoming bytes are split on `\n`; a trailing `\r` is dropped and the
//! line is decoded as lossy UTF-8. Bytes after the last newline stay in the
//! buffer until the next read completes the line, so a line split across
//! reads is delivered whole. Outgoing lines get `\r\n` appended.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use super::MAX_INCOMING_LINE_LEN;

/// CRLF line codec.
#[derive(Debug, Clone)]
pub struct LineCodec {
    max_len: usize,
    /// Bytes of the buffer already known to hold no `\n`.
    scanned: usize,
    /// Dropping an oversized line until its terminator shows up.
    discarding: bool,
}

impl LineCodec {
    pub fn new() -> Self {
        Self::with_max_len(MAX_INCOMING_LINE_LEN)
    }

    /// Codec that discards incoming lines longer than `max_len` bytes.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            scanned: 0,
            discarding: false,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn take_line(line: &[u8]) -> String {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        String::from_utf8_lossy(line).into_owned()
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        loop {
            let newline = src[self.scanned..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|offset| self.scanned + offset);

            match (self.discarding, newline) {
                (true, Some(end)) => {
                    src.advance(end + 1);
                    self.scanned = 0;
                    self.discarding = false;
                }
                (true, None) => {
                    src.clear();
                    self.scanned = 0;
                    return Ok(None);
                }
                (false, Some(end)) => {
                    self.scanned = 0;
                    if end > self.max_len {
                        warn!(len = end, max = self.max_len, "discarding oversized line");
                        src.advance(end + 1);
                        continue;
                    }
                    let line = src.split_to(end + 1);
                    return Ok(Some(Self::take_line(&line)));
                }
                (false, None) if src.len() > self.max_len => {
                    warn!(len = src.len(), max = self.max_len, "discarding oversized line");
                    src.clear();
                    self.scanned = 0;
                    self.discarding = true;
                    return Ok(None);
                }
                (false, None) => {
                    self.scanned = src.len();
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.scanned = 0;
        if self.discarding || src.is_empty() {
            self.discarding = false;
            src.clear();
            return Ok(None);
        }
        let rest = src.split();
        Ok(Some(Self::take_line(&rest)))
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = std::io::Error;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = line.as_ref();
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
