//! Fuzz target for line framing.
//!
//! The first byte picks a chunk size; the rest is fed to the codec in
//! chunks of that size. No framed line may exceed the codec's limit.

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use slirc_tmi::LineCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, data)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(chunk.max(1));

    let mut codec = LineCodec::with_max_len(64);
    let mut buf = BytesMut::new();
    for piece in data.chunks(chunk) {
        buf.extend_from_slice(piece);
        while let Ok(Some(line)) = codec.decode(&mut buf) {
            assert!(line.len() <= 64 * 3);
        }
    }
    while let Ok(Some(line)) = codec.decode_eof(&mut buf) {
        assert!(line.len() <= 64 * 3);
    }
});
