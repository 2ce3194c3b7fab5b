//! Property-based tests for line parsing, tag decoding and the line codec.
//!
//! Uses proptest to verify that:
//! 1. Parsing and tag decoding never panic, whatever the input
//! 2. Components assembled into a line come back out of the parser intact
//! 3. Framing is independent of how the byte stream is split
//!
//! Run with: `cargo test --test proptest_parser`

#![cfg(feature = "tokio")]

use bytes::BytesMut;
use proptest::prelude::*;
use slirc_tmi::event::ChatMessage;
use slirc_tmi::message::tags::{escape_tag_value, unescape_tag_value};
use slirc_tmi::{tags, Channel, LineCodec, Message};
use std::sync::Arc;
use tokio_util::codec::Decoder;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Twitch login: lowercase letter, then letters, digits and underscores.
fn login_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,24}").expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    login_strategy().prop_map(|login| format!("#{}", login))
}

/// Chat text: no CR, LF or NUL, never starting with a colon or space.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0: ][^\r\n\0]{0,300}").expect("valid regex")
}

fn tag_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9\\-]{0,20}").expect("valid regex")
}

/// Unescaped tag value, including characters that need escaping.
fn tag_value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ;\\\\._\\-]{0,60}").expect("valid regex")
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parse_never_panics(line in "\\PC{0,600}") {
        let msg = Message::parse(&line);
        prop_assert_eq!(msg.params().len(), msg.middle().len() + 1);
    }

    #[test]
    fn parse_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..600)) {
        let msg = Message::from_bytes(&bytes);
        let _ = msg.command();
    }

    #[test]
    fn decoders_never_panic(line in "@[a-z\\-=;/,:#0-9A-F\\\\]{0,200} PRIVMSG #c :[a-zA-Z ]{0,40}") {
        let msg = Message::parse(&line);
        let t = msg.tags();
        for key in t.keys() {
            let _ = tags::string(t, key);
            let _ = tags::integer(t, key);
            let _ = tags::bits(t, key);
            let _ = tags::boolean(t, key);
            let _ = tags::color(t, key);
            let _ = tags::timestamp(t, key);
            let _ = tags::list(t, key);
            let _ = tags::badges(t, key);
            let _ = tags::emotes(t, key);
        }
        let chat = ChatMessage::new(Arc::new(msg));
        for emote in &chat.emotes {
            let _ = emote.names(&chat.text);
        }
    }

    #[test]
    fn privmsg_components_survive(
        nick in login_strategy(),
        channel in channel_strategy(),
        text in text_strategy(),
    ) {
        let line = format!(":{nick}!{nick}@{nick}.tmi.twitch.tv PRIVMSG {channel} :{text}");
        let msg = Message::parse(&line);
        prop_assert_eq!(msg.command(), "PRIVMSG");
        prop_assert_eq!(msg.nick(), nick.as_str());
        prop_assert_eq!(msg.middle_param(0), channel.as_str());
        prop_assert_eq!(msg.trailing(), text.as_str());
        let parsed = Channel::parse(&channel);
        prop_assert_eq!(parsed.login(), Some(&channel[1..]));
    }

    #[test]
    fn escaped_tag_values_survive(key in tag_key_strategy(), value in tag_value_strategy()) {
        let escaped = escape_tag_value(&value);
        let line = format!("@{}={} PRIVMSG #c :x", key, escaped);
        let msg = Message::parse(&line);
        prop_assert_eq!(tags::string(msg.tags(), &key), value.as_str());
        let unescaped = unescape_tag_value(&escaped);
        prop_assert_eq!(&*unescaped, value.as_str());
    }

    #[test]
    fn framing_ignores_chunk_boundaries(
        lines in prop::collection::vec(text_strategy(), 1..8),
        chunk in 1usize..64,
    ) {
        let wire: String = lines.iter().map(|l| format!("{}\r\n", l)).collect();
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        let mut framed = Vec::new();

        for piece in wire.as_bytes().chunks(chunk) {
            buf.extend_from_slice(piece);
            while let Some(line) = codec.decode(&mut buf).unwrap() {
                framed.push(line);
            }
        }
        prop_assert_eq!(framed, lines);
    }
}
