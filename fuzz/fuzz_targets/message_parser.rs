//! Fuzz target for line parsing and Twitch dispatch.
//!
//! Parsing is total, so every input is parsed and run through the full
//! Twitch dispatch table. Nothing may panic.

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use slirc_tmi::dispatch::{Context, NamesAccumulator};
use slirc_tmi::{twitch, Message, StateMachine};

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }

    let message = Arc::new(Message::from_bytes(data));
    assert_eq!(message.params().len(), message.middle().len() + 1);

    let table = twitch::table();
    let state = StateMachine::new();
    let mut names = NamesAccumulator::default();
    let mut ctx = Context::new(&state, &mut names, true);
    table.dispatch(&mut ctx, &message);
    let _ = ctx.finish();
});
