//! Benchmarks for line parsing, tag decoding and dispatch.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slirc_tmi::dispatch::{Context, NamesAccumulator};
use slirc_tmi::event::{ChatMessage, UserNotice};
use slirc_tmi::{twitch, Message, StateMachine};

/// Keepalive
const PING: &str = "PING :tmi.twitch.tv";

/// Chat line without tags
const PLAIN_PRIVMSG: &str = ":ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #dallas :Kappa Keepo Kappa";

/// Chat line as sent with `twitch.tv/tags`
const TAGGED_PRIVMSG: &str = "@badge-info=subscriber/8;badges=subscriber/6,bits/1000;color=#0D4200;display-name=Ronni;emotes=25:0-4,12-16/1902:6-10;first-msg=0;id=b34ccfc7-4977-403a-8a94-33c6bac34fb8;mod=0;returning-chatter=0;room-id=1337;subscriber=1;tmi-sent-ts=1507246572675;turbo=0;user-id=1337;user-type= :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #dallas :Kappa Keepo Kappa";

/// Resub notice with escaped system message
const RESUB: &str = "@badge-info=subscriber/6;badges=subscriber/6;color=#008000;display-name=Ronni;emotes=;id=db25007f-7a18-43eb-9379-80131e44d633;login=ronni;mod=0;msg-id=resub;msg-param-cumulative-months=6;msg-param-streak-months=2;msg-param-should-share-streak=1;msg-param-sub-plan=Prime;msg-param-sub-plan-name=Prime;room-id=12345678;subscriber=1;system-msg=ronni\\shas\\ssubscribed\\sfor\\s6\\smonths!;tmi-sent-ts=1507246572675;turbo=1;user-id=87654321;user-type=staff :tmi.twitch.tv USERNOTICE #dallas :Great stream -- keep it up!";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Parsing");

    for (name, line) in [
        ("ping", PING),
        ("plain_privmsg", PLAIN_PRIVMSG),
        ("tagged_privmsg", TAGGED_PRIVMSG),
        ("resub", RESUB),
    ] {
        group.bench_with_input(BenchmarkId::new("parse", name), line, |b, line| {
            b.iter(|| black_box(Message::parse(black_box(line))))
        });
    }

    group.finish();
}

fn benchmark_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tag Decoding");

    let chat = Arc::new(Message::parse(TAGGED_PRIVMSG));
    group.bench_function("chat_message", |b| {
        b.iter(|| black_box(ChatMessage::new(Arc::clone(black_box(&chat)))))
    });

    let resub = Arc::new(Message::parse(RESUB));
    group.bench_function("user_notice", |b| {
        b.iter(|| black_box(UserNotice::new(Arc::clone(black_box(&resub)))))
    });

    group.finish();
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatch");

    let table = twitch::table();
    let state = StateMachine::new();
    for (name, line) in [("privmsg", TAGGED_PRIVMSG), ("resub", RESUB)] {
        let message = Arc::new(Message::parse(line));
        group.bench_with_input(BenchmarkId::new("twitch_table", name), &message, |b, message| {
            b.iter(|| {
                let mut names = NamesAccumulator::default();
                let mut ctx = Context::new(&state, &mut names, true);
                table.dispatch(&mut ctx, black_box(message));
                black_box(ctx.finish())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parsing, benchmark_decoding, benchmark_dispatch);

criterion_main!(benches);
