//! Twitch handlers, layered over the defaults.
//!
//! `PRIVMSG`, `NOTICE`, `JOIN` and `PART` are replaced by versions that
//! decode tags and classify the channel. The vendor commands are added.

use std::sync::Arc;

use crate::dispatch::{Context, DispatchTable};
use crate::event::notice::{BitsBadgeTier, Raid, Ritual, Subscription, UserNotice};
use crate::event::twitch::{
    CapabilityReply, ChannelJoin, ChannelNotice, ChannelPart, ChatMessage, ClearChat, ClearMsg,
    GlobalUserState, HostTarget, Reconnect, RoomState, UserState, Whisper,
};
use crate::event::Event;
use crate::message::Message;
use crate::tags::NoticeKind;

/// Add the Twitch handlers to `table`, replacing same-named defaults.
pub fn install(table: &mut DispatchTable) {
    table.set("PRIVMSG", |ctx, message| {
        ctx.emit(Event::ChatMessage(ChatMessage::new(Arc::clone(message))));
    });
    table.set("NOTICE", |ctx, message| {
        ctx.emit(Event::ChannelNotice(ChannelNotice::new(Arc::clone(message))));
    });
    table.set("JOIN", |ctx, message| {
        ctx.emit(Event::ChannelJoin(ChannelJoin::new(Arc::clone(message))));
    });
    table.set("PART", |ctx, message| {
        ctx.emit(Event::ChannelPart(ChannelPart::new(Arc::clone(message))));
    });

    table.set("CAP", |ctx, message| {
        ctx.emit(Event::Capability(CapabilityReply::new(Arc::clone(message))));
    });
    table.set("CLEARCHAT", |ctx, message| {
        ctx.emit(Event::ClearChat(ClearChat::new(Arc::clone(message))));
    });
    table.set("CLEARMSG", |ctx, message| {
        ctx.emit(Event::ClearMsg(ClearMsg::new(Arc::clone(message))));
    });
    table.set("GLOBALUSERSTATE", |ctx, message| {
        ctx.emit(Event::GlobalUserState(GlobalUserState::new(Arc::clone(message))));
    });
    table.set("HOSTTARGET", |ctx, message| {
        ctx.emit(Event::HostTarget(HostTarget::new(Arc::clone(message))));
    });
    table.set("RECONNECT", |ctx, message| {
        ctx.emit(Event::Reconnect(Reconnect::new(Arc::clone(message))));
    });
    table.set("ROOMSTATE", |ctx, message| {
        ctx.emit(Event::RoomState(RoomState::new(Arc::clone(message))));
    });
    table.set("USERNOTICE", user_notice);
    table.set("USERSTATE", |ctx, message| {
        ctx.emit(Event::UserState(UserState::new(Arc::clone(message))));
    });
    table.set("WHISPER", |ctx, message| {
        ctx.emit(Event::Whisper(Whisper::new(Arc::clone(message))));
    });
}

/// Default handlers plus the Twitch layer.
pub fn table() -> DispatchTable {
    let mut table = DispatchTable::new();
    install(&mut table);
    table
}

/// `UserNotice`, then at most one narrower event picked by `msg-id`.
fn user_notice(ctx: &mut Context<'_>, message: &Arc<Message>) {
    let notice = UserNotice::new(Arc::clone(message));
    let message = Arc::clone(message);
    let narrower = match notice.kind {
        NoticeKind::Sub | NoticeKind::Resub => Some(Event::Subscription(Subscription::new(message))),
        NoticeKind::Raid => Some(Event::Raid(Raid::new(message))),
        NoticeKind::Ritual => Some(Event::Ritual(Ritual::new(message))),
        NoticeKind::BitsBadgeTier => Some(Event::BitsBadgeTier(BitsBadgeTier::new(message))),
        _ => None,
    };

    ctx.emit(Event::UserNotice(notice));
    if let Some(event) = narrower {
        ctx.emit(event);
    }
}
