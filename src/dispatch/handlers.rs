//! Default handlers for the RFC 1459 subset TMI speaks.

use std::sync::Arc;

use tracing::debug;

use crate::event::irc::{
    ChannelOperator, Join, Mode, Motd, Names, Notice, Part, Ping, Pong, PrivMsg, ServerError,
    ServerInfo, UnknownCommand, Welcome,
};
use crate::event::Event;
use crate::message::Message;
use crate::response::Response;
use crate::state::Transition;

use super::{Context, DispatchTable};

pub(super) fn install(table: &mut DispatchTable) {
    table.set(Response::RPL_WELCOME.as_command(), welcome);
    for reply in [
        Response::RPL_YOURHOST,
        Response::RPL_CREATED,
        Response::RPL_MYINFO,
    ] {
        table.set(reply.as_command(), |ctx, message| {
            ctx.emit(Event::ServerInfo(ServerInfo::new(Arc::clone(message))));
        });
    }
    for reply in [
        Response::RPL_MOTDSTART,
        Response::RPL_MOTD,
        Response::RPL_ENDOFMOTD,
    ] {
        table.set(reply.as_command(), |ctx, message| {
            ctx.emit(Event::Motd(Motd::new(Arc::clone(message))));
        });
    }
    table.set(Response::RPL_NAMREPLY.as_command(), names_reply);
    table.set(Response::RPL_ENDOFNAMES.as_command(), end_of_names);
    table.set(Response::ERR_UNKNOWNCOMMAND.as_command(), |ctx, message| {
        ctx.emit(Event::UnknownCommand(UnknownCommand::new(Arc::clone(message))));
    });

    table.set("PING", ping);
    table.set("PONG", |ctx, message| {
        ctx.emit(Event::Pong(Pong::new(Arc::clone(message))));
    });
    table.set("JOIN", |ctx, message| {
        ctx.emit(Event::Join(Join::new(Arc::clone(message))));
    });
    table.set("PART", |ctx, message| {
        ctx.emit(Event::Part(Part::new(Arc::clone(message))));
    });
    table.set("PRIVMSG", |ctx, message| {
        ctx.emit(Event::PrivMsg(PrivMsg::new(Arc::clone(message))));
    });
    table.set("NOTICE", |ctx, message| {
        ctx.emit(Event::Notice(Notice::new(Arc::clone(message))));
    });
    table.set("MODE", mode);
    table.set("ERROR", |ctx, message| {
        ctx.emit(Event::ServerError(ServerError::new(Arc::clone(message))));
    });
}

fn welcome(ctx: &mut Context<'_>, message: &Arc<Message>) {
    if ctx.state().apply(Transition::Welcome) {
        debug!(nick = message.param(0), "handshake complete");
        ctx.emit(Event::Connected(Welcome::new(Arc::clone(message))));
    }
}

fn ping(ctx: &mut Context<'_>, message: &Arc<Message>) {
    let ping = Ping::new(Arc::clone(message));
    if ctx.auto_pong() {
        ctx.send(ping.reply());
    }
    ctx.emit(Event::Ping(ping));
}

// `353 <me> <symbol> <channel> :<nicks>`
fn names_reply(ctx: &mut Context<'_>, message: &Arc<Message>) {
    let channel = last_middle(message);
    ctx.names()
        .extend(channel, message.trailing().split_whitespace());
}

// `366 <me> <channel> :End of /NAMES list`
fn end_of_names(ctx: &mut Context<'_>, message: &Arc<Message>) {
    let channel = last_middle(message).to_owned();
    let nicks = ctx.names().finish(&channel);
    ctx.emit(Event::Names(Names {
        message: Arc::clone(message),
        channel,
        nicks,
    }));
}

fn mode(ctx: &mut Context<'_>, message: &Arc<Message>) {
    let mode = Mode::new(Arc::clone(message));
    let operators: Vec<ChannelOperator> = mode
        .operator_changes()
        .into_iter()
        .map(|(granted, nick)| ChannelOperator {
            message: Arc::clone(message),
            channel: mode.channel.clone(),
            nick,
            granted,
        })
        .collect();

    ctx.emit(Event::Mode(mode));
    for operator in operators {
        ctx.emit(Event::ChannelOperator(operator));
    }
}

fn last_middle(message: &Message) -> &str {
    message.middle().last().map_or("", String::as_str)
}
