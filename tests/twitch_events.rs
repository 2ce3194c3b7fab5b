//! Twitch layer end to end: construction, capability requests and typed
//! vendor events over a loopback connection.
//!
//! Run with: `cargo test --test twitch_events`

#![cfg(feature = "tokio")]

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use slirc_tmi::event::Event;
use slirc_tmi::tags::{NoticeKind, SubPlan};
use slirc_tmi::twitch::FixedIdentity;
use slirc_tmi::{
    Capability, ChannelShape, ClientConfig, ClientError, ConfigError, Identity, IdentityResolver,
    TmiClient, ValidationError,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;

const WAIT: Duration = Duration::from_secs(5);

/// Rejects every token, like Helix answering 401.
struct Unauthorized;

#[async_trait]
impl IdentityResolver for Unauthorized {
    async fn resolve(&self, _bearer: &str) -> anyhow::Result<Identity> {
        Err(anyhow!("401 Unauthorized"))
    }
}

/// Records the bearer it was handed.
struct Recording(parking_lot::Mutex<Option<String>>);

#[async_trait]
impl IdentityResolver for Recording {
    async fn resolve(&self, bearer: &str) -> anyhow::Result<Identity> {
        *self.0.lock() = Some(bearer.to_owned());
        Ok(Identity::new(1, "ronni"))
    }
}

fn anonymous() -> FixedIdentity {
    FixedIdentity(Identity::new(0, "justinfan123"))
}

async fn next_event(events: &mut UnboundedReceiver<Event>) -> Event {
    tokio::time::timeout(WAIT, events.recv())
        .await
        .expect("timed out")
        .expect("event channel closed")
}

async fn read_line(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> String {
    tokio::time::timeout(WAIT, lines.next_line())
        .await
        .expect("timed out")
        .unwrap()
        .expect("connection closed")
}

#[tokio::test]
async fn test_resolver_receives_bare_bearer() {
    let config = ClientConfig::twitch("ronni", "oauth:abc123").unwrap();
    let resolver = Recording(parking_lot::Mutex::new(None));
    let (client, _events) = TmiClient::new(config, &resolver).await.unwrap();

    assert_eq!(resolver.0.lock().as_deref(), Some("abc123"));
    assert_eq!(client.identity(), &Identity::new(1, "ronni"));
}

#[tokio::test]
async fn test_resolver_failure() {
    let config = ClientConfig::twitch("ronni", "oauth:abc123").unwrap();
    let err = TmiClient::new(config, &Unauthorized).await.unwrap_err();
    assert!(matches!(err, ClientError::Identity(_)));
    assert_eq!(err.to_string(), "could not resolve identity: 401 Unauthorized");
}

#[tokio::test]
async fn test_invalid_nick() {
    let config = ClientConfig::twitch("not a login", "oauth:abc123").unwrap();
    let err = TmiClient::new(config, &anonymous()).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Config(ConfigError::InvalidNick {
            cause: ValidationError::InvalidChar { ch: ' ', .. },
            ..
        })
    ));
}

#[tokio::test]
async fn test_dyn_resolver() {
    let config = ClientConfig::twitch("justinfan123", "anonymous").unwrap();
    let resolver: Box<dyn IdentityResolver> = Box::new(anonymous());
    let (client, _events) = TmiClient::new(config, resolver.as_ref()).await.unwrap();
    assert_eq!(client.identity().login, "justinfan123");
}

#[tokio::test]
async fn test_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = ClientConfig::new("127.0.0.1", port, "justinfan123", "secret").unwrap();
    let (client, mut events) = TmiClient::new(config, &anonymous()).await.unwrap();

    client.request_tags().unwrap();
    client.request_commands().unwrap();
    assert!(client.connect().await.unwrap());

    let (stream, _) = listener.accept().await.unwrap();
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    let mut received = Vec::new();
    for _ in 0..4 {
        received.push(read_line(&mut lines).await);
    }
    assert_eq!(
        received,
        [
            "PASS oauth:secret",
            "NICK justinfan123",
            "CAP REQ :twitch.tv/tags",
            "CAP REQ :twitch.tv/commands",
        ]
    );

    let script = concat!(
        ":tmi.twitch.tv CAP * ACK :twitch.tv/tags twitch.tv/commands\r\n",
        ":tmi.twitch.tv 001 justinfan123 :Welcome, GLHF!\r\n",
        "@msg-id=raid;msg-param-displayName=Raider;msg-param-login=raider;msg-param-viewerCount=15;room-id=44322889;system-msg=15\\sraiders\\sfrom\\sRaider\\shave\\sjoined! :tmi.twitch.tv USERNOTICE #chatrooms:44322889:04e762ec-ce8f-4cbc-b6a3-ffc871ab53da\r\n",
        "@msg-id=resub;msg-param-cumulative-months=6;msg-param-sub-plan=Prime;login=ronni :tmi.twitch.tv USERNOTICE #dallas :Great stream\r\n",
        "@ban-duration=350;room-id=1337;target-user-id=1337 :tmi.twitch.tv CLEARCHAT #dallas :ronni\r\n",
    );
    write.write_all(script.as_bytes()).await.unwrap();
    write.flush().await.unwrap();

    match next_event(&mut events).await {
        Event::Capability(reply) => {
            assert!(reply.acknowledged(&Capability::Tags));
            assert!(reply.acknowledged(&Capability::Commands));
            assert!(!reply.acknowledged(&Capability::Membership));
        }
        other => panic!("expected Capability, got {other:?}"),
    }
    assert!(matches!(next_event(&mut events).await, Event::Connected(_)));

    match next_event(&mut events).await {
        Event::UserNotice(notice) => {
            assert_eq!(notice.kind, NoticeKind::Raid);
            assert_eq!(notice.system_message, "15 raiders from Raider have joined!");
            assert!(notice.channel.is_chat_room());
            assert!(matches!(
                notice.channel.shape(),
                ChannelShape::ChatRoom { owner_id: 44322889, .. }
            ));
        }
        other => panic!("expected UserNotice, got {other:?}"),
    }
    match next_event(&mut events).await {
        Event::Raid(raid) => {
            assert_eq!(raid.login, "raider");
            assert_eq!(raid.display_name, "Raider");
            assert_eq!(raid.viewer_count, 15);
        }
        other => panic!("expected Raid, got {other:?}"),
    }

    assert!(matches!(next_event(&mut events).await, Event::UserNotice(_)));
    match next_event(&mut events).await {
        Event::Subscription(sub) => {
            assert!(sub.resub);
            assert_eq!(sub.plan, SubPlan::Prime);
            assert_eq!(sub.cumulative_months, 6);
            assert_eq!(sub.text, "Great stream");
        }
        other => panic!("expected Subscription, got {other:?}"),
    }

    match next_event(&mut events).await {
        Event::ClearChat(clear) => {
            assert!(clear.is_timeout());
            assert_eq!(clear.ban_duration, 350);
            assert_eq!(clear.target.as_deref(), Some("ronni"));
        }
        other => panic!("expected ClearChat, got {other:?}"),
    }

    client.join("#dallas").unwrap();
    client.reply("#dallas", "b34ccfc7", "welcome back").unwrap();
    assert_eq!(read_line(&mut lines).await, "JOIN #dallas");
    assert_eq!(
        read_line(&mut lines).await,
        "@reply-parent-msg-id=b34ccfc7 PRIVMSG #dallas :welcome back"
    );
}
