//! `USERNOTICE` and the narrower events it fans out into.
//!
//! Every USERNOTICE produces a [`UserNotice`]. Depending on its `msg-id`
//! it also produces one of [`Subscription`], [`Raid`], [`Ritual`] or
//! [`BitsBadgeTier`], built from the same line.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::message::Message;
use crate::tags::{self, NoticeKind, RitualKind, SubPlan};
use crate::twitch::Channel;

use super::twitch::UserInfo;

/// A system notification in a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserNotice {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub kind: NoticeKind,
    /// User the notice is about.
    pub sender: UserInfo,
    /// Server-written description, unescaped.
    pub system_message: String,
    /// Text the user attached, often empty.
    pub text: String,
    pub id: String,
    pub room_id: i64,
    pub sent_at: DateTime<Utc>,
}

impl UserNotice {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            kind: tags::kind(t, "msg-id"),
            sender: UserInfo::new(&message),
            system_message: tags::string(t, "system-msg"),
            text: message.trailing().to_owned(),
            id: tags::string(t, "id"),
            room_id: tags::integer(t, "room-id"),
            sent_at: tags::timestamp(t, "tmi-sent-ts"),
            message,
        }
    }
}

/// A new subscription or a resubscription (`msg-id` `sub` or `resub`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub login: String,
    pub display_name: String,
    pub resub: bool,
    pub plan: SubPlan,
    pub plan_name: String,
    /// Total months subscribed; `-1` when not sent.
    pub cumulative_months: i64,
    /// Consecutive months; only meaningful when `share_streak` is set.
    pub streak_months: i64,
    pub share_streak: bool,
    pub text: String,
}

impl Subscription {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        let sender = UserInfo::new(&message);
        Self {
            channel: Channel::parse(message.middle_param(0)),
            login: sender.login,
            display_name: sender.display_name,
            resub: tags::kind::<NoticeKind>(t, "msg-id") == NoticeKind::Resub,
            plan: tags::kind(t, "msg-param-sub-plan"),
            plan_name: tags::string(t, "msg-param-sub-plan-name"),
            cumulative_months: tags::integer(t, "msg-param-cumulative-months"),
            streak_months: tags::integer(t, "msg-param-streak-months"),
            share_streak: tags::boolean(t, "msg-param-should-share-streak"),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// Another broadcaster raided the channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raid {
    pub message: Arc<Message>,
    pub channel: Channel,
    /// Raiding broadcaster's login.
    pub login: String,
    pub display_name: String,
    pub viewer_count: i64,
    pub profile_image_url: String,
}

impl Raid {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            login: tags::string(t, "msg-param-login"),
            display_name: tags::string(t, "msg-param-displayName"),
            viewer_count: tags::integer(t, "msg-param-viewerCount"),
            profile_image_url: tags::string(t, "msg-param-profileImageURL"),
            message,
        }
    }
}

/// A ritual, e.g. a first-time chatter greeting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ritual {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub ritual: RitualKind,
    pub login: String,
    pub text: String,
}

impl Ritual {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            ritual: tags::kind(t, "msg-param-ritual-name"),
            login: UserInfo::new(&message).login,
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// A user unlocked a new bits badge tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitsBadgeTier {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub login: String,
    /// Bits needed for the tier; `-1` when not sent.
    pub threshold: i64,
    pub text: String,
}

impl BitsBadgeTier {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            login: UserInfo::new(&message).login,
            threshold: tags::integer(t, "msg-param-threshold"),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(line: &str) -> Arc<Message> {
        Arc::new(Message::parse(line))
    }

    const RESUB: &str = "@badge-info=subscriber/16;badges=subscriber/12;color=#0000FF;\
        display-name=Ronni;id=db25007f;login=ronni;mod=0;msg-id=resub;\
        msg-param-cumulative-months=16;msg-param-should-share-streak=1;\
        msg-param-streak-months=2;msg-param-sub-plan=Prime;\
        msg-param-sub-plan-name=Prime;room-id=12345;subscriber=1;\
        system-msg=ronni\\shas\\ssubscribed\\sfor\\s16\\smonths!;tmi-sent-ts=1507246572675;\
        user-id=1337;user-type= :tmi.twitch.tv USERNOTICE #dallas :Great stream -- keep it up!";

    #[test]
    fn test_user_notice() {
        let notice = UserNotice::new(msg(RESUB));
        assert_eq!(notice.kind, NoticeKind::Resub);
        assert_eq!(notice.sender.login, "ronni");
        assert_eq!(notice.sender.user_type, crate::tags::UserType::Viewer);
        assert_eq!(notice.system_message, "ronni has subscribed for 16 months!");
        assert_eq!(notice.text, "Great stream -- keep it up!");
        assert_eq!(notice.channel.login(), Some("dallas"));
    }

    #[test]
    fn test_subscription() {
        let sub = Subscription::new(msg(RESUB));
        assert!(sub.resub);
        assert_eq!(sub.plan, SubPlan::Prime);
        assert_eq!(sub.cumulative_months, 16);
        assert_eq!(sub.streak_months, 2);
        assert!(sub.share_streak);
        assert_eq!(sub.display_name, "Ronni");
    }

    #[test]
    fn test_raid() {
        let raid = Raid::new(msg(
            "@login=testchannel;msg-id=raid;msg-param-displayName=TestChannel;\
             msg-param-login=testchannel;msg-param-viewerCount=15 :tmi.twitch.tv USERNOTICE #othertestchannel",
        ));
        assert_eq!(raid.channel.login(), Some("othertestchannel"));
        assert_eq!(raid.login, "testchannel");
        assert_eq!(raid.display_name, "TestChannel");
        assert_eq!(raid.viewer_count, 15);
    }

    #[test]
    fn test_ritual_and_bits_tier() {
        let ritual = Ritual::new(msg(
            "@login=ronni;msg-id=ritual;msg-param-ritual-name=new_chatter :tmi.twitch.tv USERNOTICE #seventoes :HeyGuys",
        ));
        assert_eq!(ritual.ritual, RitualKind::NewChatter);
        assert_eq!(ritual.login, "ronni");
        assert_eq!(ritual.text, "HeyGuys");

        let tier = BitsBadgeTier::new(msg(
            "@login=ronni;msg-id=bitsbadgetier;msg-param-threshold=10000 :tmi.twitch.tv USERNOTICE #dallas",
        ));
        assert_eq!(tier.threshold, 10000);
        assert_eq!(tier.text, "");
    }
}
