//! Typed decoding of Twitch message tags.
//!
//! Every decoder is a stateless `(tags, key) -> T` conversion that never
//! fails. A missing, empty or malformed value resolves to the default
//! documented on each function:
//!
//! | decoder | default |
//! |---|---|
//! | [`string`] | `""` |
//! | [`integer`] | `-1` |
//! | [`bits`] | `0` |
//! | [`boolean`] | `false` |
//! | [`kind`] | the enum's unknown/fallback member |
//! | [`color`] | `None` |
//! | [`timestamp`] | [`DateTime::<Utc>::MIN_UTC`] |
//! | [`badges`], [`badge_info`], [`emotes`], [`list`] | empty `Vec` |
//!
//! `bits` defaults to `0` rather than `-1`: a message without the tag
//! cheered nothing, which is different from an unreadable number.

mod badges;
mod color;
mod emotes;
mod kinds;

use chrono::{DateTime, Utc};

use crate::message::tags::unescape_tag_value;
use crate::message::Tags;

pub use self::badges::{Badge, BadgeInfo, BadgeKind};
pub use self::color::Color;
pub use self::emotes::Emote;
pub use self::kinds::{NoticeKind, RitualKind, SubPlan, UserType};

/// Value for `key`, treating an empty value as missing.
fn value<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parse a numeric sub-field, `-1` when it is not a number.
pub(crate) fn number_or_unknown(s: &str) -> i64 {
    s.trim().parse().unwrap_or(-1)
}

/// Unescaped string value. Default `""`.
pub fn string(tags: &Tags, key: &str) -> String {
    value(tags, key)
        .map(|v| unescape_tag_value(v).into_owned())
        .unwrap_or_default()
}

/// Signed integer value. Default `-1`.
pub fn integer(tags: &Tags, key: &str) -> i64 {
    value(tags, key).map_or(-1, number_or_unknown)
}

/// Cheer amount from the `bits` tag. Default `0`.
pub fn bits(tags: &Tags, key: &str) -> i64 {
    value(tags, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// `1` or `true` (any case). Default `false`.
pub fn boolean(tags: &Tags, key: &str) -> bool {
    value(tags, key).map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Enum value through its `From<&str>` impl. Default `T::default()`, which
/// is the enum's unknown member.
pub fn kind<T>(tags: &Tags, key: &str) -> T
where
    T: for<'a> From<&'a str> + Default,
{
    value(tags, key).map(T::from).unwrap_or_default()
}

/// `#RRGGBB` color. Default `None` (the user never picked one).
pub fn color(tags: &Tags, key: &str) -> Option<Color> {
    value(tags, key).and_then(|v| v.parse().ok())
}

/// Unix-millisecond timestamp such as `tmi-sent-ts`.
/// Default [`DateTime::<Utc>::MIN_UTC`].
pub fn timestamp(tags: &Tags, key: &str) -> DateTime<Utc> {
    value(tags, key)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Comma-separated list, e.g. `emote-sets`. Default empty.
pub fn list(tags: &Tags, key: &str) -> Vec<String> {
    value(tags, key)
        .map(|v| {
            v.split(',')
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// `kind/version` pairs from `badges`. Default empty.
pub fn badges(tags: &Tags, key: &str) -> Vec<Badge> {
    value(tags, key).map(Badge::parse_list).unwrap_or_default()
}

/// `kind/tenure` pairs from `badge-info`. Default empty.
pub fn badge_info(tags: &Tags, key: &str) -> Vec<BadgeInfo> {
    value(tags, key).map(BadgeInfo::parse_list).unwrap_or_default()
}

/// `id:start-end,...` groups from `emotes`. Default empty.
pub fn emotes(tags: &Tags, key: &str) -> Vec<Emote> {
    value(tags, key).map(Emote::parse_list).unwrap_or_default()
}

/// Whether the tag is present at all, empty or not.
pub fn has(tags: &Tags, key: &str) -> bool {
    tags.contains_key(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_missing_tags_use_defaults() {
        let empty = Tags::new();
        assert_eq!(string(&empty, "display-name"), "");
        assert_eq!(integer(&empty, "room-id"), -1);
        assert_eq!(bits(&empty, "bits"), 0);
        assert!(!boolean(&empty, "mod"));
        assert_eq!(kind::<UserType>(&empty, "user-type"), UserType::Viewer);
        assert_eq!(color(&empty, "color"), None);
        assert_eq!(timestamp(&empty, "tmi-sent-ts"), DateTime::<Utc>::MIN_UTC);
        assert!(badges(&empty, "badges").is_empty());
        assert!(badge_info(&empty, "badge-info").is_empty());
        assert!(emotes(&empty, "emotes").is_empty());
        assert!(list(&empty, "emote-sets").is_empty());
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let t = tags(&[("room-id", ""), ("bits", ""), ("color", ""), ("badges", "")]);
        assert_eq!(integer(&t, "room-id"), -1);
        assert_eq!(bits(&t, "bits"), 0);
        assert_eq!(color(&t, "color"), None);
        assert!(badges(&t, "badges").is_empty());
        assert!(has(&t, "room-id"));
    }

    #[test]
    fn test_malformed_scalars_use_defaults() {
        let t = tags(&[("slow", "fast"), ("bits", "lots"), ("tmi-sent-ts", "yesterday")]);
        assert_eq!(integer(&t, "slow"), -1);
        assert_eq!(bits(&t, "bits"), 0);
        assert_eq!(timestamp(&t, "tmi-sent-ts"), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_scalar_values() {
        let t = tags(&[
            ("mod", "1"),
            ("subscriber", "0"),
            ("turbo", "True"),
            ("followers-only", "10"),
            ("bits", "100"),
            ("system-msg", "5\\sraiders\\sfrom\\sTestChannel"),
        ]);
        assert!(boolean(&t, "mod"));
        assert!(!boolean(&t, "subscriber"));
        assert!(boolean(&t, "turbo"));
        assert_eq!(integer(&t, "followers-only"), 10);
        assert_eq!(bits(&t, "bits"), 100);
        assert_eq!(string(&t, "system-msg"), "5 raiders from TestChannel");
    }

    #[test]
    fn test_timestamp_millis() {
        let t = tags(&[("tmi-sent-ts", "1642696567751")]);
        let ts = timestamp(&t, "tmi-sent-ts");
        assert_eq!(ts.timestamp_millis(), 1_642_696_567_751);
    }

    #[test]
    fn test_emote_sets_list() {
        let t = tags(&[("emote-sets", "0,33,50,237")]);
        assert_eq!(list(&t, "emote-sets"), ["0", "33", "50", "237"]);
    }

    #[test]
    fn test_kind_unknown_value() {
        let t = tags(&[("msg-id", "somethingnew")]);
        assert_eq!(kind::<NoticeKind>(&t, "msg-id"), NoticeKind::Unknown("somethingnew".into()));
    }
}
