//! `badges` and `badge-info` decoding.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::number_or_unknown;

/// Known chat badges. Anything else is kept by name in [`BadgeKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BadgeKind {
    Admin,
    Bits,
    BitsLeader,
    Broadcaster,
    Founder,
    GlobalMod,
    Moderator,
    Partner,
    Premium,
    Staff,
    SubGifter,
    Subscriber,
    Turbo,
    Vip,
    /// An unrecognised badge, by name. Empty when the name was missing.
    Other(String),
}

impl Default for BadgeKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl AsRef<str> for BadgeKind {
    fn as_ref(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Bits => "bits",
            Self::BitsLeader => "bits-leader",
            Self::Broadcaster => "broadcaster",
            Self::Founder => "founder",
            Self::GlobalMod => "global_mod",
            Self::Moderator => "moderator",
            Self::Partner => "partner",
            Self::Premium => "premium",
            Self::Staff => "staff",
            Self::SubGifter => "sub-gifter",
            Self::Subscriber => "subscriber",
            Self::Turbo => "turbo",
            Self::Vip => "vip",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for BadgeKind {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "bits" => Self::Bits,
            "bits-leader" => Self::BitsLeader,
            "broadcaster" => Self::Broadcaster,
            "founder" => Self::Founder,
            "global_mod" => Self::GlobalMod,
            "moderator" => Self::Moderator,
            "partner" => Self::Partner,
            "premium" => Self::Premium,
            "staff" => Self::Staff,
            "sub-gifter" => Self::SubGifter,
            "subscriber" => Self::Subscriber,
            "turbo" => Self::Turbo,
            "vip" => Self::Vip,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A badge from the `badges` tag, e.g. `subscriber/12`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Badge {
    pub kind: BadgeKind,
    /// Numeric version, `-1` if it was not a number (e.g. `predictions/blue-1`).
    pub version: i64,
}

/// Extra badge metadata from `badge-info`, e.g. `subscriber/14` months.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BadgeInfo {
    pub kind: BadgeKind,
    /// Tenure in months, `-1` if it was not a number.
    pub tenure: i64,
}

fn split_pairs(list: &str) -> impl Iterator<Item = (BadgeKind, i64)> + '_ {
    list.split(',').filter(|item| !item.is_empty()).map(|item| {
        let (name, number) = item.split_once('/').unwrap_or((item, ""));
        (BadgeKind::from(name), number_or_unknown(number))
    })
}

impl Badge {
    /// Parse a comma-separated `kind/version` list.
    pub fn parse_list(list: &str) -> Vec<Self> {
        split_pairs(list)
            .map(|(kind, version)| Self { kind, version })
            .collect()
    }
}

impl BadgeInfo {
    /// Parse a comma-separated `kind/tenure` list.
    pub fn parse_list(list: &str) -> Vec<Self> {
        split_pairs(list)
            .map(|(kind, tenure)| Self { kind, tenure })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges_decode() {
        let badges = Badge::parse_list("subscriber/12,bits/100");
        assert_eq!(
            badges,
            vec![
                Badge { kind: BadgeKind::Subscriber, version: 12 },
                Badge { kind: BadgeKind::Bits, version: 100 },
            ]
        );
    }

    #[test]
    fn test_bad_version_only_affects_its_entry() {
        let badges = Badge::parse_list("subscriber/x,moderator/1");
        assert_eq!(badges[0], Badge { kind: BadgeKind::Subscriber, version: -1 });
        assert_eq!(badges[1], Badge { kind: BadgeKind::Moderator, version: 1 });
    }

    #[test]
    fn test_unknown_badge_kept_by_name() {
        let badges = Badge::parse_list("glhf-pledge/1");
        assert_eq!(badges[0].kind, BadgeKind::Other("glhf-pledge".into()));
        assert_eq!(badges[0].kind.to_string(), "glhf-pledge");
    }

    #[test]
    fn test_badge_without_slash() {
        let badges = Badge::parse_list("premium");
        assert_eq!(badges, vec![Badge { kind: BadgeKind::Premium, version: -1 }]);
    }

    #[test]
    fn test_badge_info_tenure() {
        let info = BadgeInfo::parse_list("subscriber/14");
        assert_eq!(info, vec![BadgeInfo { kind: BadgeKind::Subscriber, tenure: 14 }]);
    }

    #[test]
    fn test_trailing_comma_ignored() {
        assert_eq!(Badge::parse_list("vip/1,").len(), 1);
    }
}
