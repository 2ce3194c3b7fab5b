//! Enumerated tag values.
//!
//! Each enum converts from its wire string with `From<&str>`, falling back
//! to its unknown member, which is also its `Default`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `user-type` tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UserType {
    /// Regular viewer. Also the fallback for a missing, empty or
    /// unrecognised value.
    #[default]
    Viewer,
    Moderator,
    GlobalModerator,
    Admin,
    Staff,
}

impl From<&str> for UserType {
    fn from(s: &str) -> Self {
        match s {
            "mod" => Self::Moderator,
            "global_mod" => Self::GlobalModerator,
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            _ => Self::Viewer,
        }
    }
}

/// `msg-id` of a USERNOTICE.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoticeKind {
    Sub,
    Resub,
    SubGift,
    SubMysteryGift,
    GiftPaidUpgrade,
    AnonGiftPaidUpgrade,
    PrimePaidUpgrade,
    RewardGift,
    Raid,
    Unraid,
    Ritual,
    BitsBadgeTier,
    Announcement,
    ViewerMilestone,
    /// Any other `msg-id`, by value. Empty when the tag was missing.
    Unknown(String),
}

impl Default for NoticeKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for NoticeKind {
    fn from(s: &str) -> Self {
        match s {
            "sub" => Self::Sub,
            "resub" => Self::Resub,
            "subgift" => Self::SubGift,
            "submysterygift" => Self::SubMysteryGift,
            "giftpaidupgrade" => Self::GiftPaidUpgrade,
            "anongiftpaidupgrade" => Self::AnonGiftPaidUpgrade,
            "primepaidupgrade" => Self::PrimePaidUpgrade,
            "rewardgift" => Self::RewardGift,
            "raid" => Self::Raid,
            "unraid" => Self::Unraid,
            "ritual" => Self::Ritual,
            "bitsbadgetier" => Self::BitsBadgeTier,
            "announcement" => Self::Announcement,
            "viewermilestone" => Self::ViewerMilestone,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

/// `msg-param-sub-plan`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubPlan {
    Prime,
    Tier1,
    Tier2,
    Tier3,
    #[default]
    Unknown,
}

impl From<&str> for SubPlan {
    fn from(s: &str) -> Self {
        match s {
            "Prime" | "prime" => Self::Prime,
            "1000" => Self::Tier1,
            "2000" => Self::Tier2,
            "3000" => Self::Tier3,
            _ => Self::Unknown,
        }
    }
}

/// `msg-param-ritual-name`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RitualKind {
    NewChatter,
    #[default]
    Unknown,
}

impl From<&str> for RitualKind {
    fn from(s: &str) -> Self {
        match s {
            "new_chatter" => Self::NewChatter,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type() {
        assert_eq!(UserType::from("mod"), UserType::Moderator);
        assert_eq!(UserType::from(""), UserType::Viewer);
        assert_eq!(UserType::from("something"), UserType::Viewer);
    }

    #[test]
    fn test_sub_plan() {
        assert_eq!(SubPlan::from("Prime"), SubPlan::Prime);
        assert_eq!(SubPlan::from("2000"), SubPlan::Tier2);
        assert_eq!(SubPlan::from("9000"), SubPlan::Unknown);
    }

    #[test]
    fn test_notice_kind() {
        assert_eq!(NoticeKind::from("resub"), NoticeKind::Resub);
        assert_eq!(NoticeKind::from("bitsbadgetier"), NoticeKind::BitsBadgeTier);
        assert_eq!(NoticeKind::default(), NoticeKind::Unknown(String::new()));
    }

    #[test]
    fn test_ritual_kind() {
        assert_eq!(RitualKind::from("new_chatter"), RitualKind::NewChatter);
        assert_eq!(RitualKind::from("party"), RitualKind::Unknown);
    }
}
