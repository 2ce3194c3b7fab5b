//! `emotes` decoding: `25:0-4,12-16/1902:6-10`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::number_or_unknown;

/// One emote and every place it occurs in the message text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Emote {
    pub id: String,
    /// Inclusive `(start, end)` character offsets. A bound that is not a
    /// number is `-1`.
    pub ranges: Vec<(i64, i64)>,
}

impl Emote {
    /// Parse a `/`-separated list of `id:ranges` groups.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split('/')
            .filter(|group| !group.is_empty())
            .map(Self::parse_group)
            .collect()
    }

    fn parse_group(group: &str) -> Self {
        let (id, ranges) = group.split_once(':').unwrap_or((group, ""));
        let ranges = ranges
            .split(',')
            .filter(|range| !range.is_empty())
            .map(|range| {
                let (start, end) = range.split_once('-').unwrap_or((range, ""));
                (number_or_unknown(start), number_or_unknown(end))
            })
            .collect();

        Self {
            id: id.to_owned(),
            ranges,
        }
    }

    /// Slice the emote's text out of `message` for each range, skipping
    /// ranges that do not fit. Offsets count characters, not bytes.
    pub fn names<'a>(&self, message: &'a str) -> Vec<&'a str> {
        let offsets: Vec<usize> = message
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(message.len()))
            .collect();

        self.ranges
            .iter()
            .filter_map(|&(start, end)| {
                let start = usize::try_from(start).ok()?;
                let end = usize::try_from(end).ok()?.checked_add(1)?;
                if start >= end {
                    return None;
                }
                let from = *offsets.get(start)?;
                let to = *offsets.get(end)?;
                message.get(from..to)
            })
            .collect()
    }
}
