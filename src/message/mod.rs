//! Parsed protocol lines.
//!
//! A [`Message`] is built once per received line and then shared read-only
//! (behind an `Arc`) by every payload constructed from it.

mod parse;
pub mod tags;

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Raw tag map: key to still-escaped value.
pub type Tags = HashMap<String, String>;

/// One parsed protocol line.
///
/// Parsing never fails. Missing sections are empty strings or empty lists,
/// and [`params`](Self::params) always ends with the trailing parameter, so
/// `params().len() == middle().len() + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    raw: String,
    tags: Tags,
    prefix: String,
    nick: String,
    user: String,
    host: String,
    command: String,
    middle: Vec<String>,
    trailing: String,
    params: Vec<String>,
}

impl Message {
    /// Parse one line. A trailing CR/LF is ignored.
    pub fn parse(line: &str) -> Self {
        let raw = line.trim_end_matches(['\r', '\n']);
        let parts = parse::split(raw);
        let (nick, user, host) = parse::prefix_parts(parts.prefix);

        let middle: Vec<String> = parts.middle.iter().map(|s| (*s).to_owned()).collect();
        let mut params = middle.clone();
        params.push(parts.trailing.to_owned());

        Self {
            raw: raw.to_owned(),
            tags: parts.tags.map(parse::tag_map).unwrap_or_default(),
            prefix: parts.prefix.to_owned(),
            nick: nick.to_owned(),
            user: user.to_owned(),
            host: host.to_owned(),
            command: parts.command.to_owned(),
            middle,
            trailing: parts.trailing.to_owned(),
            params,
        }
    }

    /// Parse one line from raw bytes, replacing invalid UTF-8.
    pub fn from_bytes(line: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(line))
    }

    /// The line as received, without CR/LF.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn raw_bytes(&self) -> &[u8] {
        self.raw.as_bytes()
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Raw (escaped) value of a tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Space-delimited parameters before the trailing one.
    pub fn middle(&self) -> &[String] {
        &self.middle
    }

    /// The colon-introduced final parameter, possibly empty.
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// `middle` followed by `trailing`.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Parameter at `index`, or `""` when out of range.
    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Middle parameter at `index`, or `""` when out of range.
    pub fn middle_param(&self, index: usize) -> &str {
        self.middle.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Whether the command is a three-digit numeric reply.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for Message {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
