//! Line grammar for raw TMI lines.
//!
//! Every function in here is total: malformed or truncated input degrades
//! to empty fields, never to an error.

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::opt,
    sequence::preceded,
    IResult,
};

use super::Tags;

/// Borrowed pieces of a line, before a [`Message`](super::Message) owns them.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Parts<'a> {
    pub tags: Option<&'a str>,
    pub prefix: &'a str,
    pub command: &'a str,
    pub middle: Vec<&'a str>,
    pub trailing: &'a str,
}

/// Split a line into its grammar sections.
pub(super) fn split(line: &str) -> Parts<'_> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (tags, rest) = leading_word(line, '@');
    let (prefix, rest) = leading_word(rest, ':');
    let (command, rest) = word(rest);
    let (middle, trailing) = params(rest);

    Parts {
        tags,
        prefix: prefix.unwrap_or_default(),
        command,
        middle,
        trailing,
    }
}

/// Parse an optional `<lead>word` section followed by spaces.
fn leading_word(input: &str, lead: char) -> (Option<&str>, &str) {
    let parsed: IResult<&str, Option<&str>> =
        opt(preceded(char(lead), take_till(|c| c == ' ')))(input);

    match parsed {
        Ok((rest, section)) => (section, skip_spaces(rest)),
        Err(_) => (None, input),
    }
}

/// Parse the next space-delimited word. Without a space, the whole input
/// is the word.
fn word(input: &str) -> (&str, &str) {
    let parsed: IResult<&str, &str> = take_till(|c| c == ' ')(input);

    match parsed {
        Ok((rest, word)) => (word, skip_spaces(rest)),
        Err(_) => (input, ""),
    }
}

fn skip_spaces(input: &str) -> &str {
    input.trim_start_matches(' ')
}

/// Split the parameter section into middle tokens and the trailing text.
fn params(input: &str) -> (Vec<&str>, &str) {
    let mut middle = Vec::new();
    let mut rest = input;

    loop {
        rest = skip_spaces(rest);
        if rest.is_empty() {
            return (middle, "");
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            return (middle, trailing);
        }
        match rest.split_once(' ') {
            Some((token, tail)) => {
                middle.push(token);
                rest = tail;
            }
            None => {
                middle.push(rest);
                return (middle, "");
            }
        }
    }
}

/// Build the tag map from the raw block (without the leading `@`).
///
/// Keys without `=` get an empty value. A repeated key overwrites the
/// earlier one.
pub(super) fn tag_map(block: &str) -> Tags {
    let mut tags = Tags::new();
    for item in block.split(';').filter(|item| !item.is_empty()) {
        let (key, value) = item.split_once('=').unwrap_or((item, ""));
        tags.insert(key.to_owned(), value.to_owned());
    }
    tags
}

/// Split a prefix into `(nick, user, host)`.
pub(super) fn prefix_parts(prefix: &str) -> (&str, &str, &str) {
    let (nick_user, host) = prefix.split_once('@').unwrap_or((prefix, ""));
    let (nick, user) = nick_user.split_once('!').unwrap_or((nick_user, ""));
    (nick, user, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_line() {
        let parts = split("@b=1;c=2 :nick!u@h CMD p1 p2 :trailing text");
        assert_eq!(parts.tags, Some("b=1;c=2"));
        assert_eq!(parts.prefix, "nick!u@h");
        assert_eq!(parts.command, "CMD");
        assert_eq!(parts.middle, vec!["p1", "p2"]);
        assert_eq!(parts.trailing, "trailing text");
    }

    #[test]
    fn test_split_command_only() {
        let parts = split("RECONNECT");
        assert_eq!(parts.command, "RECONNECT");
        assert!(parts.middle.is_empty());
        assert_eq!(parts.trailing, "");
    }

    #[test]
    fn test_split_trailing_directly_after_command() {
        let parts = split("PING :tmi.twitch.tv");
        assert_eq!(parts.command, "PING");
        assert!(parts.middle.is_empty());
        assert_eq!(parts.trailing, "tmi.twitch.tv");
    }

    #[test]
    fn test_split_last_token_stays_in_middle() {
        let parts = split(":nick!nick@nick.tmi.twitch.tv JOIN #channel");
        assert_eq!(parts.middle, vec!["#channel"]);
        assert_eq!(parts.trailing, "");
    }

    #[test]
    fn test_split_collapses_space_runs() {
        let parts = split("CMD  a   b  :x  y");
        assert_eq!(parts.middle, vec!["a", "b"]);
        assert_eq!(parts.trailing, "x  y");
    }

    #[test]
    fn test_split_strips_crlf() {
        let parts = split("PING :foo\r\n");
        assert_eq!(parts.trailing, "foo");
    }

    #[test]
    fn test_split_degenerate_inputs() {
        assert_eq!(split(""), Parts::default());

        let parts = split("@");
        assert_eq!(parts.tags, Some(""));
        assert_eq!(parts.command, "");

        let parts = split(":");
        assert_eq!(parts.prefix, "");
        assert_eq!(parts.command, "");

        let parts = split("@a=b");
        assert_eq!(parts.tags, Some("a=b"));
        assert_eq!(parts.command, "");
    }

    #[test]
    fn test_tag_map_edge_cases() {
        let tags = tag_map("a=1;flag;b=;c=x=y");
        assert_eq!(tags["a"], "1");
        assert_eq!(tags["flag"], "");
        assert_eq!(tags["b"], "");
        assert_eq!(tags["c"], "x=y");
    }

    #[test]
    fn test_tag_map_last_duplicate_wins() {
        let tags = tag_map("mod=0;mod=1");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["mod"], "1");
    }

    #[test]
    fn test_prefix_shapes() {
        assert_eq!(prefix_parts("tmi.twitch.tv"), ("tmi.twitch.tv", "", ""));
        assert_eq!(prefix_parts("nick!user"), ("nick", "user", ""));
        assert_eq!(
            prefix_parts("nick!user@nick.tmi.twitch.tv"),
            ("nick", "user", "nick.tmi.twitch.tv")
        );
        assert_eq!(prefix_parts(""), ("", "", ""));
    }
}
