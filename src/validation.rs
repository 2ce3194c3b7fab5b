//! Validation of Twitch logins, channel names and outgoing lines.
//!
//! Twitch logins are narrower than RFC 2812 nicknames:
//! - 1-25 characters
//! - ASCII letters, digits and underscore only
//! - no leading underscore
//!
//! Anonymous read-only logins take the form `justinfan<digits>` and pass
//! the same grammar.
//!
//! Channels are a `#` followed by a login, or the chat-room form
//! `#chatrooms:<owner_id>:<room_uuid>`.

/// Longest login Twitch hands out.
pub const MAX_LOGIN_LEN: usize = 25;

/// Prefix of anonymous logins.
pub const ANONYMOUS_PREFIX: &str = "justinfan";

/// Characters that may never appear inside one protocol line.
pub const PROTOCOL_CONTROL_CHARS: &[char] = &['\x00', '\r', '\n'];

/// Result of validation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty.
    Empty,
    /// The input was too long.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        actual: usize,
    },
    /// Invalid character found at position.
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// Position in the string.
        position: usize,
    },
    /// Missing required `#` prefix.
    MissingPrefix,
    /// Invalid first character.
    InvalidFirstChar {
        /// The invalid character.
        ch: char,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "input is empty"),
            ValidationError::TooLong { max, actual } => {
                write!(f, "input too long: {} characters (max {})", actual, max)
            }
            ValidationError::InvalidChar { ch, position } => {
                write!(f, "invalid character {:?} at position {}", ch, position)
            }
            ValidationError::MissingPrefix => write!(f, "missing required '#' prefix"),
            ValidationError::InvalidFirstChar { ch } => {
                write!(f, "invalid first character: {:?}", ch)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[inline]
fn is_login_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Validate a Twitch login.
///
/// # Examples
///
/// ```
/// use slirc_tmi::validation::validate_login;
///
/// assert!(validate_login("some_streamer").is_ok());
/// assert!(validate_login("justinfan12345").is_ok());
/// assert!(validate_login("").is_err());
/// assert!(validate_login("_hidden").is_err());
/// assert!(validate_login("has space").is_err());
/// ```
pub fn validate_login(login: &str) -> Result<(), ValidationError> {
    let Some(first) = login.chars().next() else {
        return Err(ValidationError::Empty);
    };

    let len = login.chars().count();
    if len > MAX_LOGIN_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_LOGIN_LEN,
            actual: len,
        });
    }

    if first == '_' || !is_login_char(first) {
        return Err(ValidationError::InvalidFirstChar { ch: first });
    }

    for (i, c) in login.chars().enumerate().skip(1) {
        if !is_login_char(c) {
            return Err(ValidationError::InvalidChar { ch: c, position: i });
        }
    }

    Ok(())
}

/// Whether `login` is a valid Twitch login.
#[inline]
pub fn is_valid_login(login: &str) -> bool {
    validate_login(login).is_ok()
}

/// Whether `login` is an anonymous `justinfan<digits>` login.
///
/// ```
/// use slirc_tmi::validation::is_anonymous_login;
///
/// assert!(is_anonymous_login("justinfan9001"));
/// assert!(!is_anonymous_login("justinfan"));
/// assert!(!is_anonymous_login("justinfanclub"));
/// ```
pub fn is_anonymous_login(login: &str) -> bool {
    login
        .strip_prefix(ANONYMOUS_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Validate a channel name: `#<login>` or `#chatrooms:<owner_id>:<room_uuid>`.
///
/// ```
/// use slirc_tmi::validation::validate_channel;
///
/// assert!(validate_channel("#rustlang").is_ok());
/// assert!(validate_channel("#chatrooms:12345:4f0c8a2e-0000-4000-8000-000000000000").is_ok());
/// assert!(validate_channel("rustlang").is_err());
/// ```
pub fn validate_channel(channel: &str) -> Result<(), ValidationError> {
    if channel.is_empty() {
        return Err(ValidationError::Empty);
    }
    let Some(name) = channel.strip_prefix('#') else {
        return Err(ValidationError::MissingPrefix);
    };

    if name.starts_with("chatrooms:") {
        return match channel
            .char_indices()
            .find(|(_, c)| *c == ' ' || *c == ',' || c.is_control())
        {
            Some((position, ch)) => Err(ValidationError::InvalidChar { ch, position }),
            None => Ok(()),
        };
    }

    validate_login(name).map_err(|err| match err {
        // Shift positions past the '#'.
        ValidationError::InvalidChar { ch, position } => ValidationError::InvalidChar {
            ch,
            position: position + 1,
        },
        other => other,
    })
}

/// Validate that one outgoing line contains no NUL, CR or LF.
///
/// ```
/// use slirc_tmi::validation::validate_message_line;
///
/// assert!(validate_message_line("PRIVMSG #chan :hi").is_ok());
/// assert!(validate_message_line("PRIVMSG #chan :hi\r\nQUIT").is_err());
/// ```
pub fn validate_message_line(line: &str) -> Result<(), ValidationError> {
    match line
        .char_indices()
        .find(|(_, c)| PROTOCOL_CONTROL_CHARS.contains(c))
    {
        Some((position, ch)) => Err(ValidationError::InvalidChar { ch, position }),
        None => Ok(()),
    }
}
