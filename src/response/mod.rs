//! Numeric replies the Twitch chat servers send.
//!
//! TMI only emits a handful of RFC 1459 numerics; everything it does not
//! send is left out.

#![allow(non_camel_case_types)]

use std::str::FromStr;

/// A numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Welcome; commits the handshake
    RPL_WELCOME = 1,
    /// 002 - Your host
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info
    RPL_MYINFO = 4,
    /// 353 - NAMES entries
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - MOTD end
    RPL_ENDOFMOTD = 376,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
}

impl Response {
    /// Numeric value of the reply.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// The three-digit command token, e.g. `"001"`.
    pub fn as_command(self) -> &'static str {
        match self {
            Self::RPL_WELCOME => "001",
            Self::RPL_YOURHOST => "002",
            Self::RPL_CREATED => "003",
            Self::RPL_MYINFO => "004",
            Self::RPL_NAMREPLY => "353",
            Self::RPL_ENDOFNAMES => "366",
            Self::RPL_MOTD => "372",
            Self::RPL_MOTDSTART => "375",
            Self::RPL_ENDOFMOTD => "376",
            Self::ERR_UNKNOWNCOMMAND => "421",
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::RPL_WELCOME,
            2 => Self::RPL_YOURHOST,
            3 => Self::RPL_CREATED,
            4 => Self::RPL_MYINFO,
            353 => Self::RPL_NAMREPLY,
            366 => Self::RPL_ENDOFNAMES,
            372 => Self::RPL_MOTD,
            375 => Self::RPL_MOTDSTART,
            376 => Self::RPL_ENDOFMOTD,
            421 => Self::ERR_UNKNOWNCOMMAND,
            _ => return None,
        })
    }

    pub fn is_error(self) -> bool {
        self.code() >= 400
    }
}

impl FromStr for Response {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 {
            return Err(());
        }
        s.parse::<u16>().ok().and_then(Self::from_code).ok_or(())
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_round_trip() {
        for code in [1, 2, 3, 4, 353, 366, 372, 375, 376, 421] {
            let response = Response::from_code(code).unwrap();
            assert_eq!(response.code(), code);
            assert_eq!(response.as_command().parse::<Response>(), Ok(response));
        }
    }

    #[test]
    fn test_parse_rejects_non_numerics() {
        assert!("1".parse::<Response>().is_err());
        assert!("PRIVMSG".parse::<Response>().is_err());
        assert!("999".parse::<Response>().is_err());
    }

    #[test]
    fn test_is_error() {
        assert!(Response::ERR_UNKNOWNCOMMAND.is_error());
        assert!(!Response::RPL_WELCOME.is_error());
    }
}
