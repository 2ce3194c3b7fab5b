//! Connection settings.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default TMI endpoint.
pub const TWITCH_HOST: &str = "irc.chat.twitch.tv";
/// Default TMI TLS port.
pub const TWITCH_TLS_PORT: u16 = 6697;

const DEFAULT_READ_BUFFER: usize = 8 * 1024;
const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// An OAuth access token.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Token(String);

impl Token {
    /// Wrap a token, with or without its `oauth:` prefix.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The bare token, as used in an HTTP `Authorization: Bearer` header.
    pub fn bearer(&self) -> &str {
        self.0.strip_prefix("oauth:").unwrap_or(&self.0)
    }

    /// The token as `PASS` expects it: `oauth:<token>`.
    pub fn pass(&self) -> String {
        format!("oauth:{}", self.bearer())
    }

    pub fn is_empty(&self) -> bool {
        self.bearer().is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Everything a client needs to connect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClientConfig {
    pub host: String,
    /// TLS is used on 443 and 6697.
    pub port: u16,
    pub nick: String,
    pub token: Token,
    /// Answer `PING` with `PONG` automatically.
    #[cfg_attr(feature = "serde", serde(default = "default_auto_pong"))]
    pub auto_pong: bool,
    /// Initial capacity of the read buffer in bytes.
    #[cfg_attr(feature = "serde", serde(default = "default_read_buffer"))]
    pub read_buffer_capacity: usize,
    /// How long `disconnect` waits for queued lines to be written before
    /// dropping the socket.
    #[cfg_attr(feature = "serde", serde(default = "default_close_timeout"))]
    pub close_timeout: Duration,
}

#[cfg(feature = "serde")]
fn default_auto_pong() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_read_buffer() -> usize {
    DEFAULT_READ_BUFFER
}

#[cfg(feature = "serde")]
fn default_close_timeout() -> Duration {
    DEFAULT_CLOSE_TIMEOUT
}

impl ClientConfig {
    /// Build and validate a config.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        nick: impl Into<String>,
        token: impl Into<Token>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            host: host.into(),
            port,
            nick: nick.into(),
            token: token.into(),
            auto_pong: true,
            read_buffer_capacity: DEFAULT_READ_BUFFER,
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        };
        config.validate()?;
        Ok(config)
    }

    /// `irc.chat.twitch.tv:6697` over TLS.
    pub fn twitch(nick: impl Into<String>, token: impl Into<Token>) -> Result<Self, ConfigError> {
        Self::new(TWITCH_HOST, TWITCH_TLS_PORT, nick, token)
    }

    /// Read `TMI_NICK` and `TMI_TOKEN`, plus optional `TMI_HOST` and
    /// `TMI_PORT` overriding the Twitch defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let nick = lookup("TMI_NICK").ok_or(ConfigError::MissingEnv("TMI_NICK"))?;
        let token = lookup("TMI_TOKEN").ok_or(ConfigError::MissingEnv("TMI_TOKEN"))?;
        let host = lookup("TMI_HOST").unwrap_or_else(|| TWITCH_HOST.to_owned());
        let port = match lookup("TMI_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("TMI_PORT"))?,
            None => TWITCH_TLS_PORT,
        };
        Self::new(host, port, nick, token)
    }

    #[must_use]
    pub fn with_auto_pong(mut self, auto_pong: bool) -> Self {
        self.auto_pong = auto_pong;
        self
    }

    #[must_use]
    pub fn with_read_buffer_capacity(mut self, capacity: usize) -> Self {
        self.read_buffer_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }

    /// Check the fields a connection cannot do without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.nick.trim().is_empty() {
            return Err(ConfigError::EmptyNick);
        }
        if self.token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(())
    }

    pub fn uses_tls(&self) -> bool {
        crate::transport::is_secure_port(self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_token_forms() {
        let token = Token::new("oauth:abc123");
        assert_eq!(token.bearer(), "abc123");
        assert_eq!(token.pass(), "oauth:abc123");

        let token = Token::new("abc123");
        assert_eq!(token.pass(), "oauth:abc123");
        assert_eq!(format!("{:?}", token), "Token(<redacted>)");

        assert!(Token::new("oauth:").is_empty());
    }

    #[test]
    fn test_constructor_validation() {
        assert_eq!(
            ClientConfig::new("", 6697, "n", "t"),
            Err(ConfigError::EmptyHost)
        );
        assert_eq!(
            ClientConfig::new("h", 0, "n", "t"),
            Err(ConfigError::InvalidPort)
        );
        assert_eq!(
            ClientConfig::new("h", 6697, " ", "t"),
            Err(ConfigError::EmptyNick)
        );
        assert_eq!(
            ClientConfig::new("h", 6697, "n", ""),
            Err(ConfigError::EmptyToken)
        );
    }

    #[test]
    fn test_twitch_preset() {
        let config = ClientConfig::twitch("ronni", "oauth:abc").unwrap();
        assert_eq!(config.host, TWITCH_HOST);
        assert_eq!(config.port, 6697);
        assert!(config.auto_pong);
        assert!(config.uses_tls());
        assert_eq!(config.close_timeout, Duration::from_secs(5));
        assert!(!format!("{:?}", config).contains("abc"));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("TMI_NICK", "ronni"),
            ("TMI_TOKEN", "abc"),
            ("TMI_PORT", "6667"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|key| env.get(key).map(|v| (*v).to_owned())).unwrap();
        assert_eq!(config.host, TWITCH_HOST);
        assert_eq!(config.port, 6667);
        assert!(!config.uses_tls());

        let missing = ClientConfig::from_lookup(|_| None);
        assert_eq!(missing, Err(ConfigError::MissingEnv("TMI_NICK")));

        let bad_port = ClientConfig::from_lookup(|key| match key {
            "TMI_PORT" => Some("x".to_owned()),
            _ => Some("v".to_owned()),
        });
        assert_eq!(bad_port, Err(ConfigError::InvalidEnv("TMI_PORT")));
    }
}
