//! Message target parsing.
//!
//! The first parameter of PRIVMSG and MODE is a comma separated list of
//! addressees (`msgtarget` in RFC 2812). Each entry is decomposed into a
//! [`MessageTarget`]. Parsing never fails: anything unrecognized is a nick.

use std::fmt;

use crate::casemap::irc_eq;

/// One addressee of a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageTarget {
    /// A channel name starting with `#`, `+` or `&`.
    Channel(String),
    /// A nickname, optionally qualified as `nick!user@host`.
    Nick {
        nick: String,
        user: Option<String>,
        host: Option<String>,
    },
    /// A user on a server: `user@server`, `user%host@server` or `user%host`.
    User {
        user: String,
        host: Option<String>,
        server: Option<String>,
    },
    /// A host or server mask such as `$*.example.org`.
    Mask(String),
}

impl MessageTarget {
    /// Parse a single comma-free target token.
    pub fn parse(token: &str) -> Self {
        if token.starts_with(['#', '+', '&']) {
            return MessageTarget::Channel(token.to_string());
        }

        if let Some((user_part, server)) = token.split_once('@') {
            if let Some((nick, user)) = user_part.split_once('!') {
                return MessageTarget::Nick {
                    nick: nick.to_string(),
                    user: Some(user.to_string()),
                    host: Some(server.to_string()),
                };
            }
            let (user, host) = match user_part.split_once('%') {
                Some((user, host)) => (user, Some(host.to_string())),
                None => (user_part, None),
            };
            return MessageTarget::User {
                user: user.to_string(),
                host,
                server: Some(server.to_string()),
            };
        }

        if let Some((user, host)) = token.split_once('%') {
            return MessageTarget::User {
                user: user.to_string(),
                host: Some(host.to_string()),
                server: None,
            };
        }

        if token.starts_with('$') && token.contains('.') {
            return MessageTarget::Mask(token.to_string());
        }

        MessageTarget::Nick {
            nick: token.to_string(),
            user: None,
            host: None,
        }
    }

    /// The channel name, if this target is a channel.
    pub fn channel(&self) -> Option<&str> {
        match self {
            MessageTarget::Channel(name) => Some(name),
            _ => None,
        }
    }

    /// The nickname, if this target names a nick.
    pub fn nick(&self) -> Option<&str> {
        match self {
            MessageTarget::Nick { nick, .. } => Some(nick),
            _ => None,
        }
    }

    /// Whether this target names the given nick (case-insensitive).
    pub fn is_nick(&self, nick: &str) -> bool {
        self.nick().is_some_and(|n| irc_eq(n, nick))
    }
}

impl fmt::Display for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTarget::Channel(name) | MessageTarget::Mask(name) => f.write_str(name),
            MessageTarget::Nick { nick, user, host } => {
                f.write_str(nick)?;
                if let Some(user) = user {
                    write!(f, "!{}", user)?;
                }
                if let Some(host) = host {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
            MessageTarget::User { user, host, server } => {
                f.write_str(user)?;
                if let Some(host) = host {
                    write!(f, "%{}", host)?;
                }
                if let Some(server) = server {
                    write!(f, "@{}", server)?;
                }
                Ok(())
            }
        }
    }
}

/// Split a target field on `,` and parse each entry in order.
///
/// Empty entries (as in `#a,,#b`) are skipped.
pub fn parse_targets(field: &str) -> Vec<MessageTarget> {
    field
        .split(',')
        .filter(|token| !token.is_empty())
        .map(MessageTarget::parse)
        .collect()
}
