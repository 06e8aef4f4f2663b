//! Sender prefix parsing.
//!
//! A prefix identifies the origin of a line. For users it has the shape
//! `nick!user@host`, where both the user and host parts may be missing;
//! for servers it is just the server name, which parses as a bare nick.

/// A decomposed `nick!user@host` prefix borrowing from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserPrefix<'a> {
    /// Nickname, or the whole prefix when it has no `!`/`@` parts.
    pub nick: &'a str,
    /// Username (ident), if the prefix carries one.
    pub user: Option<&'a str>,
    /// Hostname, if the prefix carries one.
    pub host: Option<&'a str>,
}

/// Split a prefix into nick, user and host.
///
/// The host is everything after the first `@`. The part before it is split
/// on the first `!` into nick and user. Absent parts are `None`, never an
/// error.
///
/// ```
/// use slirc_client::prefix::parse_user_prefix;
///
/// let p = parse_user_prefix("alice!al@example.org");
/// assert_eq!(p.nick, "alice");
/// assert_eq!(p.user, Some("al"));
/// assert_eq!(p.host, Some("example.org"));
/// ```
pub fn parse_user_prefix(prefix: &str) -> UserPrefix<'_> {
    let (left, host) = match prefix.split_once('@') {
        Some((left, host)) => (left, Some(host)),
        None => (prefix, None),
    };
    let (nick, user) = match left.split_once('!') {
        Some((nick, user)) => (nick, Some(user)),
        None => (left, None),
    };
    UserPrefix { nick, user, host }
}
