//! Channel mode types.

use std::fmt;

/// Channel modes from RFC 2811 section 4, plus the half-op rank most
/// servers add.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChannelMode {
    /// `O` - channel creator
    Creator,
    /// `o` - channel operator
    Operator,
    /// `h` - half-operator
    HalfOp,
    /// `v` - voice
    Voice,
    /// `a` - anonymous channel, or the admin rank when it carries a nick
    Anonymous,
    /// `i` - invite-only
    InviteOnly,
    /// `m` - moderated
    Moderated,
    /// `n` - no messages from outside
    NoExternalMessages,
    /// `q` - quiet, or the owner rank when it carries a nick
    Quiet,
    /// `p` - private
    Private,
    /// `s` - secret
    Secret,
    /// `r` - server reop
    Reop,
    /// `t` - topic settable by operators only
    ProtectedTopic,
    /// `k` - channel key
    Key,
    /// `l` - user limit
    Limit,
    /// `b` - ban mask
    Ban,
    /// `e` - ban exception mask
    Exception,
    /// `I` - invitation mask
    InviteException,
    /// Any letter not listed above.
    Unknown(char),
}

impl ChannelMode {
    /// Map a mode letter to its mode.
    pub fn from_char(c: char) -> Self {
        use self::ChannelMode::*;

        match c {
            'O' => Creator,
            'o' => Operator,
            'h' => HalfOp,
            'v' => Voice,
            'a' => Anonymous,
            'i' => InviteOnly,
            'm' => Moderated,
            'n' => NoExternalMessages,
            'q' => Quiet,
            'p' => Private,
            's' => Secret,
            'r' => Reop,
            't' => ProtectedTopic,
            'k' => Key,
            'l' => Limit,
            'b' => Ban,
            'e' => Exception,
            'I' => InviteException,
            _ => Unknown(c),
        }
    }

    /// The mode letter.
    pub fn letter(self) -> char {
        use self::ChannelMode::*;

        match self {
            Creator => 'O',
            Operator => 'o',
            HalfOp => 'h',
            Voice => 'v',
            Anonymous => 'a',
            InviteOnly => 'i',
            Moderated => 'm',
            NoExternalMessages => 'n',
            Quiet => 'q',
            Private => 'p',
            Secret => 's',
            Reop => 'r',
            ProtectedTopic => 't',
            Key => 'k',
            Limit => 'l',
            Ban => 'b',
            Exception => 'e',
            InviteException => 'I',
            Unknown(c) => c,
        }
    }

    /// Whether this mode consumes an argument when set (`added`) or unset.
    ///
    /// The limit only takes one when it is set.
    pub fn takes_arg(self, added: bool) -> bool {
        use self::ChannelMode::*;

        match self {
            Creator | Operator | HalfOp | Voice | Key | Ban | Exception | InviteException => {
                true
            }
            Limit => added,
            _ => false,
        }
    }

    /// Flags that servers also use as nick ranks (`+q nick` for owner,
    /// `+a nick` for admin). They consume an argument only when one is left
    /// over after the letters that require theirs.
    pub fn may_take_arg(self) -> bool {
        matches!(self, ChannelMode::Anonymous | ChannelMode::Quiet)
    }

    /// List modes can be queried without an argument (`MODE #chan +b`).
    pub fn is_list_mode(self) -> bool {
        matches!(
            self,
            ChannelMode::Ban | ChannelMode::Exception | ChannelMode::InviteException
        )
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One atomic mode change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeChange {
    /// `true` for `+`, `false` for `-`.
    pub added: bool,
    pub mode: ChannelMode,
    /// The argument consumed by this change, if any.
    pub params: Vec<String>,
}

impl ModeChange {
    /// The first argument, e.g. the affected nick for `o` and `v`.
    pub fn arg(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.added { '+' } else { '-' };
        write!(f, "{}{}", sign, self.mode)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip() {
        for c in "OohvaimnqpsrtklbeI".chars() {
            let mode = ChannelMode::from_char(c);
            assert!(!matches!(mode, ChannelMode::Unknown(_)), "{}", c);
            assert_eq!(mode.letter(), c);
        }
        assert_eq!(ChannelMode::from_char('z'), ChannelMode::Unknown('z'));
    }

    #[test]
    fn test_limit_arg_only_when_set() {
        assert!(ChannelMode::Limit.takes_arg(true));
        assert!(!ChannelMode::Limit.takes_arg(false));
        assert!(ChannelMode::Key.takes_arg(false));
        assert!(!ChannelMode::Moderated.takes_arg(true));
    }

    #[test]
    fn test_display() {
        let change = ModeChange {
            added: false,
            mode: ChannelMode::Voice,
            params: vec!["bob".to_string()],
        };
        assert_eq!(change.to_string(), "-v bob");
    }
}
