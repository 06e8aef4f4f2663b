//! Client state: connection phase, identity and channel membership.
//!
//! [`ClientState`] is written only in reaction to confirmed server messages.
//! Every change of [`Phase`] goes through [`ClientState::transition_phase`],
//! which resets whatever the new phase no longer supports, so no reader can
//! observe e.g. a nick without a registration.

use std::collections::HashSet;
use std::fmt;

use crate::casemap::irc_to_lower;
use crate::error::StateError;

/// Connection and registration stage, ordered `Disconnected < Connected < Registered`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// No transport.
    #[default]
    Disconnected,
    /// Transport established, registration not confirmed.
    Connected,
    /// The server sent its welcome reply.
    Registered,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Disconnected => "disconnected",
            Phase::Connected => "connected",
            Phase::Registered => "registered",
        })
    }
}

/// The client's authoritative view of its session.
///
/// Channel names are stored RFC 1459 case-folded.
#[derive(Clone, Debug, Default)]
pub struct ClientState {
    phase: Phase,
    server: Option<String>,
    nick: Option<String>,
    channels: HashSet<String>,
    operator_in: HashSet<String>,
    has_voice_in: HashSet<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `to`, clearing the fields `to` cannot carry.
    ///
    /// Leaving `Registered` clears nick, channels and ranks; reaching
    /// `Disconnected` also clears the server. `Registered` can only be
    /// entered from `Connected` (use [`register`](Self::register)); jumping
    /// there from `Disconnected` is rejected.
    pub fn transition_phase(&mut self, to: Phase) -> Result<(), StateError> {
        let from = self.phase;
        if to == Phase::Registered && from == Phase::Disconnected {
            return Err(StateError::InvalidTransition { from, to });
        }

        if to < Phase::Registered {
            self.nick = None;
            self.channels.clear();
            self.operator_in.clear();
            self.has_voice_in.clear();
        }
        if to == Phase::Disconnected {
            self.server = None;
        }
        self.phase = to;
        Ok(())
    }

    /// Enter `Registered` with the confirmed server name and nick.
    ///
    /// Re-registering while already registered replaces both values.
    pub fn register(&mut self, server: Option<&str>, nick: &str) -> Result<(), StateError> {
        self.transition_phase(Phase::Registered)?;
        self.server = server.map(str::to_string);
        self.nick = Some(nick.to_string());
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_connected(&self) -> bool {
        self.phase >= Phase::Connected
    }

    pub fn is_registered(&self) -> bool {
        self.phase == Phase::Registered
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    /// Joined channels (case-folded).
    pub fn channels(&self) -> impl Iterator<Item = &str> + '_ {
        self.channels.iter().map(String::as_str)
    }

    pub fn is_in_channel(&self, channel: &str) -> bool {
        self.channels.contains(&irc_to_lower(channel))
    }

    pub fn is_operator_in(&self, channel: &str) -> bool {
        self.operator_in.contains(&irc_to_lower(channel))
    }

    pub fn has_voice_in(&self, channel: &str) -> bool {
        self.has_voice_in.contains(&irc_to_lower(channel))
    }

    /// Record a join. Returns `false` if the channel was already joined.
    pub(crate) fn add_channel(&mut self, channel: &str) -> bool {
        self.channels.insert(irc_to_lower(channel))
    }

    /// Record leaving a channel, dropping its ranks.
    pub(crate) fn remove_channel(&mut self, channel: &str) -> bool {
        let key = irc_to_lower(channel);
        self.operator_in.remove(&key);
        self.has_voice_in.remove(&key);
        self.channels.remove(&key)
    }

    /// Grant or revoke operator rank. Ignored for channels not joined.
    pub(crate) fn set_operator(&mut self, channel: &str, on: bool) {
        Self::set_rank(&self.channels, &mut self.operator_in, channel, on);
    }

    /// Grant or revoke voice. Ignored for channels not joined.
    pub(crate) fn set_voice(&mut self, channel: &str, on: bool) {
        Self::set_rank(&self.channels, &mut self.has_voice_in, channel, on);
    }

    fn set_rank(channels: &HashSet<String>, ranks: &mut HashSet<String>, channel: &str, on: bool) {
        let key = irc_to_lower(channel);
        if !on {
            ranks.remove(&key);
        } else if channels.contains(&key) {
            ranks.insert(key);
        }
    }
}
