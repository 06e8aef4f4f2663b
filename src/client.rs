//! The client facade.
//!
//! [`Client`] owns the [`ClientState`] and exposes read-only views of it,
//! plus commands that format protocol lines and queue them for the
//! connection. Lines leave through a [`ClientHandle`] and are picked up on
//! the connection side from the matching [`Outbox`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::format;
use crate::mode::ChannelMode;
use crate::state::{ClientState, Phase};

/// An item on the client→transport queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outgoing {
    /// A protocol line without terminator.
    Line(String),
    /// Close the connection once earlier lines are written.
    Shutdown,
}

/// Cloneable, thread-safe sender of outgoing lines.
#[derive(Clone, Debug)]
pub struct ClientHandle {
    tx: UnboundedSender<Outgoing>,
    terminated: Arc<AtomicBool>,
}

impl ClientHandle {
    /// Queue one protocol line.
    ///
    /// Fails with [`ClientError::InvalidArgument`] if the line contains CR or
    /// LF, and with [`ClientError::NotConnected`] once the connection was
    /// terminated or has shut down.
    pub fn send_message(&self, line: &str) -> Result<()> {
        if line.contains(['\r', '\n']) {
            return Err(ClientError::InvalidArgument(format!(
                "line contains a line break: {:?}",
                line
            )));
        }
        if self.terminated.load(Ordering::Acquire) {
            return Err(ClientError::NotConnected);
        }
        debug!(line, "queueing outgoing line");
        self.tx
            .send(Outgoing::Line(line.to_string()))
            .map_err(|_| ClientError::NotConnected)
    }

    /// Ask the connection to shut down after the lines already queued.
    ///
    /// Calling this more than once, or after the connection closed, does
    /// nothing.
    pub fn terminate(&self) {
        if !self.terminated.swap(true, Ordering::AcqRel) {
            debug!("termination requested");
            let _ = self.tx.send(Outgoing::Shutdown);
        }
    }

    /// Whether [`terminate`](Self::terminate) was called.
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}

/// Receiving end of the client→transport queue.
#[derive(Debug)]
pub struct Outbox {
    rx: UnboundedReceiver<Outgoing>,
}

impl Outbox {
    pub async fn recv(&mut self) -> Option<Outgoing> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Outgoing> {
        match self.rx.try_recv() {
            Ok(item) => Some(item),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Refuse further sends and discard whatever is still queued.
    pub fn close(&mut self) {
        self.rx.close();
        while let Some(item) = self.try_recv() {
            if let Outgoing::Line(line) = item {
                warn!(line = %line, "dropping line queued after shutdown");
            }
        }
    }
}

/// Create a connected handle/outbox pair.
pub(crate) fn outbound_queue() -> (ClientHandle, Outbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = ClientHandle {
        tx,
        terminated: Arc::new(AtomicBool::new(false)),
    };
    (handle, Outbox { rx })
}

/// One IRC client: configuration, session state and outgoing commands.
#[derive(Debug)]
pub struct Client {
    config: Arc<ClientConfig>,
    state: ClientState,
    handle: ClientHandle,
}

impl Client {
    /// Create a client and the outbox its lines are delivered to.
    pub fn new(config: ClientConfig) -> (Self, Outbox) {
        let (handle, outbox) = outbound_queue();
        let client = Self {
            config: Arc::new(config),
            state: ClientState::new(),
            handle,
        };
        (client, outbox)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Arc<ClientConfig> {
        Arc::clone(&self.config)
    }

    /// A sender usable from any thread.
    pub fn handle(&self) -> ClientHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ClientState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn nick(&self) -> Option<&str> {
        self.state.nick()
    }

    pub fn server(&self) -> Option<&str> {
        self.state.server()
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> + '_ {
        self.state.channels()
    }

    pub fn is_in_channel(&self, channel: &str) -> bool {
        self.state.is_in_channel(channel)
    }

    pub fn is_operator_in(&self, channel: &str) -> bool {
        self.state.is_operator_in(channel)
    }

    pub fn has_voice_in(&self, channel: &str) -> bool {
        self.state.has_voice_in(channel)
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn is_registered(&self) -> bool {
        self.state.is_registered()
    }

    /// Queue a raw protocol line.
    pub fn send_line(&self, line: &str) -> Result<()> {
        self.handle.send_message(line)
    }

    /// Send PASS (when configured), NICK and USER.
    pub fn register(&self) -> Result<()> {
        if let Some(password) = self.config.password.as_deref() {
            self.send_line(&format::pass(Some(password)))?;
        }
        self.send_line(&format::nick(&self.config.nickname))?;
        self.send_line(&format::user(self.config.username(), &self.config.realname))
    }

    pub fn set_nick(&self, nick: &str) -> Result<()> {
        self.send_line(&format::nick(nick))
    }

    pub fn join<S: AsRef<str>>(&self, channels: &[S]) -> Result<()> {
        if channels.is_empty() {
            return Err(ClientError::InvalidArgument("no channels to join".to_string()));
        }
        self.send_line(&format::join(channels))
    }

    pub fn part<S: AsRef<str>>(&self, channels: &[S], message: &str) -> Result<()> {
        if channels.is_empty() {
            return Err(ClientError::InvalidArgument("no channels to part".to_string()));
        }
        self.send_line(&format::part(channels, message))
    }

    /// Send QUIT and terminate the connection.
    pub fn quit(&self, message: Option<&str>) -> Result<()> {
        let sent = self.send_line(&format::quit(message));
        self.terminate();
        sent
    }

    /// Send a PRIVMSG to a channel or nick, prefixed with our own nick.
    pub fn send_message(&self, target: &str, text: &str) -> Result<()> {
        let nick = self.state.nick().ok_or(ClientError::NotRegistered)?;
        self.send_line(&format::privmsg(target, text, Some(nick)))
    }

    /// Answer a PING from the server we registered with.
    pub fn pong(&self) -> Result<()> {
        let server = self.state.server().ok_or(ClientError::NotRegistered)?;
        self.send_line(&format::pong(server))
    }

    pub fn kick(&self, channel: &str, nick: &str, reason: &str) -> Result<()> {
        self.send_line(&format::kick(&[channel], &[nick], reason))
    }

    pub fn op(&self, channel: &str, nick: &str) -> Result<()> {
        self.change_rank(channel, true, ChannelMode::Operator, nick)
    }

    pub fn deop(&self, channel: &str, nick: &str) -> Result<()> {
        self.change_rank(channel, false, ChannelMode::Operator, nick)
    }

    pub fn voice(&self, channel: &str, nick: &str) -> Result<()> {
        self.change_rank(channel, true, ChannelMode::Voice, nick)
    }

    pub fn devoice(&self, channel: &str, nick: &str) -> Result<()> {
        self.change_rank(channel, false, ChannelMode::Voice, nick)
    }

    fn change_rank(&self, channel: &str, added: bool, mode: ChannelMode, nick: &str) -> Result<()> {
        self.send_line(&format::mode(channel, added, mode.letter(), &[nick]))
    }

    /// Shut the connection down after the queued lines. Idempotent.
    pub fn terminate(&self) {
        self.handle.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(outbox: &mut Outbox) -> Vec<Outgoing> {
        std::iter::from_fn(|| outbox.try_recv()).collect()
    }

    fn line(s: &str) -> Outgoing {
        Outgoing::Line(s.to_string())
    }

    #[test]
    fn test_register_lines() {
        let mut config = ClientConfig::new("irc.example.net", "alice");
        config.password = Some("pw".to_string());
        config.realname = "Alice L".to_string();
        let (client, mut outbox) = Client::new(config);

        client.register().unwrap();
        assert_eq!(
            drain(&mut outbox),
            vec![line("PASS :pw"), line("NICK alice"), line("USER alice 0 * :Alice L")]
        );
    }

    #[test]
    fn test_register_without_password() {
        let (client, mut outbox) = Client::new(ClientConfig::new("srv", "bob"));
        client.register().unwrap();
        assert_eq!(drain(&mut outbox)[0], line("NICK bob"));
    }

    #[test]
    fn test_rejects_line_breaks() {
        let (client, mut outbox) = Client::new(ClientConfig::new("srv", "bob"));
        assert!(matches!(
            client.send_line("PRIVMSG #a :x\r\nQUIT"),
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(drain(&mut outbox).is_empty());
    }

    #[test]
    fn test_commands_requiring_registration() {
        let (client, _outbox) = Client::new(ClientConfig::new("srv", "bob"));
        assert!(matches!(client.pong(), Err(ClientError::NotRegistered)));
        assert!(matches!(
            client.send_message("#a", "hi"),
            Err(ClientError::NotRegistered)
        ));
    }

    #[test]
    fn test_registered_commands() {
        let (mut client, mut outbox) = Client::new(ClientConfig::new("srv", "bob"));
        client.state_mut().transition_phase(Phase::Connected).unwrap();
        client.state_mut().register(Some("irc.example.net"), "bob").unwrap();

        client.pong().unwrap();
        client.send_message("#a", "hi all").unwrap();
        client.op("#a", "carol").unwrap();
        client.devoice("#a", "dave").unwrap();
        client.kick("#a", "eve", "bye").unwrap();
        assert_eq!(
            drain(&mut outbox),
            vec![
                line("PONG :irc.example.net"),
                line(":bob PRIVMSG #a :hi all"),
                line("MODE #a +o carol"),
                line("MODE #a -v dave"),
                line("KICK #a eve :bye"),
            ]
        );
    }

    #[test]
    fn test_quit_terminates() {
        let (client, mut outbox) = Client::new(ClientConfig::new("srv", "bob"));
        client.quit(Some("bye")).unwrap();
        assert!(client.handle().is_terminated());
        assert_eq!(drain(&mut outbox), vec![line("QUIT :bye"), Outgoing::Shutdown]);

        assert!(matches!(client.join(&["#a"]), Err(ClientError::NotConnected)));
        client.terminate();
        assert!(drain(&mut outbox).is_empty());
    }

    #[test]
    fn test_closed_outbox_reports_not_connected() {
        let (client, mut outbox) = Client::new(ClientConfig::new("srv", "bob"));
        client.set_nick("robert").unwrap();
        outbox.close();
        assert!(outbox.try_recv().is_none());
        assert!(matches!(client.set_nick("bobby"), Err(ClientError::NotConnected)));
    }

    #[test]
    fn test_join_part_validate_channels() {
        let (client, mut outbox) = Client::new(ClientConfig::new("srv", "bob"));
        assert!(client.join::<&str>(&[]).is_err());
        client.join(&["#a", "#b"]).unwrap();
        client.part(&["#a"], "later").unwrap();
        assert_eq!(
            drain(&mut outbox),
            vec![line("JOIN #a,#b"), line("PART #a :later")]
        );
    }
}
