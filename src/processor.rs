//! The message processor.
//!
//! [`MessageProcessor`] takes one protocol line at a time, updates the
//! client state the line implies and calls the matching [`Handler`]
//! events. A line that cannot be parsed is logged and dropped; a line that
//! parses but cannot be acted on reaches
//! [`Handler::handle_unhandled_message`]. Neither stops the session.

use tracing::{debug, error, info, warn};

use crate::casemap::irc_eq;
use crate::client::Client;
use crate::connection::ConnectionHooks;
use crate::error::CantHandleMessage;
use crate::handler::Handler;
use crate::message::ParsedMessage;
use crate::mode::{parse_channel_modes, ChannelMode};
use crate::prefix::parse_user_prefix;
use crate::response::{error_param_names, ErrorParams, Response};
use crate::state::Phase;
use crate::target::{parse_targets, MessageTarget};

type DispatchResult = Result<(), CantHandleMessage>;

/// Dispatches incoming lines to a [`Handler`], keeping the [`Client`]'s
/// state in step.
#[derive(Debug)]
pub struct MessageProcessor<H> {
    client: Client,
    handler: H,
}

impl<H: Handler> MessageProcessor<H> {
    /// Bind `handler` to `client`. Calls [`Handler::handle_client_init`].
    pub fn new(client: Client, mut handler: H) -> Self {
        handler.handle_client_init(&client);
        Self { client, handler }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_parts(self) -> (Client, H) {
        (self.client, self.handler)
    }

    /// Process one complete line received from the server.
    ///
    /// # Panics
    ///
    /// Panics if the client is not connected: lines only come from an
    /// established connection.
    pub fn process(&mut self, line: &str) {
        assert!(
            self.client.is_connected(),
            "processing a line while {}",
            self.client.phase()
        );

        let msg = match ParsedMessage::parse(line) {
            Ok(msg) => msg,
            Err(e) => {
                error!(line, error = %e, "message parsing failed, line discarded");
                return;
            }
        };

        if let Err(e) = self.dispatch(&msg, line) {
            debug!(line, reason = %e.reason, "unhandled message");
            self.handler.handle_unhandled_message(&self.client, line);
        }
    }

    fn dispatch(&mut self, msg: &ParsedMessage<'_>, raw: &str) -> DispatchResult {
        if let Some(code) = msg.numeric() {
            return match code {
                0..=399 => self.process_reply(code, msg, raw),
                400..=599 => self.process_error(code, msg),
                _ => {
                    error!(code, "numeric reply out of range");
                    Err(CantHandleMessage::new(format!("numeric {} out of range", code)))
                }
            };
        }

        match msg.command.to_ascii_uppercase().as_str() {
            "PING" => self.process_ping(msg, raw),
            "PRIVMSG" => self.process_privmsg(msg),
            "JOIN" => self.process_join(msg),
            "PART" => self.process_part(msg),
            "MODE" => self.process_mode(msg),
            "KICK" => self.process_kick(msg),
            other => Err(CantHandleMessage::new(format!("unsupported command {}", other))),
        }
    }

    fn process_reply(&mut self, code: u16, msg: &ParsedMessage<'_>, raw: &str) -> DispatchResult {
        self.handler.handle_response(&self.client, code, raw);

        if code == Response::RPL_WELCOME.code() {
            let nick = msg
                .param(0)
                .filter(|nick| !nick.is_empty())
                .ok_or_else(|| CantHandleMessage::new("welcome reply without nick"))?;
            self.client
                .state_mut()
                .register(msg.prefix, nick)
                .map_err(|e| CantHandleMessage::new(e.to_string()))?;
            info!(nick, server = ?msg.prefix, "registered");
            self.handler.handle_register(&self.client);
        }
        Ok(())
    }

    fn process_error(&mut self, code: u16, msg: &ParsedMessage<'_>) -> DispatchResult {
        // The first parameter is the addressed target.
        let params = msg.params.get(1..).unwrap_or_default();
        let names = error_param_names(code);
        if params.len() != names.len() {
            warn!(
                code,
                expected = names.len(),
                got = params.len(),
                "unexpected number of parameters in error reply"
            );
        }
        let bound = ErrorParams::bind(names, params);
        self.handler.handle_error(&self.client, code, &bound);
        Ok(())
    }

    fn process_ping(&mut self, msg: &ParsedMessage<'_>, raw: &str) -> DispatchResult {
        let server = msg
            .param(0)
            .ok_or_else(|| CantHandleMessage::new("PING without server"))?;
        if msg.params.len() > 1 {
            warn!(line = raw, "unexpected count of parameters in PING");
        }
        self.handler.handle_ping(&self.client, server);
        Ok(())
    }

    fn process_privmsg(&mut self, msg: &ParsedMessage<'_>) -> DispatchResult {
        let &[target_field, text] = msg.params.as_slice() else {
            return Err(CantHandleMessage::new(format!(
                "PRIVMSG with {} parameters",
                msg.params.len()
            )));
        };

        let Some(sender) = msg.prefix.map(|p| parse_user_prefix(p).nick) else {
            return Ok(());
        };
        if sender.is_empty() || self.is_own_nick(sender) {
            return Ok(());
        }

        for target in parse_targets(target_field) {
            if self.is_own_target(&target) {
                self.handler.handle_private_message(&self.client, text, sender);
            } else if let Some(channel) = target.channel() {
                if self.client.is_in_channel(channel) {
                    self.handler
                        .handle_channel_message(&self.client, channel, text, sender);
                }
            }
        }
        Ok(())
    }

    fn process_join(&mut self, msg: &ParsedMessage<'_>) -> DispatchResult {
        let (nick, channel) = membership_params(msg, "JOIN")?;
        if self.is_own_nick(nick) {
            self.client.state_mut().add_channel(channel);
            self.handler.handle_own_join(&self.client, channel);
        } else {
            self.handler.handle_join(&self.client, channel, nick);
        }
        Ok(())
    }

    fn process_part(&mut self, msg: &ParsedMessage<'_>) -> DispatchResult {
        let (nick, channel) = membership_params(msg, "PART")?;
        if self.is_own_nick(nick) {
            self.client.state_mut().remove_channel(channel);
            self.handler.handle_own_part(&self.client, channel);
        } else {
            self.handler
                .handle_part(&self.client, channel, nick, msg.param(1));
        }
        Ok(())
    }

    fn process_mode(&mut self, msg: &ParsedMessage<'_>) -> DispatchResult {
        let target = msg
            .param(0)
            .and_then(|field| parse_targets(field).into_iter().next())
            .ok_or_else(|| CantHandleMessage::new("MODE without target"))?;
        let MessageTarget::Channel(channel) = target else {
            return Err(CantHandleMessage::new(format!(
                "unsupported mode target {}",
                target
            )));
        };
        let initiator = sender_nick(msg, "MODE")?;

        let changes = parse_channel_modes(&msg.params[1..])
            .map_err(|e| CantHandleMessage::new(e.to_string()))?;

        for change in changes {
            let (ChannelMode::Operator | ChannelMode::Voice) = change.mode else {
                continue;
            };
            let Some(nick) = change.arg() else {
                continue;
            };

            if self.is_own_nick(nick) {
                let state = self.client.state_mut();
                match change.mode {
                    ChannelMode::Operator => state.set_operator(&channel, change.added),
                    _ => state.set_voice(&channel, change.added),
                }
            }

            let client = &self.client;
            match (change.mode, change.added) {
                (ChannelMode::Operator, true) => {
                    self.handler.handle_got_op(client, &channel, nick, initiator)
                }
                (ChannelMode::Operator, false) => {
                    self.handler.handle_lost_op(client, &channel, nick, initiator)
                }
                (_, true) => self.handler.handle_got_voice(client, &channel, nick, initiator),
                (_, false) => self.handler.handle_lost_voice(client, &channel, nick, initiator),
            }
        }
        Ok(())
    }

    fn process_kick(&mut self, msg: &ParsedMessage<'_>) -> DispatchResult {
        let (Some(channel), Some(kicked)) = (msg.param(0), msg.param(1)) else {
            return Err(CantHandleMessage::new("KICK without channel and nick"));
        };
        let initiator = sender_nick(msg, "KICK")?;

        if self.is_own_nick(kicked) {
            self.client.state_mut().remove_channel(channel);
        }
        self.handler
            .handle_kick(&self.client, channel, kicked, initiator, msg.param(2));
        Ok(())
    }

    fn is_own_nick(&self, nick: &str) -> bool {
        self.client.nick().is_some_and(|own| irc_eq(own, nick))
    }

    fn is_own_target(&self, target: &MessageTarget) -> bool {
        self.client.nick().is_some_and(|own| target.is_nick(own))
    }
}

/// The nick from the line's prefix.
fn sender_nick<'a>(msg: &ParsedMessage<'a>, command: &str) -> Result<&'a str, CantHandleMessage> {
    msg.prefix
        .map(|prefix| parse_user_prefix(prefix).nick)
        .filter(|nick| !nick.is_empty())
        .ok_or_else(|| CantHandleMessage::new(format!("{} without prefix", command)))
}

/// Sender nick and channel of a JOIN or PART.
fn membership_params<'a>(
    msg: &ParsedMessage<'a>,
    command: &str,
) -> Result<(&'a str, &'a str), CantHandleMessage> {
    let nick = sender_nick(msg, command)?;
    let channel = msg
        .param(0)
        .filter(|channel| !channel.is_empty())
        .ok_or_else(|| CantHandleMessage::new(format!("{} without channel", command)))?;
    Ok((nick, channel))
}

impl<H: Handler> ConnectionHooks for MessageProcessor<H> {
    fn on_connection_established(&mut self) {
        if let Err(e) = self.client.state_mut().transition_phase(Phase::Connected) {
            error!(error = %e, "cannot enter connected phase");
        }
        self.handler.handle_connect(&self.client);
    }

    fn dispatch_incoming(&mut self, line: &str) {
        self.process(line);
    }

    fn on_connection_shutdown(&mut self) {
        if let Err(e) = self.client.state_mut().transition_phase(Phase::Disconnected) {
            error!(error = %e, "cannot enter disconnected phase");
        }
        self.handler.handle_disconnect(&self.client);
    }
}
