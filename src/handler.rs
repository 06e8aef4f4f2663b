//! Application event callbacks.
//!
//! Implement [`Handler`] and override the events you care about; every
//! method defaults to doing nothing. Each callback receives the [`Client`]
//! so it can read the session state and queue commands, e.g. answering a
//! PING with [`Client::pong`]. State has already been updated when a
//! callback runs.

use crate::client::Client;
use crate::response::ErrorParams;

/// Event callbacks invoked by the message processor.
#[allow(unused_variables)]
pub trait Handler {
    /// Called once when the processor is built, before any connection.
    fn handle_client_init(&mut self, client: &Client) {}

    /// The transport is established.
    fn handle_connect(&mut self, client: &Client) {}

    /// The connection is gone. Always the last event of a connection.
    fn handle_disconnect(&mut self, client: &Client) {}

    /// The server confirmed registration (welcome reply).
    fn handle_register(&mut self, client: &Client) {}

    /// Any numeric reply in `0..=399`, with the raw line.
    fn handle_response(&mut self, client: &Client, code: u16, raw: &str) {}

    /// A numeric error in `400..=599` with its named parameters.
    fn handle_error(&mut self, client: &Client, code: u16, params: &ErrorParams) {}

    fn handle_ping(&mut self, client: &Client, server: &str) {}

    /// A PRIVMSG to a channel the client is in.
    fn handle_channel_message(&mut self, client: &Client, channel: &str, text: &str, sender: &str) {
    }

    /// A PRIVMSG addressed to the client's nick.
    fn handle_private_message(&mut self, client: &Client, text: &str, sender: &str) {}

    /// Someone else joined a channel.
    fn handle_join(&mut self, client: &Client, channel: &str, nick: &str) {}

    /// The client itself joined a channel.
    fn handle_own_join(&mut self, client: &Client, channel: &str) {}

    /// Someone else left a channel.
    fn handle_part(&mut self, client: &Client, channel: &str, nick: &str, message: Option<&str>) {}

    /// The client itself left a channel.
    fn handle_own_part(&mut self, client: &Client, channel: &str) {}

    fn handle_kick(
        &mut self,
        client: &Client,
        channel: &str,
        nick: &str,
        initiator: &str,
        reason: Option<&str>,
    ) {
    }

    fn handle_got_op(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {}

    fn handle_lost_op(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {}

    fn handle_got_voice(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {}

    fn handle_lost_voice(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {}

    /// A line the processor recognized but could not act on.
    fn handle_unhandled_message(&mut self, client: &Client, raw: &str) {}
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle_client_init(&mut self, client: &Client) {
        (**self).handle_client_init(client)
    }
    fn handle_connect(&mut self, client: &Client) {
        (**self).handle_connect(client)
    }
    fn handle_disconnect(&mut self, client: &Client) {
        (**self).handle_disconnect(client)
    }
    fn handle_register(&mut self, client: &Client) {
        (**self).handle_register(client)
    }
    fn handle_response(&mut self, client: &Client, code: u16, raw: &str) {
        (**self).handle_response(client, code, raw)
    }
    fn handle_error(&mut self, client: &Client, code: u16, params: &ErrorParams) {
        (**self).handle_error(client, code, params)
    }
    fn handle_ping(&mut self, client: &Client, server: &str) {
        (**self).handle_ping(client, server)
    }
    fn handle_channel_message(&mut self, client: &Client, channel: &str, text: &str, sender: &str) {
        (**self).handle_channel_message(client, channel, text, sender)
    }
    fn handle_private_message(&mut self, client: &Client, text: &str, sender: &str) {
        (**self).handle_private_message(client, text, sender)
    }
    fn handle_join(&mut self, client: &Client, channel: &str, nick: &str) {
        (**self).handle_join(client, channel, nick)
    }
    fn handle_own_join(&mut self, client: &Client, channel: &str) {
        (**self).handle_own_join(client, channel)
    }
    fn handle_part(&mut self, client: &Client, channel: &str, nick: &str, message: Option<&str>) {
        (**self).handle_part(client, channel, nick, message)
    }
    fn handle_own_part(&mut self, client: &Client, channel: &str) {
        (**self).handle_own_part(client, channel)
    }
    fn handle_kick(
        &mut self,
        client: &Client,
        channel: &str,
        nick: &str,
        initiator: &str,
        reason: Option<&str>,
    ) {
        (**self).handle_kick(client, channel, nick, initiator, reason)
    }
    fn handle_got_op(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {
        (**self).handle_got_op(client, channel, nick, initiator)
    }
    fn handle_lost_op(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {
        (**self).handle_lost_op(client, channel, nick, initiator)
    }
    fn handle_got_voice(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {
        (**self).handle_got_voice(client, channel, nick, initiator)
    }
    fn handle_lost_voice(&mut self, client: &Client, channel: &str, nick: &str, initiator: &str) {
        (**self).handle_lost_voice(client, channel, nick, initiator)
    }
    fn handle_unhandled_message(&mut self, client: &Client, raw: &str) {
        (**self).handle_unhandled_message(client, raw)
    }
}
