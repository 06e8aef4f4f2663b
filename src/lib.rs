//! # slirc-client
//!
//! An event-driven IRC client engine. It turns the byte stream from a
//! server into typed events, keeps the client's view of its connection,
//! registration and channels, and turns application intents (join, send,
//! change mode, quit) into protocol lines.
//!
//! ## Features
//!
//! - Line, prefix and target parsing for the RFC 2812 client protocol
//! - Authoritative client state with phase-checked transitions
//! - A [`Handler`] trait with one callback per protocol event
//! - Direct (single thread) and threaded (dedicated socket thread) delivery
//! - A small timer primitive, [`Task`], for deferred and periodic work

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ```no_run
//! use slirc_client::{Client, ClientConfig, Handler};
//!
//! struct Greeter;
//!
//! impl Handler for Greeter {
//!     fn handle_connect(&mut self, client: &Client) {
//!         let _ = client.register();
//!     }
//!
//!     fn handle_ping(&mut self, client: &Client, _server: &str) {
//!         let _ = client.pong();
//!     }
//!
//!     fn handle_register(&mut self, client: &Client) {
//!         let _ = client.join(&["#rust"]);
//!     }
//!
//!     fn handle_channel_message(&mut self, client: &Client, channel: &str, text: &str, sender: &str) {
//!         if text == "!hello" {
//!             let _ = client.send_message(channel, &format!("hello, {}", sender));
//!         }
//!     }
//! }
//!
//! let config = ClientConfig::new("irc.libera.chat", "greeter");
//! slirc_client::run(config, Greeter).unwrap();
//! ```
//!
//! ### Parsing lines
//!
//! ```rust
//! use slirc_client::{parse_targets, parse_user_prefix, ParsedMessage};
//!
//! let msg = ParsedMessage::parse(":bob!b@example.org PRIVMSG #a,alice :hi there").unwrap();
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.params, vec!["#a,alice", "hi there"]);
//!
//! let sender = parse_user_prefix(msg.prefix.unwrap());
//! assert_eq!(sender.nick, "bob");
//!
//! let targets = parse_targets(msg.params[0]);
//! assert_eq!(targets[0].channel(), Some("#a"));
//! assert_eq!(targets[1].nick(), Some("alice"));
//! ```

pub mod casemap;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod handler;
pub mod line;
pub mod message;
pub mod mode;
pub mod prefix;
pub mod processor;
pub mod response;
pub mod state;
pub mod target;
pub mod task;
pub mod transport;

pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::client::{Client, ClientHandle, Outbox, Outgoing};
pub use self::config::{ClientConfig, ConfigError, Strategy};
pub use self::connection::{
    drive, run, Connection, ConnectionHooks, DirectConnection, ThreadedConnection,
};
pub use self::error::{
    CantHandleMessage, ClientError, MessageParseError, ModeParseError, ProtocolError, Result,
    StateError,
};
pub use self::handler::Handler;
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::ParsedMessage;
pub use self::mode::{ChannelMode, ModeChange};
pub use self::prefix::{parse_user_prefix, UserPrefix};
pub use self::processor::MessageProcessor;
pub use self::response::{ErrorParams, Response};
pub use self::state::{ClientState, Phase};
pub use self::target::{parse_targets, MessageTarget};
pub use self::task::Task;
pub use self::transport::{Transport, TransportReadError};
