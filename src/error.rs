//! Error types for the IRC client engine.
//!
//! Parse and dispatch errors ([`MessageParseError`], [`CantHandleMessage`])
//! are recovered per line and never abort a session. [`ClientError`] is what
//! callers of the public API see.

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;
use crate::state::Phase;
use crate::transport::TransportReadError;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors surfaced to callers of the client API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The initial connect did not complete within the configured timeout.
    #[error("cannot connect to {address}: timed out after {timeout:?}")]
    ConnectionTimeout {
        /// The `host:port` that was dialed.
        address: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// A message was sent after the connection shut down.
    #[error("not connected")]
    NotConnected,

    /// The operation needs a completed registration.
    #[error("not registered with a server")]
    NotRegistered,

    /// A configuration value or argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `start()` was called on a connection that already ran.
    #[error("connection already started")]
    AlreadyStarted,

    /// A handler callback panicked while a line was dispatched.
    #[error("handler panicked during dispatch")]
    HandlerPanicked,

    /// The transport thread of a threaded connection panicked.
    #[error("transport thread panicked")]
    TransportPanicked,

    /// I/O error while setting up or running the connection.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport failed while reading.
    #[error("transport error: {0}")]
    Transport(#[from] TransportReadError),

    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Wire-level errors raised by the line codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An incoming line exceeded the maximum allowed length.
    #[error("message too long: {0} bytes")]
    MessageTooLong(usize),
}

/// Errors encountered when parsing a protocol line (the malformed-message family).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// The line carried a prefix but no command.
    #[error("missing command in message: {0}")]
    MissingCommand(String),

    /// The line started with `:` but no prefix token followed.
    #[error("invalid prefix in message: {0}")]
    InvalidPrefix(String),

    /// A mode letter lacked its argument, or arguments were left over.
    #[error("invalid mode argument: {0}")]
    InvalidModeArg(String),

    /// Failed to parse a mode string.
    #[error("invalid mode string: {string}")]
    InvalidModeString {
        /// The raw mode string.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: ModeParseError,
    },
}

/// Errors encountered when parsing mode strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModeParseError {
    /// Missing mode modifier (+ or -).
    #[error("missing mode modifier")]
    MissingModeModifier,
}

/// A recognized line that the processor cannot act on.
///
/// Reported to the handler through `handle_unhandled_message`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("can't handle message: {reason}")]
pub struct CantHandleMessage {
    /// Why the line was not processed.
    pub reason: String,
}

impl CantHandleMessage {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Rejected client state transitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    /// The requested phase cannot be reached from the current one.
    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        /// Phase before the attempt.
        from: Phase,
        /// Requested phase.
        to: Phase,
    },
}
