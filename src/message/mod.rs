//! Protocol line parsing.
//!
//! A line is split into an optional prefix, a command and its parameters.
//! The parser accepts the practical subset of RFC 2812 that common servers
//! emit; it does not validate nick, channel or host syntax.

mod nom_parser;

pub use self::nom_parser::{parse_message, ParsedMessage};

use crate::error::MessageParseError;

/// Parse one raw protocol line (with or without its CRLF terminator).
///
/// Shorthand for [`ParsedMessage::parse`].
pub fn parse(line: &str) -> Result<ParsedMessage<'_>, MessageParseError> {
    ParsedMessage::parse(line)
}
