//! Nom-based protocol line parser.
//!
//! Produces [`ParsedMessage`] values that borrow from the input line.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    error::{context, VerboseError, VerboseErrorKind},
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

const PREFIX_CONTEXT: &str = "parsing message prefix";

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Parse message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        PREFIX_CONTEXT,
        preceded(char(':'), take_while1(|c: char| !is_space(c))),
    )(input)
}

/// Parse the command token (a command name or a three digit numeric).
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context("parsing command", take_while1(|c: char| !is_space(c)))(input)
}

/// Parse a complete protocol line into its components.
///
/// Line format:
/// ```text
/// [:prefix] <command> [middle...] [:trailing]
/// ```
///
/// The trailing parameter starts at the first parameter token that begins
/// with `:` and runs to the end of the line, whitespace included.
pub fn parse_message(input: &str) -> ParseResult<&str, ParsedMessage<'_>> {
    let (input, prefix) = if input.starts_with(':') {
        let (input, prefix) = parse_prefix(input)?;
        (input, Some(prefix))
    } else {
        (input, None)
    };
    let (input, _) = space0::<_, VerboseError<&str>>(input)?;

    let (input, command) = parse_command(input)?;

    let mut params: Vec<&str> = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(is_space);
        if rest.is_empty() {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            rest = "";
            break;
        }

        let end = rest.find(is_space).unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    Ok((
        rest,
        ParsedMessage {
            prefix,
            command,
            params,
        },
    ))
}

/// A parsed protocol line with borrowed string slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage<'a> {
    /// Prefix without the leading `:`, if present.
    pub prefix: Option<&'a str>,
    /// The command name or three digit numeric code. Never empty.
    pub command: &'a str,
    /// Middle parameters followed by the trailing parameter, if any.
    pub params: Vec<&'a str>,
}

impl<'a> ParsedMessage<'a> {
    /// Parse a protocol line into a `ParsedMessage`.
    ///
    /// A trailing CRLF is ignored. Fails on an empty line and on a line that
    /// has a prefix but no command.
    pub fn parse(input: &'a str) -> Result<Self, MessageParseError> {
        let trimmed = input.trim_end_matches(['\r', '\n']);
        if trimmed.trim_start_matches(is_space).is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        match parse_message(trimmed) {
            Ok((_rest, msg)) => Ok(msg),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let in_prefix = e
                    .errors
                    .iter()
                    .any(|(_, kind)| matches!(kind, VerboseErrorKind::Context(ctx) if *ctx == PREFIX_CONTEXT));
                if in_prefix {
                    Err(MessageParseError::InvalidPrefix(trimmed.to_string()))
                } else {
                    Err(MessageParseError::MissingCommand(trimmed.to_string()))
                }
            }
            Err(nom::Err::Incomplete(_)) => {
                Err(MessageParseError::MissingCommand(trimmed.to_string()))
            }
        }
    }

    /// The numeric code, if the command is exactly three decimal digits.
    pub fn numeric(&self) -> Option<u16> {
        let bytes = self.command.as_bytes();
        if bytes.len() == 3 && bytes.iter().all(u8::is_ascii_digit) {
            self.command.parse().ok()
        } else {
            None
        }
    }

    /// The parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }
}
