//! Channel mode parsing.

use tracing::warn;

use crate::error::{MessageParseError, ModeParseError};

use super::types::{ChannelMode, ModeChange};

/// Parse the parameters of a channel MODE line (everything after the
/// channel) into atomic changes.
///
/// The first piece is the mode string, the rest are arguments consumed in
/// order by the letters that take one. A `+` or `-` applies to every letter
/// after it up to the next sign. Rank flags such as `q` and `a` take an
/// argument only when more arguments remain than the letters after them
/// require. Arguments nobody consumed are logged and ignored.
pub fn parse_channel_modes(pieces: &[&str]) -> Result<Vec<ModeChange>, MessageParseError> {
    let Some((first, args)) = pieces.split_first() else {
        return Ok(vec![]);
    };

    let letters = mode_letters(first)?;

    // required[i]: arguments needed by the letters after position i
    let mut required = vec![0; letters.len()];
    let mut needed = 0;
    for (i, &(added, mode)) in letters.iter().enumerate().rev() {
        required[i] = needed;
        if mode.takes_arg(added) {
            needed += 1;
        }
    }

    let mut res = Vec::with_capacity(letters.len());
    let mut next = 0;
    for (i, &(added, mode)) in letters.iter().enumerate() {
        let mut params = Vec::new();
        let remaining = args.len() - next;
        if mode.takes_arg(added) {
            match args.get(next) {
                Some(arg) => {
                    params.push(arg.to_string());
                    next += 1;
                }
                None if mode.is_list_mode() => {}
                None => {
                    return Err(MessageParseError::InvalidModeArg(format!(
                        "mode '{}' requires an argument but none provided",
                        mode
                    )));
                }
            }
        } else if mode.may_take_arg() && remaining > required[i] {
            params.push(args[next].to_string());
            next += 1;
        }
        res.push(ModeChange {
            added,
            mode,
            params,
        });
    }

    if next < args.len() {
        warn!(
            modes = %first,
            unused = ?&args[next..],
            "ignoring unused mode arguments"
        );
    }

    Ok(res)
}

/// Expand a mode string into `(added, mode)` pairs.
fn mode_letters(modes: &str) -> Result<Vec<(bool, ChannelMode)>, MessageParseError> {
    let mut chars = modes.chars();
    let mut added = match chars.next() {
        Some('+') => true,
        Some('-') => false,
        Some(_) => {
            return Err(MessageParseError::InvalidModeString {
                string: modes.to_string(),
                cause: ModeParseError::MissingModeModifier,
            })
        }
        None => return Ok(vec![]),
    };

    let mut letters = vec![];
    for c in chars {
        match c {
            '+' => added = true,
            '-' => added = false,
            _ => letters.push((added, ChannelMode::from_char(c))),
        }
    }
    Ok(letters)
}
