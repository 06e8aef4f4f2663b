//! Fuzz target for line, prefix, target and mode parsing
//!
//! Feeds arbitrary UTF-8 through every parser a received line passes
//! through and checks that none of them panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_client::mode::parse_channel_modes;
use slirc_client::{parse_targets, parse_user_prefix, ParsedMessage};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };
    if input.is_empty() || input.len() > 8191 {
        return;
    }

    let Ok(msg) = ParsedMessage::parse(input) else {
        return;
    };
    if let Some(prefix) = msg.prefix {
        let _ = parse_user_prefix(prefix);
    }
    if let Some(first) = msg.param(0) {
        for target in parse_targets(first) {
            let _ = target.to_string();
        }
    }
    if msg.params.len() > 1 {
        let _ = parse_channel_modes(&msg.params[1..]);
    }
});
