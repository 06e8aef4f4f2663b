//! Property-based tests for line, prefix, target and mode parsing.
//!
//! Generates well-formed protocol components and checks that parsing
//! recovers them, and that arbitrary input never makes a parser panic.

use proptest::prelude::*;
use slirc_client::mode::parse_channel_modes;
use slirc_client::{parse_targets, parse_user_prefix, ChannelMode, MessageTarget, ParsedMessage};

// =============================================================================
// STRATEGIES
// =============================================================================

/// Nickname: letter or special first, then letters, digits, `-` or specials.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("~?[a-zA-Z][a-zA-Z0-9]{0,9}").expect("valid regex")
}

fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&+][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

fn command_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[A-Z]{1,12}").expect("valid regex"),
        prop::string::string_regex("[0-9]{3}").expect("valid regex"),
    ]
}

/// A middle parameter: no spaces, never starting with `:`.
fn middle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9#&!@.*,+\\-][a-zA-Z0-9#&!@.*,+:\\-]{0,19}")
        .expect("valid regex")
}

/// Trailing text: anything but CR, LF and NUL, spaces and colons included.
fn trailing_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,200}").expect("valid regex")
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z]+\\.[a-z]+\\.[a-z]+").expect("valid regex"),
        (nickname_strategy(), username_strategy(), hostname_strategy())
            .prop_map(|(nick, user, host)| format!("{}!{}@{}", nick, user, host)),
    ]
}

/// A channel or a plain nick, as it appears in a target list.
fn target_strategy() -> impl Strategy<Value = String> {
    prop_oneof![channel_strategy(), nickname_strategy()]
}

// =============================================================================
// LINE PARSING
// =============================================================================

proptest! {
    #[test]
    fn line_components_are_recovered(
        prefix in prop::option::of(prefix_strategy()),
        command in command_strategy(),
        middles in prop::collection::vec(middle_strategy(), 0..10),
        trailing in prop::option::of(trailing_strategy()),
    ) {
        let mut line = String::new();
        if let Some(prefix) = &prefix {
            line.push(':');
            line.push_str(prefix);
            line.push(' ');
        }
        line.push_str(&command);
        for middle in &middles {
            line.push(' ');
            line.push_str(middle);
        }
        if let Some(trailing) = &trailing {
            line.push_str(" :");
            line.push_str(trailing);
        }

        let msg = ParsedMessage::parse(&line).unwrap();
        prop_assert_eq!(msg.prefix, prefix.as_deref());
        prop_assert_eq!(msg.command, command.as_str());

        let mut expected: Vec<&str> = middles.iter().map(String::as_str).collect();
        if let Some(trailing) = &trailing {
            expected.push(trailing);
        }
        prop_assert_eq!(msg.params, expected);
    }

    #[test]
    fn line_terminator_is_ignored(
        command in command_strategy(),
        trailing in trailing_strategy(),
    ) {
        let bare = format!("{} :{}", command, trailing);
        let terminated = format!("{}\r\n", bare);
        prop_assert_eq!(
            ParsedMessage::parse(&bare).unwrap(),
            ParsedMessage::parse(&terminated).unwrap()
        );
    }

    #[test]
    fn line_parser_never_panics(input in "\\PC{0,600}") {
        if let Ok(msg) = ParsedMessage::parse(&input) {
            prop_assert!(!msg.command.is_empty());
            prop_assert!(!msg.command.contains(' '));
        }
    }
}

// =============================================================================
// PREFIX AND TARGETS
// =============================================================================

proptest! {
    #[test]
    fn user_prefix_is_split(
        nick in nickname_strategy(),
        user in username_strategy(),
        host in hostname_strategy(),
    ) {
        let full = format!("{}!{}@{}", nick, user, host);
        let p = parse_user_prefix(&full);
        prop_assert_eq!(p.nick, nick.as_str());
        prop_assert_eq!(p.user, Some(user.as_str()));
        prop_assert_eq!(p.host, Some(host.as_str()));

        let bare = parse_user_prefix(&nick);
        prop_assert_eq!(bare.nick, nick.as_str());
        prop_assert_eq!(bare.user, None);
        prop_assert_eq!(bare.host, None);
    }

    #[test]
    fn target_list_keeps_order(targets in prop::collection::vec(target_strategy(), 1..8)) {
        let parsed = parse_targets(&targets.join(","));
        prop_assert_eq!(parsed.len(), targets.len());
        for (target, raw) in parsed.iter().zip(&targets) {
            if raw.starts_with(['#', '&', '+']) {
                prop_assert_eq!(target.channel(), Some(raw.as_str()));
            } else {
                prop_assert_eq!(target.nick(), Some(raw.as_str()));
            }
        }
    }

    #[test]
    fn target_display_reproduces_token(token in "[^,\\s]{1,40}") {
        prop_assert_eq!(MessageTarget::parse(&token).to_string(), token);
    }
}

// =============================================================================
// MODES
// =============================================================================

proptest! {
    #[test]
    fn rank_changes_bind_arguments_in_order(
        changes in prop::collection::vec((any::<bool>(), any::<bool>(), nickname_strategy()), 1..6),
    ) {
        let mut modes = String::new();
        let mut args = Vec::new();
        for (added, op, nick) in &changes {
            modes.push(if *added { '+' } else { '-' });
            modes.push(if *op { 'o' } else { 'v' });
            args.push(nick.as_str());
        }
        let mut params = vec![modes.as_str()];
        params.extend(args);

        let parsed = parse_channel_modes(&params).unwrap();
        prop_assert_eq!(parsed.len(), changes.len());
        for (change, (added, op, nick)) in parsed.iter().zip(&changes) {
            prop_assert_eq!(change.added, *added);
            let expected = if *op { ChannelMode::Operator } else { ChannelMode::Voice };
            prop_assert_eq!(&change.mode, &expected);
            prop_assert_eq!(change.arg(), Some(nick.as_str()));
        }
    }
}
