//! Integration tests for message dispatch.
//!
//! Each test feeds raw lines to a connected `MessageProcessor` and checks
//! the handler events it produced and the client state it left behind.

use slirc_client::{
    Client, ClientConfig, ConnectionHooks, ErrorParams, Handler, MessageProcessor, Outbox,
    Outgoing, Phase,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Init,
    Connect,
    Disconnect,
    Register,
    Response(u16, String),
    Error(u16, Vec<(String, String)>),
    Ping(String),
    ChannelMessage(String, String, String),
    PrivateMessage(String, String),
    Join(String, String),
    OwnJoin(String),
    Part(String, String, Option<String>),
    OwnPart(String),
    Kick(String, String, String, Option<String>),
    GotOp(String, String, String),
    LostOp(String, String, String),
    GotVoice(String, String, String),
    LostVoice(String, String, String),
    Unhandled(String),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

fn s(v: &str) -> String {
    v.to_string()
}

impl Handler for Recorder {
    fn handle_client_init(&mut self, _client: &Client) {
        self.events.push(Event::Init);
    }
    fn handle_connect(&mut self, _client: &Client) {
        self.events.push(Event::Connect);
    }
    fn handle_disconnect(&mut self, _client: &Client) {
        self.events.push(Event::Disconnect);
    }
    fn handle_register(&mut self, _client: &Client) {
        self.events.push(Event::Register);
    }
    fn handle_response(&mut self, _client: &Client, code: u16, raw: &str) {
        self.events.push(Event::Response(code, s(raw)));
    }
    fn handle_error(&mut self, _client: &Client, code: u16, params: &ErrorParams) {
        let params = params.iter().map(|(k, v)| (s(k), s(v))).collect();
        self.events.push(Event::Error(code, params));
    }
    fn handle_ping(&mut self, client: &Client, server: &str) {
        self.events.push(Event::Ping(s(server)));
        let _ = client.pong();
    }
    fn handle_channel_message(&mut self, _client: &Client, channel: &str, text: &str, sender: &str) {
        self.events
            .push(Event::ChannelMessage(s(channel), s(text), s(sender)));
    }
    fn handle_private_message(&mut self, _client: &Client, text: &str, sender: &str) {
        self.events.push(Event::PrivateMessage(s(text), s(sender)));
    }
    fn handle_join(&mut self, _client: &Client, channel: &str, nick: &str) {
        self.events.push(Event::Join(s(channel), s(nick)));
    }
    fn handle_own_join(&mut self, _client: &Client, channel: &str) {
        self.events.push(Event::OwnJoin(s(channel)));
    }
    fn handle_part(&mut self, _client: &Client, channel: &str, nick: &str, message: Option<&str>) {
        self.events
            .push(Event::Part(s(channel), s(nick), message.map(s)));
    }
    fn handle_own_part(&mut self, _client: &Client, channel: &str) {
        self.events.push(Event::OwnPart(s(channel)));
    }
    fn handle_kick(
        &mut self,
        _client: &Client,
        channel: &str,
        nick: &str,
        initiator: &str,
        reason: Option<&str>,
    ) {
        self.events
            .push(Event::Kick(s(channel), s(nick), s(initiator), reason.map(s)));
    }
    fn handle_got_op(&mut self, _client: &Client, channel: &str, nick: &str, initiator: &str) {
        self.events
            .push(Event::GotOp(s(channel), s(nick), s(initiator)));
    }
    fn handle_lost_op(&mut self, _client: &Client, channel: &str, nick: &str, initiator: &str) {
        self.events
            .push(Event::LostOp(s(channel), s(nick), s(initiator)));
    }
    fn handle_got_voice(&mut self, _client: &Client, channel: &str, nick: &str, initiator: &str) {
        self.events
            .push(Event::GotVoice(s(channel), s(nick), s(initiator)));
    }
    fn handle_lost_voice(&mut self, _client: &Client, channel: &str, nick: &str, initiator: &str) {
        self.events
            .push(Event::LostVoice(s(channel), s(nick), s(initiator)));
    }
    fn handle_unhandled_message(&mut self, _client: &Client, raw: &str) {
        self.events.push(Event::Unhandled(s(raw)));
    }
}

struct Harness {
    processor: MessageProcessor<Recorder>,
    outbox: Outbox,
}

impl Harness {
    /// A processor whose connection was just established.
    fn connected() -> Self {
        let (client, outbox) = Client::new(ClientConfig::new("irc.example.net", "alice"));
        let mut processor = MessageProcessor::new(client, Recorder::default());
        processor.on_connection_established();
        Self { processor, outbox }
    }

    /// Connected, registered as `alice` and in `#chan`.
    fn in_channel() -> Self {
        let mut h = Self::connected();
        h.feed(":irc.example.net 001 alice :Welcome");
        h.feed(":alice!a@host JOIN #chan");
        h.take_events();
        h
    }

    fn feed(&mut self, line: &str) {
        self.processor.process(line);
    }

    fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.processor.handler_mut().events)
    }

    fn client(&self) -> &Client {
        self.processor.client()
    }

    fn sent(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.outbox.try_recv())
            .filter_map(|item| match item {
                Outgoing::Line(line) => Some(line),
                Outgoing::Shutdown => None,
            })
            .collect()
    }
}

#[test]
fn test_init_then_connect() {
    let mut h = Harness::connected();
    assert_eq!(h.take_events(), vec![Event::Init, Event::Connect]);
    assert_eq!(h.client().phase(), Phase::Connected);
}

#[test]
fn test_welcome_registers() {
    let mut h = Harness::connected();
    h.take_events();

    let raw = ":irc.example.net 001 alice :Welcome";
    h.feed(raw);

    assert_eq!(
        h.take_events(),
        vec![Event::Response(1, s(raw)), Event::Register]
    );
    assert_eq!(h.client().phase(), Phase::Registered);
    assert_eq!(h.client().nick(), Some("alice"));
    assert_eq!(h.client().server(), Some("irc.example.net"));
}

#[test]
fn test_other_replies_only_respond() {
    let mut h = Harness::connected();
    h.take_events();
    h.feed(":irc.example.net 375 alice :- Message of the day -");
    h.feed(":irc.example.net 000 alice :zero");
    assert_eq!(
        h.take_events(),
        vec![
            Event::Response(375, s(":irc.example.net 375 alice :- Message of the day -")),
            Event::Response(0, s(":irc.example.net 000 alice :zero")),
        ]
    );
    assert_eq!(h.client().phase(), Phase::Connected);
}

#[test]
fn test_numeric_out_of_range_is_unhandled() {
    let mut h = Harness::connected();
    h.take_events();
    h.feed(":irc.example.net 900 alice :logged in");
    assert_eq!(
        h.take_events(),
        vec![Event::Unhandled(s(":irc.example.net 900 alice :logged in"))]
    );
}

#[test]
fn test_error_binds_named_params() {
    let mut h = Harness::connected();
    h.take_events();
    h.feed(":irc.example.net 433 * alice :Nickname is already in use");
    assert_eq!(
        h.take_events(),
        vec![Event::Error(
            433,
            vec![
                (s("nick"), s("alice")),
                (s("message"), s("Nickname is already in use")),
            ]
        )]
    );
}

#[test]
fn test_error_with_missing_param_degrades() {
    let mut h = Harness::connected();
    h.take_events();
    h.feed(":irc.example.net 433 * :Nickname is already in use");
    assert_eq!(
        h.take_events(),
        vec![Event::Error(
            433,
            vec![
                (s("nick"), s("")),
                (s("message"), s("Nickname is already in use")),
            ]
        )]
    );
}

#[test]
fn test_unknown_error_code_keeps_message() {
    let mut h = Harness::connected();
    h.take_events();
    h.feed(":irc.example.net 599 alice a b :c d");
    assert_eq!(
        h.take_events(),
        vec![Event::Error(599, vec![(s("message"), s("a b c d"))])]
    );
}

#[test]
fn test_ping_answered_from_handler() {
    let mut h = Harness::in_channel();
    h.feed("PING :irc.example.net");
    assert_eq!(h.take_events(), vec![Event::Ping(s("irc.example.net"))]);
    assert_eq!(h.sent(), vec![s("PONG :irc.example.net")]);
}

#[test]
fn test_ping_without_server_is_unhandled() {
    let mut h = Harness::connected();
    h.take_events();
    h.feed("PING");
    assert_eq!(h.take_events(), vec![Event::Unhandled(s("PING"))]);
}

#[test]
fn test_channel_message() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h PRIVMSG #chan :hi");
    assert_eq!(
        h.take_events(),
        vec![Event::ChannelMessage(s("#chan"), s("hi"), s("bob"))]
    );
}

#[test]
fn test_channel_message_case_insensitive_membership() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h PRIVMSG #CHAN :hi");
    assert_eq!(
        h.take_events(),
        vec![Event::ChannelMessage(s("#CHAN"), s("hi"), s("bob"))]
    );
}

#[test]
fn test_private_message() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h PRIVMSG Alice :psst");
    assert_eq!(
        h.take_events(),
        vec![Event::PrivateMessage(s("psst"), s("bob"))]
    );
}

#[test]
fn test_multi_target_message() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h PRIVMSG #chan,#other,alice,carol :all of you");
    assert_eq!(
        h.take_events(),
        vec![
            Event::ChannelMessage(s("#chan"), s("all of you"), s("bob")),
            Event::PrivateMessage(s("all of you"), s("bob")),
        ]
    );
}

#[test]
fn test_own_messages_are_not_echoed() {
    let mut h = Harness::in_channel();
    h.feed(":alice!a@host PRIVMSG #chan :my own words");
    h.feed(":ALICE PRIVMSG alice :note to self");
    assert!(h.take_events().is_empty());
}

#[test]
fn test_privmsg_without_prefix_is_ignored() {
    let mut h = Harness::in_channel();
    h.feed("PRIVMSG #chan :anonymous");
    assert!(h.take_events().is_empty());
}

#[test]
fn test_privmsg_param_count() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h PRIVMSG #chan");
    h.feed(":bob!b@h PRIVMSG #chan extra :text");
    assert_eq!(
        h.take_events(),
        vec![
            Event::Unhandled(s(":bob!b@h PRIVMSG #chan")),
            Event::Unhandled(s(":bob!b@h PRIVMSG #chan extra :text")),
        ]
    );
}

#[test]
fn test_own_join_is_idempotent() {
    let mut h = Harness::connected();
    h.feed(":irc.example.net 001 alice :Welcome");
    h.take_events();

    h.feed(":alice!a@host JOIN #chan");
    h.feed(":alice!a@host JOIN #chan");
    assert_eq!(
        h.take_events(),
        vec![Event::OwnJoin(s("#chan")), Event::OwnJoin(s("#chan"))]
    );
    assert_eq!(h.client().channels().collect::<Vec<_>>(), vec!["#chan"]);
}

#[test]
fn test_other_join_keeps_no_state() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h JOIN :#chan");
    h.feed(":bob!b@h JOIN #elsewhere");
    assert_eq!(
        h.take_events(),
        vec![
            Event::Join(s("#chan"), s("bob")),
            Event::Join(s("#elsewhere"), s("bob")),
        ]
    );
    assert!(!h.client().is_in_channel("#elsewhere"));
}

#[test]
fn test_join_without_prefix_is_unhandled() {
    let mut h = Harness::in_channel();
    h.feed("JOIN #chan");
    assert_eq!(h.take_events(), vec![Event::Unhandled(s("JOIN #chan"))]);
}

#[test]
fn test_part() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h PART #chan :see you");
    h.feed(":bob!b@h PART #chan");
    h.feed(":alice!a@host PART #chan");
    h.feed(":alice!a@host PART #never-joined");
    assert_eq!(
        h.take_events(),
        vec![
            Event::Part(s("#chan"), s("bob"), Some(s("see you"))),
            Event::Part(s("#chan"), s("bob"), None),
            Event::OwnPart(s("#chan")),
            Event::OwnPart(s("#never-joined")),
        ]
    );
    assert!(!h.client().is_in_channel("#chan"));
}

#[test]
fn test_op_for_own_nick_updates_state() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +o alice");
    assert_eq!(
        h.take_events(),
        vec![Event::GotOp(s("#chan"), s("alice"), s("bob"))]
    );
    assert!(h.client().is_operator_in("#chan"));

    h.feed(":bob!b@h MODE #chan -o alice");
    assert_eq!(
        h.take_events(),
        vec![Event::LostOp(s("#chan"), s("alice"), s("bob"))]
    );
    assert!(!h.client().is_operator_in("#chan"));
}

#[test]
fn test_op_for_other_nick_only_notifies() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +o carol");
    assert_eq!(
        h.take_events(),
        vec![Event::GotOp(s("#chan"), s("carol"), s("bob"))]
    );
    assert!(!h.client().is_operator_in("#chan"));
}

#[test]
fn test_combined_mode_changes() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +vm-o+l alice carol 10");
    assert_eq!(
        h.take_events(),
        vec![
            Event::GotVoice(s("#chan"), s("alice"), s("bob")),
            Event::LostOp(s("#chan"), s("carol"), s("bob")),
        ]
    );
    assert!(h.client().has_voice_in("#chan"));

    h.feed(":bob!b@h MODE #chan -v alice");
    assert_eq!(
        h.take_events(),
        vec![Event::LostVoice(s("#chan"), s("alice"), s("bob"))]
    );
    assert!(!h.client().has_voice_in("#chan"));
}

#[test]
fn test_halfop_alongside_op() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +ho carol alice");
    assert_eq!(
        h.take_events(),
        vec![Event::GotOp(s("#chan"), s("alice"), s("bob"))]
    );
    assert!(h.client().is_operator_in("#chan"));
}

#[test]
fn test_halfop_alongside_voice() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +hv carol alice");
    assert_eq!(
        h.take_events(),
        vec![Event::GotVoice(s("#chan"), s("alice"), s("bob"))]
    );
    assert!(h.client().has_voice_in("#chan"));
}

#[test]
fn test_owner_rank_alongside_op() {
    let mut h = Harness::in_channel();
    h.feed(":ChanServ!s@services MODE #chan +qo alice alice");
    assert_eq!(
        h.take_events(),
        vec![Event::GotOp(s("#chan"), s("alice"), s("ChanServ"))]
    );
    assert!(h.client().is_operator_in("#chan"));
}

#[test]
fn test_unknown_mode_with_argument_keeps_rank_changes() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +vY alice extra");
    assert_eq!(
        h.take_events(),
        vec![Event::GotVoice(s("#chan"), s("alice"), s("bob"))]
    );
    assert!(h.client().has_voice_in("#chan"));
}

#[test]
fn test_user_mode_is_unhandled() {
    let mut h = Harness::in_channel();
    h.feed(":alice MODE alice :+i");
    assert_eq!(h.take_events(), vec![Event::Unhandled(s(":alice MODE alice :+i"))]);
}

#[test]
fn test_malformed_mode_is_unhandled() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +o");
    h.feed(":bob!b@h MODE #chan o alice");
    assert_eq!(
        h.take_events(),
        vec![
            Event::Unhandled(s(":bob!b@h MODE #chan +o")),
            Event::Unhandled(s(":bob!b@h MODE #chan o alice")),
        ]
    );
    assert!(!h.client().is_operator_in("#chan"));
}

#[test]
fn test_kick_of_other_member_keeps_channel() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h KICK #chan carol :behave");
    assert_eq!(
        h.take_events(),
        vec![Event::Kick(s("#chan"), s("carol"), s("bob"), Some(s("behave")))]
    );
    assert!(h.client().is_in_channel("#chan"));
}

#[test]
fn test_kick_of_self_leaves_channel() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h MODE #chan +o alice");
    h.take_events();

    h.feed(":bob!b@h KICK #chan alice");
    assert_eq!(
        h.take_events(),
        vec![Event::Kick(s("#chan"), s("alice"), s("bob"), None)]
    );
    assert!(!h.client().is_in_channel("#chan"));
    assert!(!h.client().is_operator_in("#chan"));
}

#[test]
fn test_short_kick_is_unhandled() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h KICK #chan");
    assert_eq!(
        h.take_events(),
        vec![Event::Unhandled(s(":bob!b@h KICK #chan"))]
    );
    assert!(h.client().is_in_channel("#chan"));
}

#[test]
fn test_unsupported_command_is_unhandled() {
    let mut h = Harness::in_channel();
    h.feed(":bob!b@h NOTICE alice :hey");
    assert_eq!(
        h.take_events(),
        vec![Event::Unhandled(s(":bob!b@h NOTICE alice :hey"))]
    );
}

#[test]
fn test_malformed_line_is_dropped_and_processing_continues() {
    let mut h = Harness::in_channel();
    h.feed(":dangling.prefix");
    h.feed("");
    h.feed(":bob!b@h PRIVMSG #chan :still here");
    assert_eq!(
        h.take_events(),
        vec![Event::ChannelMessage(s("#chan"), s("still here"), s("bob"))]
    );
}

#[test]
fn test_shutdown_resets_and_notifies() {
    let mut h = Harness::in_channel();
    h.processor.on_connection_shutdown();
    assert_eq!(h.take_events(), vec![Event::Disconnect]);
    assert_eq!(h.client().phase(), Phase::Disconnected);
    assert!(h.client().nick().is_none());
    assert!(h.client().server().is_none());
    assert_eq!(h.client().channels().count(), 0);
}
