//! Fuzz target for message dispatch
//!
//! Runs arbitrary lines through a registered client's processor. Dispatch
//! must never panic, whatever the line claims.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_client::{Client, ClientConfig, ConnectionHooks, Handler, MessageProcessor};

struct Quiet;

impl Handler for Quiet {}

fuzz_target!(|data: &[u8]| {
    let (client, _outbox) = Client::new(ClientConfig::new("irc.example.net", "fuzzer"));
    let mut processor = MessageProcessor::new(client, Quiet);
    processor.on_connection_established();
    processor.process(":irc.example.net 001 fuzzer :Welcome");
    processor.process(":fuzzer!f@host JOIN #fuzz");

    for line in String::from_utf8_lossy(data).lines() {
        processor.process(line);
    }
});
