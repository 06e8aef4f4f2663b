//! A bot that echoes every message it can see.
//!
//! ```text
//! cargo run --example echo_bot -- [config.toml]
//! ```
//!
//! Without a config file it connects to `irc.libera.chat` as `slirc-echo`
//! and joins `#slirc-test`. Send it `!quit` in private to make it leave.

use anyhow::Context;
use slirc_client::{Client, ClientConfig, ErrorParams, Handler};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

struct EchoBot;

fn log_failure(action: &str, result: slirc_client::Result<()>) {
    if let Err(e) = result {
        warn!(action, error = %e, "command failed");
    }
}

impl Handler for EchoBot {
    fn handle_connect(&mut self, client: &Client) {
        log_failure("register", client.register());
    }

    fn handle_register(&mut self, client: &Client) {
        let channels = &client.config().channels;
        info!(nick = ?client.nick(), ?channels, "registered");
        if !channels.is_empty() {
            log_failure("join", client.join(channels.as_slice()));
        }
    }

    fn handle_ping(&mut self, client: &Client, _server: &str) {
        log_failure("pong", client.pong());
    }

    fn handle_own_join(&mut self, _client: &Client, channel: &str) {
        info!(channel, "joined");
    }

    fn handle_channel_message(&mut self, client: &Client, channel: &str, text: &str, sender: &str) {
        log_failure(
            "echo",
            client.send_message(channel, &format!("{}: {}", sender, text)),
        );
    }

    fn handle_private_message(&mut self, client: &Client, text: &str, sender: &str) {
        if text == "!quit" {
            info!(sender, "asked to quit");
            log_failure("quit", client.quit(Some("echo bot signing off")));
            return;
        }
        log_failure("echo", client.send_message(sender, text));
    }

    fn handle_error(&mut self, _client: &Client, code: u16, params: &ErrorParams) {
        warn!(code, reason = ?params.message(), "server error");
    }

    fn handle_disconnect(&mut self, _client: &Client) {
        info!("disconnected");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => {
            let mut config = ClientConfig::new("irc.libera.chat", "slirc-echo");
            config.channels = vec!["#slirc-test".to_string()];
            config
        }
    };

    info!(address = %config.address(), strategy = ?config.strategy, "starting echo bot");
    slirc_client::run(config, EchoBot).map_err(|e| {
        error!(error = %e, "connection ended with an error");
        e
    })?;
    Ok(())
}
