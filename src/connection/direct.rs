//! Single-thread delivery: socket I/O and dispatch on one reactor.

use tokio::task::LocalSet;

use crate::client::{Client, ClientHandle, Outbox};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::handler::Handler;
use crate::processor::MessageProcessor;

use super::{current_thread_runtime, run_link, Connection};

/// A connection whose lines are dispatched straight into the processor on
/// the thread that calls [`start`](Connection::start).
///
/// `start` builds a private current-thread runtime with a
/// [`LocalSet`], so handlers may start [`Task`](crate::task::Task)s. It
/// must not be called from inside another tokio runtime.
#[derive(Debug)]
pub struct DirectConnection<H> {
    processor: MessageProcessor<H>,
    outbox: Option<Outbox>,
    handle: ClientHandle,
}

impl<H: Handler> DirectConnection<H> {
    /// Validate `config` and bind `handler` to a new client.
    pub fn new(config: ClientConfig, handler: H) -> Result<Self> {
        config.validate()?;
        let (client, outbox) = Client::new(config);
        let handle = client.handle();
        Ok(Self {
            processor: MessageProcessor::new(client, handler),
            outbox: Some(outbox),
            handle,
        })
    }

    pub fn processor(&self) -> &MessageProcessor<H> {
        &self.processor
    }

    pub fn client(&self) -> &Client {
        self.processor.client()
    }

    pub fn handler(&self) -> &H {
        self.processor.handler()
    }

    pub fn into_handler(self) -> H {
        self.processor.into_parts().1
    }
}

impl<H: Handler> Connection for DirectConnection<H> {
    /// Connect and run until the connection ends. A connection can only be
    /// started once; later calls fail with [`ClientError::AlreadyStarted`].
    fn start(&mut self) -> Result<()> {
        let mut outbox = self.outbox.take().ok_or(ClientError::AlreadyStarted)?;
        let config = self.processor.client().shared_config();
        let runtime = current_thread_runtime()?;
        let local = LocalSet::new();
        local.block_on(&runtime, run_link(&config, &mut self.processor, &mut outbox))
    }

    fn terminate(&self) {
        self.handle.terminate();
    }

    fn send_message(&self, line: &str) -> Result<()> {
        self.handle.send_message(line)
    }

    fn handle(&self) -> ClientHandle {
        self.handle.clone()
    }
}
