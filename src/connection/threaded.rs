//! Two-thread delivery: socket I/O on a transport thread, dispatch on the
//! caller's thread.
//!
//! The threads share exactly two FIFO queues. Outgoing lines travel
//! client→transport through the [`Outbox`]; incoming events travel
//! transport→client as [`TransportEvent`]s and are drained by a repeating
//! [`Task`] into the processor.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tokio::task::LocalSet;
use tracing::{debug, error};

use crate::client::{Client, ClientHandle, Outbox};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::handler::Handler;
use crate::processor::MessageProcessor;
use crate::task::Task;

use super::{current_thread_runtime, guarded, run_link, Connection, ConnectionHooks};

/// An item on the transport→client queue.
#[derive(Clone, Debug, PartialEq, Eq)]
enum TransportEvent {
    Connected,
    Line(String),
    Shutdown,
}

/// Hooks on the transport thread: forward everything to the client.
struct QueueSink {
    tx: UnboundedSender<TransportEvent>,
}

impl QueueSink {
    fn forward(&self, event: TransportEvent) {
        if self.tx.send(event).is_err() {
            debug!("client side gone, dropping transport event");
        }
    }
}

impl ConnectionHooks for QueueSink {
    fn on_connection_established(&mut self) {
        self.forward(TransportEvent::Connected);
    }

    fn dispatch_incoming(&mut self, line: &str) {
        self.forward(TransportEvent::Line(line.to_string()));
    }

    fn on_connection_shutdown(&mut self) {
        self.forward(TransportEvent::Shutdown);
    }
}

struct Worker {
    events: UnboundedReceiver<TransportEvent>,
    thread: JoinHandle<Result<()>>,
}

/// A connection whose socket lives on a dedicated `irc-transport` thread.
///
/// [`start`](Connection::start) spawns the thread and returns immediately;
/// [`wait`](Self::wait) then runs the client side until the connection
/// ends. [`run`](Self::run) does both.
pub struct ThreadedConnection<H> {
    processor: Rc<RefCell<MessageProcessor<H>>>,
    config: Arc<ClientConfig>,
    outbox: Option<Outbox>,
    worker: Option<Worker>,
    handle: ClientHandle,
}

impl<H> fmt::Debug for ThreadedConnection<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadedConnection")
            .field("address", &self.config.address())
            .field("started", &self.outbox.is_none())
            .field("running", &self.worker.is_some())
            .field("terminated", &self.handle.is_terminated())
            .finish()
    }
}

impl<H: Handler + 'static> ThreadedConnection<H> {
    /// Validate `config` and bind `handler` to a new client.
    pub fn new(config: ClientConfig, handler: H) -> Result<Self> {
        config.validate()?;
        let (client, outbox) = Client::new(config);
        let handle = client.handle();
        let config = client.shared_config();
        Ok(Self {
            processor: Rc::new(RefCell::new(MessageProcessor::new(client, handler))),
            config,
            outbox: Some(outbox),
            worker: None,
            handle,
        })
    }

    /// Borrow the processor, e.g. to inspect the handler after `wait`.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a handler callback.
    pub fn processor(&self) -> Ref<'_, MessageProcessor<H>> {
        self.processor.borrow()
    }

    /// Run the client side until the connection shuts down.
    ///
    /// Drains the transport queue every `poll_interval` and dispatches each
    /// event in order. Returns the transport's result, or
    /// [`ClientError::HandlerPanicked`] if a callback panicked, or
    /// [`ClientError::TransportPanicked`] if the transport thread did.
    /// Must not be called from inside a tokio runtime.
    pub fn wait(&mut self) -> Result<()> {
        let worker = self.worker.take().ok_or(ClientError::NotConnected)?;
        let Worker { events, thread } = worker;

        let pump = Rc::new(RefCell::new(Pump {
            processor: Rc::clone(&self.processor),
            events,
            handle: self.handle.clone(),
            established: false,
            finished: false,
            failure: None,
        }));
        let done = Rc::new(Notify::new());
        let poll_interval = self.config.poll_interval();

        let runtime = current_thread_runtime()?;
        let local = LocalSet::new();
        local.block_on(&runtime, {
            let pump = Rc::clone(&pump);
            let done = Rc::clone(&done);
            async move {
                let drain_pump = Rc::clone(&pump);
                let drain_done = Rc::clone(&done);
                let mut drain = Task::new(poll_interval, true, move || {
                    if drain_pump.borrow_mut().drain() {
                        drain_done.notify_one();
                    }
                });
                drain.start();
                done.notified().await;
                drain.stop();
            }
        });

        let transport_result = match thread.join() {
            Ok(result) => result,
            Err(_) => {
                error!("transport thread panicked");
                return Err(ClientError::TransportPanicked);
            }
        };
        if let Some(failure) = pump.borrow_mut().failure.take() {
            return Err(failure);
        }
        transport_result
    }

    /// [`start`](Connection::start) followed by [`wait`](Self::wait).
    pub fn run(&mut self) -> Result<()> {
        self.start()?;
        self.wait()
    }
}

impl<H: Handler + 'static> Connection for ThreadedConnection<H> {
    /// Spawn the transport thread. Fails with
    /// [`ClientError::AlreadyStarted`] on a second call.
    fn start(&mut self) -> Result<()> {
        let mut outbox = self.outbox.take().ok_or(ClientError::AlreadyStarted)?;
        let (tx, events) = mpsc::unbounded_channel();
        let config = Arc::clone(&self.config);

        let thread = thread::Builder::new()
            .name("irc-transport".to_string())
            .spawn(move || -> Result<()> {
                let mut sink = QueueSink { tx };
                let runtime = current_thread_runtime()?;
                runtime.block_on(run_link(&config, &mut sink, &mut outbox))
            })?;

        self.worker = Some(Worker { events, thread });
        Ok(())
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

/// Client-side end of the transport queue.
struct Pump<H> {
    processor: Rc<RefCell<MessageProcessor<H>>>,
    events: UnboundedReceiver<TransportEvent>,
    handle: ClientHandle,
    established: bool,
    finished: bool,
    failure: Option<ClientError>,
}

impl<H: Handler> Pump<H> {
    /// Dispatch every queued event. Returns `true` once the connection is
    /// over and no further events will be dispatched.
    fn drain(&mut self) -> bool {
        while !self.finished {
            match self.events.try_recv() {
                Ok(TransportEvent::Connected) => {
                    self.established = true;
                    let processor = Rc::clone(&self.processor);
                    self.run_hook(|| processor.borrow_mut().on_connection_established());
                }
                Ok(TransportEvent::Line(line)) => {
                    if self.failure.is_some() {
                        debug!(line = %line, "dispatch halted, dropping line");
                        continue;
                    }
                    let processor = Rc::clone(&self.processor);
                    self.run_hook(|| processor.borrow_mut().dispatch_incoming(&line));
                }
                Ok(TransportEvent::Shutdown) => self.finish(),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.finish(),
            }
        }
        self.finished
    }

    fn finish(&mut self) {
        if self.established {
            let processor = Rc::clone(&self.processor);
            self.run_hook(|| processor.borrow_mut().on_connection_shutdown());
        }
        self.finished = true;
    }

    /// Run a processor hook; on panic record the failure and shut the
    /// transport down.
    fn run_hook<F: FnOnce()>(&mut self, hook: F) {
        if let Err(e) = guarded(hook) {
            error!("dispatch failed, terminating connection");
            self.handle.terminate();
            self.failure.get_or_insert(e);
        }
    }
}
