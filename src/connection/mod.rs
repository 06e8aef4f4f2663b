//! Connection lifecycle and delivery strategies.
//!
//! Both strategies share one async link loop, [`drive`], which frames the
//! byte stream into lines, hands each line to a [`ConnectionHooks`]
//! implementation in arrival order and writes queued outgoing lines. They
//! differ in where the hooks run:
//!
//! - [`DirectConnection`]: the hooks are the message processor itself, on
//!   the thread that called [`Connection::start`].
//! - [`ThreadedConnection`]: socket I/O runs on a dedicated thread and the
//!   hooks forward events over a queue to the processor on the caller's
//!   thread.

mod direct;
mod threaded;

pub use self::direct::DirectConnection;
pub use self::threaded::ThreadedConnection;

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, info_span, Instrument};

use crate::client::{ClientHandle, Outbox, Outgoing};
use crate::config::{ClientConfig, Strategy};
use crate::error::{ClientError, Result};
use crate::handler::Handler;
use crate::transport::{Transport, TransportReadError};

/// Lifecycle events a connection delivers.
///
/// For every established connection `on_connection_established` comes
/// first, then zero or more `dispatch_incoming` calls in wire order, then
/// exactly one `on_connection_shutdown`.
pub trait ConnectionHooks {
    fn on_connection_established(&mut self);

    /// One complete line, terminator removed.
    fn dispatch_incoming(&mut self, line: &str);

    fn on_connection_shutdown(&mut self);
}

/// Public surface shared by the delivery strategies.
pub trait Connection {
    /// Connect and begin operating. Whether this blocks until the
    /// connection ends depends on the strategy.
    fn start(&mut self) -> Result<()>;

    /// Shut down after lines already queued are written. Idempotent, and
    /// safe to call from inside a handler callback.
    fn terminate(&self);

    /// Queue one line; `\r\n` is appended on the wire. Fails with
    /// [`ClientError::NotConnected`] after termination.
    fn send_message(&self, line: &str) -> Result<()>;

    /// A thread-safe sender for this connection.
    fn handle(&self) -> ClientHandle;
}

/// Run the link loop over an established transport.
///
/// Calls `on_connection_established` before reading, then alternates
/// between writing queued lines (first) and dispatching received ones until
/// the peer closes, [`Outgoing::Shutdown`] is dequeued, the transport fails
/// or a hook panics. Afterwards the outbox is closed so later sends fail,
/// and `on_connection_shutdown` runs exactly once.
pub async fn drive<S, K>(
    transport: &mut Transport<S>,
    hooks: &mut K,
    outbox: &mut Outbox,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    K: ConnectionHooks + ?Sized,
{
    let result = match guarded(|| hooks.on_connection_established()) {
        Ok(()) => link_loop(transport, hooks, outbox).await,
        Err(e) => Err(e),
    };

    outbox.close();
    if let Err(e) = transport.close().await {
        debug!(error = %e, "error while closing transport");
    }
    if guarded(|| hooks.on_connection_shutdown()).is_err() && result.is_ok() {
        return Err(ClientError::HandlerPanicked);
    }
    result
}

async fn link_loop<S, K>(
    transport: &mut Transport<S>,
    hooks: &mut K,
    outbox: &mut Outbox,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    K: ConnectionHooks + ?Sized,
{
    loop {
        tokio::select! {
            biased;

            item = outbox.recv() => match item {
                Some(Outgoing::Line(line)) => {
                    debug!(line = %line, "sending");
                    if let Err(e) = transport.write_line(line).await {
                        error!(error = %e, "write failed");
                        return Err(ClientError::Transport(TransportReadError::from(e)));
                    }
                }
                Some(Outgoing::Shutdown) | None => {
                    info!("terminating connection");
                    return Ok(());
                }
            },

            read = transport.read_line() => match read {
                Ok(Some(line)) => {
                    debug!(line = %line, "received");
                    if guarded(|| hooks.dispatch_incoming(&line)).is_err() {
                        error!(line = %line, "dispatch failed, closing connection");
                        return Err(ClientError::HandlerPanicked);
                    }
                }
                Ok(None) => {
                    info!("connection closed by peer");
                    return Ok(());
                }
                Err(e) => {
                    error!(error = %e, "read failed");
                    return Err(e.into());
                }
            },
        }
    }
}

/// Run a hook, turning a panic into [`ClientError::HandlerPanicked`].
pub(crate) fn guarded<F: FnOnce()>(f: F) -> Result<()> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| {
        error!("handler panicked");
        ClientError::HandlerPanicked
    })
}

/// Connect to the configured server and drive the link.
///
/// On a failed connect the outbox is closed and no hook is called.
pub(crate) async fn run_link<K>(
    config: &ClientConfig,
    hooks: &mut K,
    outbox: &mut Outbox,
) -> Result<()>
where
    K: ConnectionHooks + ?Sized,
{
    link_after(config, Transport::connect(config), hooks, outbox).await
}

/// Await the dialing future `connect`, then drive the link it yields.
async fn link_after<S, C, K>(
    config: &ClientConfig,
    connect: C,
    hooks: &mut K,
    outbox: &mut Outbox,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Future<Output = Result<Transport<S>>>,
    K: ConnectionHooks + ?Sized,
{
    let span = info_span!("irc.link", address = %config.address());
    async move {
        let mut transport = match connect.await {
            Ok(transport) => transport,
            Err(e) => {
                error!(error = %e, "connect failed");
                outbox.close();
                return Err(e);
            }
        };
        info!("connected");
        drive(&mut transport, hooks, outbox).await
    }
    .instrument(span)
    .await
}

/// Run `handler` with the strategy named in `config`, blocking until the
/// connection ends.
pub fn run<H>(config: ClientConfig, handler: H) -> Result<()>
where
    H: Handler + 'static,
{
    match config.strategy {
        Strategy::Direct => DirectConnection::new(config, handler)?.start(),
        Strategy::Threaded => ThreadedConnection::new(config, handler)?.run(),
    }
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime)
}
