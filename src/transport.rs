//! Framed line transport over a byte stream.

mod error;

pub use self::error::TransportReadError;

use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use socket2::{SockRef, TcpKeepalive};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ProtocolError};
use crate::line::LineCodec;

/// A stream of protocol lines in both directions.
pub struct Transport<S> {
    framed: Framed<S, LineCodec>,
}

impl Transport<TcpStream> {
    /// Dial the configured server, failing with
    /// [`ClientError::ConnectionTimeout`] when the connect timeout elapses.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let address = config.address();
        let timeout = config.connect_timeout();
        debug!(%address, ?timeout, "connecting");

        let stream = connect_within(&address, timeout, TcpStream::connect(&address)).await?;
        Ok(Self::tcp(stream))
    }

    /// Wrap a connected TCP stream, enabling keepalive.
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }
        if let Err(e) = stream.set_nodelay(true) {
            warn!("failed to set TCP_NODELAY: {}", e);
        }
        Self::new(stream)
    }

    fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)
    }
}

/// Await `connect`, failing with [`ClientError::ConnectionTimeout`] once
/// `timeout` elapses.
pub(crate) async fn connect_within<F, T>(
    address: &str,
    timeout: Duration,
    connect: F,
) -> Result<T, ClientError>
where
    F: Future<Output = std::io::Result<T>>,
{
    match tokio::time::timeout(timeout, connect).await {
        Ok(stream) => Ok(stream?),
        Err(_) => Err(ClientError::ConnectionTimeout {
            address: address.to_string(),
            timeout,
        }),
    }
}

impl<S> Transport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Frame an arbitrary byte stream.
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    /// The next complete line, or `None` once the peer closed the stream.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportReadError> {
        match self.framed.next().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(TransportReadError::from(e)),
            None => Ok(None),
        }
    }

    /// Write one line; the codec appends the terminator.
    pub async fn write_line(&mut self, line: String) -> Result<(), ProtocolError> {
        self.framed.send(line).await
    }

    /// Flush pending output and shut down the write half.
    pub async fn close(&mut self) -> Result<(), ProtocolError> {
        SinkExt::<String>::close(&mut self.framed).await
    }
}
