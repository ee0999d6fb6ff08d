//! A single broadcast recipient

use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

use crate::codec::encode_frame;
use crate::error::Result;
use crate::sample::Sample;

/// Default capacity of the per-subscriber output buffer
pub const DEFAULT_WRITE_BUFFER: usize = 8 * 1024;

/// One connected subscriber
///
/// Owns its connection exclusively. The stream type is generic so the
/// registry can be driven by in-memory pipes in tests; in the server it is
/// always a [`TcpStream`].
#[derive(Debug)]
pub struct Subscriber<W = TcpStream> {
    id: u64,
    peer: Option<SocketAddr>,
    writer: BufWriter<W>,
    /// Scratch space for the encoded frame, reused across sends
    frame: BytesMut,
}

impl<W: AsyncWrite + Unpin + Send> Subscriber<W> {
    /// Wrap a connection
    pub fn new(id: u64, stream: W) -> Self {
        Self::with_capacity(id, stream, DEFAULT_WRITE_BUFFER)
    }

    /// Wrap a connection with a custom output buffer size
    pub fn with_capacity(id: u64, stream: W, capacity: usize) -> Self {
        Self {
            id,
            peer: None,
            writer: BufWriter::with_capacity(capacity, stream),
            frame: BytesMut::with_capacity(64),
        }
    }

    /// Record the remote address for logging
    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Registry-assigned identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remote address, if known
    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Write one framed sample and flush it to the connection
    ///
    /// Serialization, write, and flush failures all surface as a single
    /// error. A subscriber that failed once must not be sent to again.
    pub async fn send(&mut self, sample: &Sample) -> Result<()> {
        self.frame.clear();
        encode_frame(sample, &mut self.frame)?;

        self.writer.write_all(&self.frame).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Shut down the connection
    ///
    /// Bytes still sitting in the output buffer are discarded; after a
    /// failed send they could never be delivered intact anyway.
    pub async fn close(self) {
        let id = self.id;
        let mut stream = self.writer.into_inner();

        if let Err(e) = stream.shutdown().await {
            tracing::debug!(subscriber = id, error = %e, "Error shutting down connection");
        }
    }
}
