//! Sample stream reader

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::codec::FrameDecoder;
use crate::error::{Error, Result};
use crate::sample::Sample;

const READ_CHUNK: usize = 4 * 1024;

/// Reads NUL-delimited JSON samples from a connection
///
/// # Example
/// ```no_run
/// use waveform_gen::SampleReader;
///
/// # async fn example() -> waveform_gen::error::Result<()> {
/// let mut reader = SampleReader::connect("127.0.0.1:3000").await?;
/// while let Some(sample) = reader.next_sample().await? {
///     println!("{} {}", sample.timestamp, sample.value);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SampleReader<R = TcpStream> {
    reader: R,
    decoder: FrameDecoder,
}

impl SampleReader<TcpStream> {
    /// Connect to a generator
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

impl<R: AsyncRead + Unpin> SampleReader<R> {
    /// Wrap an already connected stream
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: FrameDecoder::new(),
        }
    }

    /// Wait for the next sample
    ///
    /// Returns `Ok(None)` when the generator closes the connection on a frame
    /// boundary, and [`Error::UnexpectedEof`] if it closes mid-frame.
    pub async fn next_sample(&mut self) -> Result<Option<Sample>> {
        loop {
            if let Some(sample) = self.decoder.decode()? {
                return Ok(Some(sample));
            }

            let buf = self.decoder.buffer_mut();
            buf.reserve(READ_CHUNK);
            if self.reader.read_buf(buf).await? == 0 {
                return match self.decoder.pending() {
                    0 => Ok(None),
                    pending => Err(Error::UnexpectedEof { pending }),
                };
            }
        }
    }

    /// Consume the reader, returning the underlying stream
    pub fn into_inner(self) -> R {
        self.reader
    }
}
