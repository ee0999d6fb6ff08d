//! Wire framing for samples
//!
//! Each sample travels as a compact JSON object immediately followed by a
//! single NUL byte:
//!
//! ```text
//! {"timestamp":1700000000,"value":12.5}\0{"timestamp":1700000001,"value":...}\0
//! ```
//!
//! There is no length prefix; readers scan for the delimiter.

use bytes::{BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::sample::Sample;

/// Byte terminating every record on the wire
pub const FRAME_DELIMITER: u8 = 0x00;

/// Append one framed sample to `dst`
///
/// NaN and infinite values are rejected; JSON has no encoding for them.
pub fn encode_frame(sample: &Sample, dst: &mut BytesMut) -> Result<()> {
    if !sample.value.is_finite() {
        return Err(Error::NonFiniteValue(sample.value));
    }

    serde_json::to_writer((&mut *dst).writer(), sample)?;
    dst.put_u8(FRAME_DELIMITER);
    Ok(())
}

/// Incremental decoder for a stream of framed samples
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: BytesMut,
}

impl FrameDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Decode the next complete frame, if one is buffered
    ///
    /// Whitespace around the JSON payload is tolerated, so streams that put a
    /// newline before the delimiter decode the same way.
    pub fn decode(&mut self) -> Result<Option<Sample>> {
        let pos = match self.buf.iter().position(|&b| b == FRAME_DELIMITER) {
            Some(pos) => pos,
            None => return Ok(None),
        };

        let frame = self.buf.split_to(pos + 1);
        let sample = serde_json::from_slice(&frame[..pos])?;
        Ok(Some(sample))
    }

    /// Number of buffered bytes not yet forming a complete frame
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }
}
