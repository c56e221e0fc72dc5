//! Incremental UTF-8 decoding for byte streams

use thiserror::Error;

/// Bytes that can never form valid UTF-8 text.
#[derive(Debug, Error)]
#[error("byte stream is not valid UTF-8")]
pub struct Utf8StreamError;

/// Decodes UTF-8 text arriving in arbitrary byte chunks.
///
/// A multi-byte code point may straddle a chunk boundary; the incomplete
/// tail of each chunk is carried into the next call instead of being
/// replaced with U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode everything complete in `carry + chunk`. Returns `None` when
    /// no full code point is available yet.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Option<String>, Utf8StreamError> {
        self.carry.extend_from_slice(chunk);
        match std::str::from_utf8(&self.carry) {
            Ok(_) => {
                let text = String::from_utf8(std::mem::take(&mut self.carry))
                    .map_err(|_| Utf8StreamError)?;
                Ok((!text.is_empty()).then_some(text))
            }
            // error_len() of None means the tail is an incomplete code
            // point: keep it for the next chunk.
            Err(err) if err.error_len().is_none() => {
                let tail = self.carry.split_off(err.valid_up_to());
                let text = String::from_utf8(std::mem::replace(&mut self.carry, tail))
                    .map_err(|_| Utf8StreamError)?;
                Ok((!text.is_empty()).then_some(text))
            }
            Err(_) => Err(Utf8StreamError),
        }
    }

    /// The stream must not end in the middle of a code point.
    pub fn finish(&self) -> Result<(), Utf8StreamError> {
        if self.carry.is_empty() {
            Ok(())
        } else {
            Err(Utf8StreamError)
        }
    }
}
