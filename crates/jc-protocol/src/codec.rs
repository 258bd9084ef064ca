//! Tokio codec for the console's text stream
//!
//! The console speaks plain text with CRLF line endings, but prompts are not
//! newline terminated (`Username: `, `jcli : `), so the decoder cannot split
//! on lines. It yields whatever text has arrived instead, and leaves prompt
//! detection to [`ConsoleProtocol`](crate::ConsoleProtocol).

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;

/// Terminator appended to every line written to the console
pub const LINE_TERMINATOR: &str = "\r\n";

/// Codec yielding received text chunks and writing CRLF-terminated lines
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleCodec;

impl ConsoleCodec {
    /// Create a new codec
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ConsoleCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let take = match std::str::from_utf8(&src[..]) {
            Ok(_) => src.len(),
            Err(e) => match e.error_len() {
                // Invalid sequence: consume it so it is replaced below
                Some(len) => e.valid_up_to() + len,
                // Truncated multi-byte character at the end of the read
                None if e.valid_up_to() == 0 => return Ok(None),
                None => e.valid_up_to(),
            },
        };

        let chunk = src.split_to(take);
        Ok(Some(String::from_utf8_lossy(&chunk).into_owned()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(text) = self.decode(src)? {
            return Ok(Some(text));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // The stream ended inside a character; keep what we have
        let rest = src.split_to(src.len());
        Ok(Some(String::from_utf8_lossy(&rest).into_owned()))
    }
}

impl<T: AsRef<str>> Encoder<T> for ConsoleCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = line.as_ref();
        dst.reserve(line.len() + LINE_TERMINATOR.len());
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(LINE_TERMINATOR.as_bytes());
        Ok(())
    }
}
