use futures_util::{Stream, StreamExt};
use tracing::trace;

use crate::decoder::Utf8StreamDecoder;
use crate::error::CommentApiError;

/// Pull-based text view over a chunked byte stream.
///
/// Each [`TextStream::next_chunk`] call suspends until the source yields more
/// bytes or ends. The stream is finite and cannot be restarted: once it reports
/// `None` or an error, every later call returns `Ok(None)`.
#[derive(Debug)]
pub struct TextStream<S> {
    source: S,
    decoder: Utf8StreamDecoder,
    finished: bool,
}

impl<S, B> TextStream<S>
where
    S: Stream<Item = Result<B, CommentApiError>> + Unpin,
    B: AsRef<[u8]>,
{
    pub fn open(source: S) -> Self {
        Self {
            source,
            decoder: Utf8StreamDecoder::new(),
            finished: false,
        }
    }

    /// Returns the next decoded chunk, or `None` once the source has ended.
    ///
    /// Reads that only extend a pending multi-byte sequence produce no text and
    /// are skipped, so a returned chunk is never empty.
    pub async fn next_chunk(&mut self) -> Result<Option<String>, CommentApiError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            match self.source.next().await {
                Some(Ok(bytes)) => {
                    let bytes = bytes.as_ref();
                    let text = self.decoder.decode(bytes);
                    trace!(
                        bytes = bytes.len(),
                        chars = text.chars().count(),
                        pending = self.decoder.pending_len(),
                        "decoded body read"
                    );
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(Some(text));
                }
                Some(Err(error)) => {
                    self.finished = true;
                    return Err(error);
                }
                None => {
                    self.finished = true;
                    let tail = self.decoder.finish();
                    return Ok((!tail.is_empty()).then_some(tail));
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
