//! Incremental UTF-8 decoding for chunked byte streams.
//!
//! Network reads split the body at arbitrary byte offsets, so a multi-byte
//! character may arrive in two (or more) pieces. The decoder keeps the
//! incomplete tail of each read and prepends it to the next one.

/// Substituted for invalid byte sequences and for a truncated final sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Byte order mark, dropped once at the very start of a stream.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Stateful UTF-8 decoder carrying partial sequences between calls.
///
/// Invalid sequences are replaced with U+FFFD rather than failing the stream.
/// A leading byte order mark is not part of the text.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
    bom_checked: bool,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    ///
    /// Bytes of a trailing incomplete sequence are held back until the next
    /// call or [`Utf8StreamDecoder::finish`].
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let joined;
        let mut input: &[u8] = if self.pending.is_empty() {
            bytes
        } else {
            self.pending.extend_from_slice(bytes);
            joined = std::mem::take(&mut self.pending);
            &joined
        };

        if !self.bom_checked {
            if input.len() < UTF8_BOM.len() && UTF8_BOM.starts_with(input) {
                self.pending.extend_from_slice(input);
                return String::new();
            }
            self.bom_checked = true;
            input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(error) => {
                    let (valid, after) = rest.split_at(error.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));

                    match error.error_len() {
                        Some(invalid_len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            rest = &after[invalid_len..];
                        }
                        None => {
                            self.pending.extend_from_slice(after);
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush the decoder at end-of-stream.
    ///
    /// A sequence left incomplete by the final read decodes to a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }

        self.pending.clear();
        REPLACEMENT_CHARACTER.to_string()
    }

    /// Number of bytes buffered from an incomplete trailing sequence.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
