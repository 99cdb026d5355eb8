//! Newline-delimited JSON framing for event streams.
//!
//! Producers write one JSON object per line. Consumers receive arbitrary
//! byte chunks, so the decoder buffers the trailing partial line between
//! chunks and only parses text that ended in `\n`.

use std::io::{self, Read, Write};
use std::marker::PhantomData;

use thiserror::Error;
use tracing::warn;

use crate::config::DecoderOptions;
use crate::traits::SearchEvent;

/// Content type of an event stream response.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to read event stream: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("event stream ended before its terminal event")]
    Truncated,
}

/// Serializes one event as a JSON line, newline included.
pub fn encode_line<E: SearchEvent>(event: &E) -> Result<Vec<u8>, serde_json::Error> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');
    Ok(line)
}

/// Writes every event as a line, flushing after each one.
///
/// Returns the number of events written.
pub fn write_events<W, E, I>(writer: &mut W, events: I) -> Result<usize, StreamError>
where
    W: Write,
    E: SearchEvent,
    I: IntoIterator<Item = E>,
{
    let mut written = 0;
    for event in events {
        writer.write_all(&encode_line(&event)?)?;
        writer.flush()?;
        written += 1;
    }
    Ok(written)
}

/// Incremental line decoder.
///
/// Malformed lines are logged and skipped; they never end the stream. A line
/// longer than [`DecoderOptions::max_line_bytes`] counts as malformed: the
/// bytes held for it are released and the rest of it is dropped up to the
/// next newline, so the buffer never grows past the limit.
#[derive(Debug)]
pub struct NdjsonDecoder<E> {
    buffer: Vec<u8>,
    options: DecoderOptions,
    discarding: bool,
    skipped: usize,
    _event: PhantomData<fn() -> E>,
}

impl<E: SearchEvent> Default for NdjsonDecoder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SearchEvent> NdjsonDecoder<E> {
    pub fn new() -> Self {
        Self::with_options(DecoderOptions::default())
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            buffer: Vec::new(),
            options,
            discarding: false,
            skipped: 0,
            _event: PhantomData,
        }
    }

    /// Feeds a chunk and returns every event completed by it.
    pub fn push(&mut self, mut chunk: &[u8]) -> Vec<E> {
        if self.discarding {
            match chunk.iter().position(|&b| b == b'\n') {
                Some(offset) => {
                    chunk = &chunk[offset + 1..];
                    self.discarding = false;
                }
                None => return Vec::new(),
            }
        }
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut consumed = 0;
        while let Some(offset) = self.buffer[consumed..].iter().position(|&b| b == b'\n') {
            let end = consumed + offset;
            if let Some(event) = self.parse_line(consumed, end) {
                events.push(event);
            }
            consumed = end + 1;
        }
        self.buffer.drain(..consumed);

        if self.buffer.len() > self.options.max_line_bytes {
            self.skipped += 1;
            warn!(
                held = self.buffer.len(),
                max_line_bytes = self.options.max_line_bytes,
                "dropping oversized event line"
            );
            self.buffer.clear();
            self.discarding = true;
        }

        events
    }

    /// Parses whatever is left once the byte stream has ended.
    pub fn finish(&mut self) -> Option<E> {
        if std::mem::take(&mut self.discarding) {
            self.buffer.clear();
            return None;
        }
        let end = self.buffer.len();
        let event = self.parse_line(0, end);
        self.buffer.clear();
        event
    }

    /// Bytes held back waiting for a newline.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Malformed lines dropped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn parse_line(&mut self, start: usize, end: usize) -> Option<E> {
        let mut line = &self.buffer[start..end];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        if line.len() > self.options.max_line_bytes {
            self.skipped += 1;
            warn!(
                len = line.len(),
                max_line_bytes = self.options.max_line_bytes,
                "dropping oversized event line"
            );
            return None;
        }

        match serde_json::from_slice(line) {
            Ok(event) => Some(event),
            Err(err) => {
                self.skipped += 1;
                warn!(
                    error = %err,
                    line = %String::from_utf8_lossy(line),
                    "skipping malformed event line"
                );
                None
            }
        }
    }
}

/// Iterator of events decoded from a byte source.
///
/// Stops after the terminal event; remaining bytes are not read. An IO
/// error, or a source that ends before the terminal event, is yielded once
/// and ends iteration.
pub struct EventReader<R, E> {
    source: R,
    decoder: NdjsonDecoder<E>,
    ready: std::collections::VecDeque<E>,
    chunk: Vec<u8>,
    done: bool,
}

impl<R: Read, E: SearchEvent> EventReader<R, E> {
    pub fn new(source: R) -> Self {
        Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(source: R, chunk_size: usize) -> Self {
        Self::with_options(source, chunk_size, DecoderOptions::default())
    }

    pub fn with_options(source: R, chunk_size: usize, options: DecoderOptions) -> Self {
        Self {
            source,
            decoder: NdjsonDecoder::with_options(options),
            ready: std::collections::VecDeque::new(),
            chunk: vec![0; chunk_size.max(1)],
            done: false,
        }
    }

    /// Malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.decoder.skipped()
    }

    fn fill(&mut self) -> Result<bool, StreamError> {
        loop {
            let read = match self.source.read(&mut self.chunk) {
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if read == 0 {
                if let Some(event) = self.decoder.finish() {
                    self.ready.push_back(event);
                }
                return Ok(false);
            }
            let events = self.decoder.push(&self.chunk[..read]);
            if !events.is_empty() {
                self.ready.extend(events);
                return Ok(true);
            }
        }
    }
}

impl<R: Read, E: SearchEvent> Iterator for EventReader<R, E> {
    type Item = Result<E, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.ready.is_empty() {
            match self.fill() {
                Ok(_) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        match self.ready.pop_front() {
            Some(event) => {
                if event.is_terminal() {
                    self.done = true;
                }
                Some(Ok(event))
            }
            None => {
                self.done = true;
                Some(Err(StreamError::Truncated))
            }
        }
    }
}
