//! Newline-delimited JSON framing
//!
//! Turns a stream of arbitrarily split byte chunks into complete lines. Blank lines are the
//! server's keep-alives and are dropped here. A trailing line without a newline is emitted when
//! the byte stream ends.

use std::pin::Pin;

use futures_lite::{stream, Stream, StreamExt};

use crate::core::{BotError, BotResult};

/// Boxed stream of text lines, as returned by [`super::BotApi`]
pub type LineStream = Pin<Box<dyn Stream<Item = BotResult<String>> + Send>>;

struct Framer<S> {
    chunks: Pin<Box<S>>,
    buffer: Vec<u8>,
    done: bool,
}

impl<S> Framer<S> {
    /// Next non-blank buffered line, consuming it from the buffer
    fn take_line(&mut self) -> Option<String> {
        while let Some(end) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=end).collect();
            let line = String::from_utf8_lossy(&raw).trim().to_string();
            if !line.is_empty() {
                return Some(line);
            }
        }
        None
    }

    fn take_rest(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buffer).trim().to_string();
        self.buffer.clear();
        (!line.is_empty()).then_some(line)
    }
}

/// Frame `chunks` into lines
pub fn lines<S, B, E>(chunks: S) -> LineStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<BotError> + Send + 'static,
{
    let framer = Framer {
        chunks: Box::pin(chunks),
        buffer: Vec::new(),
        done: false,
    };

    Box::pin(stream::unfold(framer, |mut framer| async move {
        loop {
            if let Some(line) = framer.take_line() {
                return Some((Ok(line), framer));
            }
            if framer.done {
                return None;
            }
            match framer.chunks.next().await {
                Some(Ok(chunk)) => framer.buffer.extend_from_slice(chunk.as_ref()),
                Some(Err(err)) => {
                    framer.done = true;
                    framer.buffer.clear();
                    return Some((Err(err.into()), framer));
                }
                None => {
                    framer.done = true;
                    return framer.take_rest().map(|line| (Ok(line), framer));
                }
            }
        }
    }))
}

/// Line stream over an in-memory list, used for scripted streams
pub fn from_lines<I>(lines: I) -> LineStream
where
    I: IntoIterator<Item = String>,
    I::IntoIter: Send + 'static,
{
    Box::pin(stream::iter(lines.into_iter().map(Ok::<String, BotError>)))
}
