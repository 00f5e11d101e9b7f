//! Line decoder for the upstream's streamed body
//!
//! The body is split on newlines. Every `data:` line carries one JSON chunk;
//! anything else (blank separators, comments, `event:` fields) is skipped.
//! `data: [DONE]` ends the sequence just like the end of the body does.

use std::io;
use std::pin::Pin;

use futures_util::{Stream, StreamExt, TryStreamExt, future};
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

use crate::error::UpstreamError;
use crate::types::StreamEvent;

/// Lazy, single-pass sequence of upstream stream events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, UpstreamError>> + Send>>;

/// Longest line accepted from the upstream
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

const DATA_FIELD: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug)]
enum Line {
    Event(StreamEvent),
    Skip,
    Done,
}

fn decode_line(line: &str) -> Result<Line, UpstreamError> {
    let Some(payload) = line.strip_prefix(DATA_FIELD) else {
        return Ok(Line::Skip);
    };
    let payload = payload.strip_prefix(' ').unwrap_or(payload).trim_end();

    if payload.is_empty() {
        return Ok(Line::Skip);
    }
    if payload == DONE_MARKER {
        return Ok(Line::Done);
    }

    Ok(Line::Event(serde_json::from_str(payload)?))
}

/// Decode a streamed upstream response
pub(crate) fn from_response(response: reqwest::Response) -> EventStream {
    decode(response.bytes_stream().map_err(io::Error::other))
}

/// Decode a raw byte stream into events
///
/// The sequence ends after `[DONE]`, at end of input, or right after the
/// first error item.
pub fn decode<S, B>(body: S) -> EventStream
where
    S: Stream<Item = io::Result<B>> + Send + 'static,
    B: bytes::Buf + Send + 'static,
{
    let lines = FramedRead::new(StreamReader::new(body), LinesCodec::new_with_max_length(MAX_LINE_BYTES));

    let mut failed = false;
    let events = lines
        .map(|line| match line {
            Ok(line) => decode_line(&line),
            Err(e) => Err(UpstreamError::Stream(e.to_string())),
        })
        .take_while(move |line| {
            let keep = !failed && !matches!(line, Ok(Line::Done));
            failed |= line.is_err();
            future::ready(keep)
        })
        .filter_map(|line| {
            future::ready(match line {
                Ok(Line::Event(event)) => Some(Ok(event)),
                Ok(Line::Skip | Line::Done) => None,
                Err(e) => Some(Err(e)),
            })
        });

    Box::pin(events)
}
