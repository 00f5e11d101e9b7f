//! Relay of upstream stream events to the client as SSE frames
//!
//! A producer task drains the upstream stream into a bounded channel which
//! backs the response body. Client disconnect closes the channel, so the
//! producer notices on its next wait and drops the upstream response. A
//! watchdog awaits the producer and turns a panic into a final error frame.

use std::convert::Infallible;

use axum::response::sse::{Event, Sse};
use futures_util::{Stream, StreamExt, stream};
use novel_core::HttpError;
use novel_upstream::EventStream;
use tokio::sync::mpsc;

use crate::error::{self, ServerError};

/// Payload of the frame closing a successful stream
const DONE: &str = "[DONE]";

/// Start relaying `events` and return the SSE response body
///
/// `capacity` bounds how many frames may wait for a slow client.
pub(crate) fn relay(events: EventStream, capacity: usize) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(capacity);
    let watchdog = tx.clone();
    let producer = tokio::spawn(produce(events, tx));

    tokio::spawn(async move {
        let Err(e) = producer.await else {
            return;
        };
        if e.is_panic() {
            let message = error::panic_message(&*e.into_panic());
            tracing::error!(%message, "stream producer panicked");
            let _ = watchdog.send(error_frame(&ServerError::Internal(message))).await;
        }
    });

    let frames = stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|frame| (Ok(frame), rx)) });
    Sse::new(frames)
}

async fn produce(mut events: EventStream, tx: mpsc::Sender<Event>) {
    let mut forwarded = 0_usize;

    loop {
        let next = tokio::select! {
            () = tx.closed() => {
                tracing::debug!(forwarded, "client disconnected, dropping upstream stream");
                return;
            }
            next = events.next() => next,
        };

        let (frame, last) = match next {
            Some(Ok(event)) => match Event::default().json_data(&event) {
                Ok(frame) => (frame, false),
                Err(e) => (error_frame(&ServerError::Internal(e.to_string())), true),
            },
            Some(Err(e)) => {
                tracing::warn!(error = %e, forwarded, "upstream stream failed");
                (error_frame(&ServerError::from(e)), true)
            }
            None => {
                tracing::debug!(forwarded, "upstream stream completed");
                (Event::default().data(DONE), true)
            }
        };

        if tx.send(frame).await.is_err() {
            tracing::debug!(forwarded, "client disconnected, dropping upstream stream");
            return;
        }
        if last {
            return;
        }
        forwarded += 1;
    }
}

fn error_frame(error: &ServerError) -> Event {
    let envelope = error.envelope();
    match serde_json::to_string(&envelope) {
        Ok(data) => Event::default().data(data),
        Err(_) => Event::default().data(error.client_message()),
    }
}
