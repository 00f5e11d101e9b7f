//! Client for the NovelGPT chat completion endpoint
//!
//! [`UpstreamClient`] forwards OpenAI-shaped requests, filling in the
//! provider-specific `repetition_penalty`, and decodes both the buffered and
//! the streamed responses. The [`Upstream`] trait lets the server swap in a
//! fake in tests.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod client;
mod error;
pub mod sse;
pub mod types;

pub use client::{Upstream, UpstreamClient};
pub use error::UpstreamError;
pub use sse::EventStream;
