//! Request, response and stream types exchanged with the upstream
//!
//! Inbound requests use the OpenAI chat completion shape, which the upstream
//! also accepts, so one set of types serves both sides of the proxy. Upstream
//! output is held as raw JSON behind typed accessors, so re-encoding yields
//! exactly the body the upstream sent.

pub mod message;
pub mod request;
pub mod response;
pub mod stream;

pub use message::{ChatMessage, Role};
pub use request::{CompletionParams, CompletionRequest};
pub use response::CompletionResponse;
pub use stream::StreamEvent;
