//! Types shared by every novel-proxy crate

#![allow(clippy::must_use_candidate)]

mod error;

pub use error::{ErrorDetail, ErrorEnvelope, HttpError};
