//! Transport-only client primitives for the code-commenting endpoint.
//!
//! This crate owns request building, response status handling and incremental
//! decoding of the streamed response body. It contains no UI coupling: callers
//! pull decoded text through [`TextStream`] and decide how to display it.
//!
//! The endpoint accepts `POST /add-comments` with a JSON body of the shape
//! `{"code": "<source>"}` and answers with an unframed `text/plain` byte stream.
//! End-of-stream is the only message boundary.

pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod headers;
pub mod payload;
pub mod stream;
pub mod url;

pub use client::{CommentApiClient, ResponseBody};
pub use config::CommentApiConfig;
pub use decoder::Utf8StreamDecoder;
pub use error::CommentApiError;
pub use payload::CommentRequest;
pub use stream::TextStream;
pub use reqwest::StatusCode;
pub use url::normalize_endpoint;
