//! HTTP request helper: configuration, verbs, payloads and the error type.

mod body;
mod client;
mod error;
mod method;
mod timeout;

pub use body::{RequestBody, Response, ResponseBody};
pub use client::{Headers, Params, RequestClient, RequestClientBuilder};
pub use error::{HttpError, HttpErrorKind};
pub use method::{Method, UnknownMethod};
pub use timeout::Timeout;
