//! Request helper for a metadata registration (MDS) API.
//!
//! [`http::RequestClient`] carries the base URL, Basic Authentication
//! credentials, default query parameters and timeouts, and issues GET, POST
//! and DELETE calls returning a [`http::Response`]. Transport and TLS failures
//! surface as [`http::HttpError`].

pub mod commands;
pub mod http;
