//! The single failure type surfaced by [`RequestClient`](super::RequestClient).

use std::error::Error as StdError;

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    /// Connect or read phase exceeded the configured timeout
    Timeout,
    /// Could not establish a connection (refused, DNS failure, unreachable)
    Connect,
    /// TLS handshake or encrypted exchange failed
    Tls,
    /// The request could not be built (invalid URL, header name or value)
    Request,
    /// The response body could not be read
    Body,
    /// Any other failure reported by the HTTP library
    Other,
}

impl std::fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HttpErrorKind::Timeout => "timeout",
            HttpErrorKind::Connect => "connection error",
            HttpErrorKind::Tls => "TLS error",
            HttpErrorKind::Request => "invalid request",
            HttpErrorKind::Body => "body error",
            HttpErrorKind::Other => "transport error",
        };
        f.write_str(name)
    }
}

/// Transport or TLS failure during a request.
///
/// Non-2xx responses are not errors; they come back as a normal
/// [`Response`](super::Response).
#[derive(Debug)]
pub struct HttpError {
    kind: HttpErrorKind,
    source: reqwest::Error,
}

impl HttpError {
    pub fn kind(&self) -> HttpErrorKind {
        self.kind
    }

    pub fn is_tls(&self) -> bool {
        self.kind == HttpErrorKind::Tls
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == HttpErrorKind::Timeout
    }

    /// The original error reported by the HTTP library.
    pub fn inner(&self) -> &reqwest::Error {
        &self.source
    }

    pub fn into_inner(self) -> reqwest::Error {
        self.source
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(source: reqwest::Error) -> Self {
        let kind = classify(&source);
        Self { kind, source }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP request failed ({}): {}", self.kind, self.source)?;
        // reqwest keeps the useful part ("connection refused", "invalid peer
        // certificate") further down the chain.
        let mut cause = self.source.source();
        while let Some(err) = cause {
            write!(f, ": {}", err)?;
            cause = err.source();
        }
        Ok(())
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

fn classify(error: &reqwest::Error) -> HttpErrorKind {
    if is_tls_failure(error) {
        HttpErrorKind::Tls
    } else if error.is_timeout() {
        HttpErrorKind::Timeout
    } else if error.is_connect() {
        HttpErrorKind::Connect
    } else if error.is_builder() {
        HttpErrorKind::Request
    } else if error.is_body() || error.is_decode() {
        HttpErrorKind::Body
    } else {
        HttpErrorKind::Other
    }
}

/// Walks the error chain looking for a rustls failure.
///
/// `io::Error::source` skips its own payload, and the TLS connector nests the
/// rustls error as the payload of one or more `io::Error`s, so payloads are
/// descended into instead of `source()` at those levels.
pub(crate) fn is_tls_failure(error: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if err.is::<rustls::Error>() || is_tls_message(&err.to_string()) {
            return true;
        }
        current = match err.downcast_ref::<std::io::Error>() {
            Some(io) => match io.get_ref() {
                Some(payload) => Some(payload as &(dyn StdError + 'static)),
                None => io.source(),
            },
            None => err.source(),
        };
    }
    false
}

/// Messages rustls uses for handshake and record failures, for chains where
/// the rustls error type itself is not reachable.
const TLS_MESSAGES: &[&str] = &[
    "received corrupt message",
    "invalid peer certificate",
    "received fatal alert",
    "peer is incompatible",
    "peer misbehaved",
    "peer sent no certificates",
    "invalid certificate",
    "tls handshake",
];

fn is_tls_message(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    TLS_MESSAGES.iter().any(|m| message.contains(m))
}
