use log::warn;
use serde::Serialize;

/// Request payload as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Sent as UTF-8 bytes
    Text(String),
    /// Sent unchanged
    Bytes(Vec<u8>),
}

impl RequestBody {
    pub fn is_bytes(&self) -> bool {
        matches!(self, RequestBody::Bytes(_))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RequestBody::Text(text) => text.into_bytes(),
            RequestBody::Bytes(bytes) => bytes,
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<&[u8]> for RequestBody {
    fn from(bytes: &[u8]) -> Self {
        RequestBody::Bytes(bytes.to_vec())
    }
}

/// Response payload.
///
/// Text unless the request carried a raw byte body, or the server returned
/// something that is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl ResponseBody {
    /// Decodes `bytes` as UTF-8, keeping the raw bytes if they are not valid text.
    pub fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => ResponseBody::Text(text),
            Err(e) => {
                warn!(
                    "Response body is not valid UTF-8 ({}), keeping raw bytes",
                    e.utf8_error()
                );
                ResponseBody::Bytes(e.into_bytes())
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResponseBody::Text(text) => text.as_bytes(),
            ResponseBody::Bytes(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Status code and body of a completed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub code: u16,
    pub data: ResponseBody,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}
