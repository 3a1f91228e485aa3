//! Parsers for command line values.

use anyhow::{Context, Result, anyhow, bail};
use std::path::PathBuf;
use std::time::Duration;

use crate::http::RequestBody;

/// Parses `KEY=VALUE`. The value may itself contain `=`.
pub fn parse_param(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid parameter '{}'. Expected KEY=VALUE.", s))?;
    if key.is_empty() {
        bail!("Invalid parameter '{}'. Key must not be empty.", s);
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses `NAME:VALUE`, trimming whitespace around the value.
pub fn parse_header(s: &str) -> Result<(String, String)> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header '{}'. Expected NAME:VALUE.", s))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid header '{}'. Name must not be empty.", s);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parses a positive number of seconds, fractions allowed.
pub fn parse_seconds(s: &str) -> Result<Duration> {
    let secs: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid timeout '{}'. Expected seconds.", s))?;
    if secs.is_nan() || secs <= 0.0 {
        bail!("Invalid timeout '{}'. Must be greater than zero.", s);
    }
    Duration::try_from_secs_f64(secs).with_context(|| format!("Invalid timeout '{}'", s))
}

/// Inline text is sent as a text body, a file as raw bytes.
pub fn load_body(data: Option<String>, data_file: Option<PathBuf>) -> Result<Option<RequestBody>> {
    match (data, data_file) {
        (Some(_), Some(_)) => bail!("--data and --data-file cannot be used together"),
        (Some(text), None) => Ok(Some(RequestBody::Text(text))),
        (None, Some(path)) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read request body from {:?}", path))?;
            Ok(Some(RequestBody::Bytes(bytes)))
        }
        (None, None) => Ok(None),
    }
}
