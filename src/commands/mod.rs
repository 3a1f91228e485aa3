use anyhow::{Result, bail};
use async_trait::async_trait;
use log::debug;
use std::io::Write;

use crate::http::{Headers, Method, Params, RequestBody, RequestClient, Response, ResponseBody};

pub mod args;
pub mod config;

pub use config::ClientOptions;

/// Seam between command handling and the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Requester: Send + Sync {
    async fn request(
        &self,
        url: &str,
        method: Method,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response>;

    async fn request_by_name(
        &self,
        url: &str,
        method_name: &str,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response>;
}

#[async_trait]
impl Requester for RequestClient {
    async fn request(
        &self,
        url: &str,
        method: Method,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response> {
        Ok(RequestClient::request(self, url, method, body, params, headers).await?)
    }

    async fn request_by_name(
        &self,
        url: &str,
        method_name: &str,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response> {
        RequestClient::request_by_name(self, url, method_name, body, params, headers).await
    }
}

/// Verb of a command line call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallMethod {
    Verb(Method),
    /// Name typed by the user, resolved by the client
    Named(String),
}

/// A single call as collected from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: CallMethod,
    pub url: String,
    pub body: Option<RequestBody>,
    pub params: Params,
    pub headers: Headers,
}

impl Call {
    pub fn new(method: CallMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            params: Params::new(),
            headers: Headers::new(),
        }
    }
}

#[tracing::instrument(skip(requester, call), fields(url = %call.url))]
pub async fn execute<Q: Requester>(requester: &Q, call: &Call) -> Result<Response> {
    let body = call.body.clone();
    match &call.method {
        CallMethod::Verb(method) => {
            requester
                .request(&call.url, *method, body, &call.params, &call.headers)
                .await
        }
        CallMethod::Named(name) => {
            requester
                .request_by_name(&call.url, name, body, &call.params, &call.headers)
                .await
        }
    }
}

/// Writes the response to `out`: the body as-is, or `{"code":..,"data":..}`
/// when `json` is set.
pub fn render<W: Write>(response: &Response, json: bool, out: &mut W) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, response)?;
        writeln!(out)?;
        return Ok(());
    }

    out.write_all(response.data.as_bytes())?;
    if let ResponseBody::Text(text) = &response.data
        && !text.is_empty()
        && !text.ends_with('\n')
    {
        writeln!(out)?;
    }
    Ok(())
}

/// Executes `call`, prints the body to `out` and the status to `status_out`
/// (not in JSON mode, where the status is part of the output), and fails on a
/// non-2xx status.
pub async fn run<Q: Requester, W: Write, E: Write>(
    requester: &Q,
    call: &Call,
    json: bool,
    out: &mut W,
    status_out: &mut E,
) -> Result<()> {
    let response = execute(requester, call).await?;
    debug!("Received {} bytes", response.data.len());

    render(&response, json, out)?;
    out.flush()?;

    if !json {
        writeln!(status_out, "HTTP {}", response.code)?;
    }

    if !response.is_success() {
        bail!("Server responded with HTTP {}", response.code);
    }
    Ok(())
}
