//! Request helper for the metadata registration API.

use log::debug;
use reqwest::Client;
use std::collections::BTreeMap;

use super::body::{RequestBody, Response, ResponseBody};
use super::error::HttpError;
use super::method::Method;
use super::timeout::Timeout;

/// Query parameters, keyed by name.
pub type Params = BTreeMap<String, String>;

/// Request headers, keyed by name.
pub type Headers = BTreeMap<String, String>;

const USER_AGENT: &str = concat!("mdsreq/", env!("CARGO_PKG_VERSION"));

/// HTTP client preconfigured with base URL, Basic Authentication credentials,
/// default query parameters and timeouts.
///
/// Every call is one request/response cycle: no retries, no pagination. The
/// result is returned to the caller, so a single instance can be shared
/// between tasks.
///
/// The `Authorization` header is only sent when a username or a password is
/// configured; a missing half is sent empty. Without credentials, requests
/// go out unauthenticated.
#[derive(Clone)]
pub struct RequestClient {
    client: Client,
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    default_params: Params,
    timeout: Option<Timeout>,
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("default_params", &self.default_params)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`RequestClient`]. Every setting is optional.
#[derive(Default)]
pub struct RequestClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    default_params: Params,
    timeout: Option<Timeout>,
}

impl RequestClientBuilder {
    /// Prefix prepended verbatim to every request URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets both Basic Authentication credentials.
    pub fn credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    /// Adds a query parameter sent with every request. Wins over a
    /// request-level parameter with the same name.
    pub fn default_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_params.insert(key.into(), value.into());
        self
    }

    pub fn default_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.default_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// A single `Duration` limits both connect and read; a
    /// `(connect, read)` pair sets them individually.
    pub fn timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    pub fn build(self) -> Result<RequestClient, HttpError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder
                .connect_timeout(timeout.connect())
                .read_timeout(timeout.read());
        }
        let client = builder.build()?;

        Ok(RequestClient {
            client,
            base_url: self.base_url.filter(|url| !url.is_empty()),
            username: self.username,
            password: self.password,
            default_params: self.default_params,
            timeout: self.timeout,
        })
    }
}

impl RequestClient {
    pub fn builder() -> RequestClientBuilder {
        RequestClientBuilder::default()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn default_params(&self) -> &Params {
        &self.default_params
    }

    pub fn timeout(&self) -> Option<Timeout> {
        self.timeout
    }

    /// `base_url + url` when a base URL is configured, `url` otherwise.
    pub fn effective_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base, url),
            None => url.to_string(),
        }
    }

    /// Request parameters with the default parameters applied on top.
    pub fn merged_params(&self, params: &Params) -> Params {
        let mut merged = params.clone();
        merged.extend(
            self.default_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }

    /// Performs a request. The body is only sent with [`Method::Post`].
    #[tracing::instrument(skip(self, body, params, headers))]
    pub async fn request(
        &self,
        url: &str,
        method: Method,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let attach_body = method == Method::Post;
        self.execute(url, method, body, attach_body, params, headers)
            .await
    }

    /// Performs a request whose verb is given by name.
    ///
    /// The name is matched case-insensitively, but the body is only sent when
    /// the name is exactly `"POST"`. An unknown name fails with
    /// [`UnknownMethod`](super::UnknownMethod); transport failures are an
    /// [`HttpError`] inside the returned `anyhow::Error`.
    #[tracing::instrument(skip(self, body, params, headers))]
    pub async fn request_by_name(
        &self,
        url: &str,
        method_name: &str,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> anyhow::Result<Response> {
        let method: Method = method_name.parse()?;
        let attach_body = method_name == "POST";
        if method == Method::Post && !attach_body && body.is_some() {
            debug!(
                "Method given as '{}' rather than 'POST', request body is not sent",
                method_name
            );
        }
        let response = self
            .execute(url, method, body, attach_body, params, headers)
            .await?;
        Ok(response)
    }

    pub async fn get(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.request(url, Method::Get, None, params, headers).await
    }

    pub async fn post(
        &self,
        url: &str,
        body: Option<RequestBody>,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.request(url, Method::Post, body, params, headers).await
    }

    pub async fn delete(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.request(url, Method::Delete, None, params, headers)
            .await
    }

    async fn execute(
        &self,
        url: &str,
        method: Method,
        body: Option<RequestBody>,
        attach_body: bool,
        params: &Params,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let url = self.effective_url(url);
        let params = self.merged_params(params);
        // A raw byte request body means the caller wants raw bytes back.
        let raw_body = body.as_ref().is_some_and(RequestBody::is_bytes);

        debug!("{} {} with query {:?}...", method, url, params);

        let mut request = self
            .client
            .request(method.to_reqwest(), &url)
            .query(&params);

        if self.username.is_some() || self.password.is_some() {
            request = request.basic_auth(
                self.username.as_deref().unwrap_or_default(),
                self.password.as_deref(),
            );
        }

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if attach_body && let Some(body) = body {
            request = request.body(body.into_bytes());
        }

        let response = request.send().await?;
        let code = response.status().as_u16();
        let bytes = response.bytes().await?.to_vec();

        debug!("{} {} -> HTTP {} ({} bytes)", method, url, code, bytes.len());

        let data = if raw_body {
            ResponseBody::Bytes(bytes)
        } else {
            ResponseBody::decode(bytes)
        };

        Ok(Response { code, data })
    }
}
