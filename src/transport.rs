//! Sending requests to GitHub
//!
//! [`Transport`] is the seam between the provisioning steps and the network,
//! [`HttpTransport`] is the implementation that actually talks to GitHub

use core::fmt;

use anyhow::anyhow;
use nutype::nutype;
use reqwest::{Method, Url};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::APP_NAME;

/// Bearer token used to authenticate against GitHub
#[nutype(sanitize(trim), validate(not_empty), derive(Clone, AsRef))]
pub struct Token(String);

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// A single call to the API
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Relative to the API root, e.g. `/user/repos`
    pub path: String,
    pub body: serde_json::Value,
}

/// What GitHub answered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Sends one request and waits for the whole response
pub trait Transport {
    /// `Err` only when no response was received at all. Any status code,
    /// successful or not, is an `Ok`
    fn send(&self, request: &Request) -> anyhow::Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> anyhow::Result<Response> {
        (**self).send(request)
    }
}

/// Blocking HTTP client which adds the authorization header to every request
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, token: &Token) -> anyhow::Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.as_ref()))
            .map_err(|err| anyhow!("Token cannot be sent in a header: {err}"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .user_agent(APP_NAME)
            .default_headers(headers)
            .build()
            .map_err(|err| anyhow!("Failed to build HTTP client: {err}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Full URL of a request, `path` must already be percent-encoded
    fn url(&self, path: &str) -> anyhow::Result<Url> {
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|err| anyhow!("Invalid URL {}{path}: {err}", self.base_url))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> anyhow::Result<Response> {
        let url = self.url(&request.path)?;
        log::trace!("{} {url}", request.method);

        let response = self
            .client
            .request(request.method.clone(), url.clone())
            .json(&request.body)
            .send()
            .map_err(|err| anyhow!("Error sending request: {err}"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| anyhow!("Error reading response of {url}: {err}"))?;

        log::trace!("{url} responded with {status}");

        Ok(Response { status, body })
    }
}
