//! HTTP session implementation
//!
//! This module handles all HTTP requests made by the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Folding GET bodies into the query string
//! - Sending form-encoded POST bodies
//! - Logging (and swallowing) HTTP error responses

use crate::config::HttpConfig;
use crate::{Result, WikiError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Request, StatusCode};
use std::time::Duration;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

/// Named sets of request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPreset {
    /// `Accept: application/json`
    Json,
}

impl HeaderPreset {
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match self {
            Self::Json => {
                headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            }
        }
        headers
    }
}

/// Builds an HTTP client with proper configuration
///
/// Proxy settings from the environment are ignored.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .no_proxy()
        .gzip(true)
        .brotli(true)
        .build()
}

/// Appends URL-encoded `params` to the query string of `url`
///
/// Uses `?` when the URL has no query yet and `&` otherwise, without
/// doubling a trailing `&`.
///
/// ```
/// use wiki_crawler::crawler::append_query;
///
/// assert_eq!(append_query("https://a.b/c", &[("q", "x y")]), "https://a.b/c?q=x+y");
/// assert_eq!(append_query("https://a.b/c?p=1", &[("q", "2")]), "https://a.b/c?p=1&q=2");
/// ```
pub fn append_query(url: &str, params: &[(&str, &str)]) -> String {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let mut url = url.to_string();
    if url.contains('?') {
        if !url.ends_with('&') {
            url.push('&');
        }
    } else {
        url.push('?');
    }
    url.push_str(&encoded);
    url
}

/// Holds the HTTP client used by a crawler session
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    debug: bool,
}

impl HttpSession {
    /// Wraps an already-built client
    ///
    /// With `debug` set, response headers are logged for every request.
    pub fn new(client: Client, debug: bool) -> Self {
        Self { client, debug }
    }

    /// Builds the client from configuration
    pub fn from_config(config: &HttpConfig, debug: bool) -> Result<Self> {
        Ok(Self::new(build_http_client(config)?, debug))
    }

    /// Builds a request
    ///
    /// For GET the body pairs are moved into the query string and no
    /// payload is sent. For any other method they are sent as a
    /// form-encoded payload.
    pub fn build(
        &self,
        method: Method,
        url: &str,
        headers: Option<&HeaderMap>,
        body: Option<&[(&str, &str)]>,
    ) -> Result<Request> {
        let (url, body) = match (&method, body) {
            (&Method::GET, Some(params)) => (append_query(url, params), None),
            (_, body) => (url.to_string(), body),
        };

        let mut builder = self.client.request(method, url.as_str());
        if let Some(headers) = headers {
            builder = builder.headers(headers.clone());
        }
        if let Some(params) = body {
            builder = builder.form(params);
        }

        builder
            .build()
            .map_err(|source| WikiError::Http { url, source })
    }

    /// Sends a request
    ///
    /// # Returns
    ///
    /// * `Ok(Some(HttpResponse))` - The server answered with a non-error status
    /// * `Ok(None)` - The server answered with a 4xx/5xx status (logged)
    /// * `Err(WikiError::Http)` - The request never got an answer
    pub async fn send(&self, request: Request) -> Result<Option<HttpResponse>> {
        let url = request.url().to_string();
        tracing::debug!("{} {}", request.method(), url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| WikiError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if self.debug {
            tracing::debug!("{}\n{}", status, format_headers(response.headers()));
        }

        if status.is_client_error() || status.is_server_error() {
            tracing::error!("HTTP Error {}: {}", status, response.url());
            return Ok(None);
        }

        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|source| WikiError::Http { url, source })?;

        Ok(Some(HttpResponse {
            url: final_url,
            status,
            headers,
            body,
        }))
    }

    pub async fn get(
        &self,
        url: &str,
        headers: Option<&HeaderMap>,
        body: Option<&[(&str, &str)]>,
    ) -> Result<Option<HttpResponse>> {
        let request = self.build(Method::GET, url, headers, body)?;
        self.send(request).await
    }

    pub async fn post(
        &self,
        url: &str,
        headers: Option<&HeaderMap>,
        body: Option<&[(&str, &str)]>,
    ) -> Result<Option<HttpResponse>> {
        let request = self.build(Method::POST, url, headers, body)?;
        self.send(request).await
    }
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join("\n")
}
