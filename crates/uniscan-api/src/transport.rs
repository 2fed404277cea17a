// Transport layer: URL construction, API-key header injection, and the
// single request/response exchange every endpoint goes through.
//
// The exchange is strictly "200 or error": any other status is reported
// without reading the body, and the response is dropped (connection
// released back to the pool) on every exit path.

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::endpoint::{API_BASE_PATH, Endpoint};
use crate::error::Error;

/// Header carrying the static Integration API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// TLS verification mode.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed controllers).
    DangerAcceptInvalid,
}

/// Transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` that sends the API key and `Accept`
    /// header on every request.
    pub fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("uniscan/", env!("CARGO_PKG_VERSION")))
            .default_headers(auth_headers(api_key)?);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// `X-API-KEY` (marked sensitive so it never shows up in debug output)
/// plus `Accept: application/json`.
pub(crate) fn auth_headers(api_key: &SecretString) -> Result<HeaderMap, Error> {
    let mut key_value =
        HeaderValue::from_str(api_key.expose_secret()).map_err(|_| Error::InvalidApiKey)?;
    key_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, key_value);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Parse and validate the controller host.
///
/// The host must be an absolute URL that can carry a path; anything else
/// would make every later join silently wrong.
pub(crate) fn parse_host(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Authenticated request executor bound to one controller host.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    host: Url,
    /// Headers added per request. Empty when the client was built with
    /// them as defaults.
    request_headers: HeaderMap,
    cancel: Option<CancellationToken>,
}

impl Transport {
    /// Build from an API key and transport config.
    pub fn from_api_key(
        host: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let host = parse_host(host)?;
        let http = config.build_client(api_key)?;
        Ok(Self {
            http,
            host,
            request_headers: HeaderMap::new(),
            cancel: None,
        })
    }

    /// Wrap an existing `reqwest::Client`; auth headers are attached per request.
    pub fn from_reqwest(
        host: &str,
        api_key: &SecretString,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let host = parse_host(host)?;
        Ok(Self {
            http,
            host,
            request_headers: auth_headers(api_key)?,
            cancel: None,
        })
    }

    /// Race every exchange against `token`.
    pub fn set_cancellation(&mut self, token: CancellationToken) {
        self.cancel = Some(token);
    }

    /// The controller host this transport talks to.
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// host + `/proxy/network/integrations` + endpoint path.
    pub fn url(&self, endpoint: &Endpoint<'_>) -> Result<Url, Error> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(API_BASE_PATH)
            .extend(endpoint.segments());
        Ok(url)
    }

    /// Execute one request and return the full body of a `200 OK` response.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &Endpoint<'_>,
        params: &[(&str, String)],
    ) -> Result<Bytes, Error> {
        let url = self.url(endpoint)?;
        debug!("{method} {url} params={params:?}");

        let mut request = self
            .http
            .request(method, url)
            .headers(self.request_headers.clone());
        if !params.is_empty() {
            // Keys go out sorted, the same encoding controllers already see
            // from other Integration API clients.
            let mut query = params.to_vec();
            query.sort_by(|a, b| a.0.cmp(b.0));
            request = request.query(&query);
        }

        let exchange = async move {
            let resp = request.send().await?;
            let status = resp.status();
            if status != StatusCode::OK {
                debug!(status = status.as_u16(), "rejecting non-200 response");
                return Err(Error::UnexpectedStatus {
                    status: status.as_u16(),
                });
            }
            Ok(resp.bytes().await?)
        };

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(Error::Cancelled),
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }

    /// `GET` shorthand for [`execute`](Self::execute).
    pub async fn get(
        &self,
        endpoint: &Endpoint<'_>,
        params: &[(&str, String)],
    ) -> Result<Bytes, Error> {
        self.execute(Method::GET, endpoint, params).await
    }
}
