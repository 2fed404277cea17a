// Controller client: one method per readable resource.
//
// List endpoints go through the paginator; singular endpoints are exactly
// one request. The client holds only immutable configuration, so a shared
// reference can serve any number of concurrent callers.

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug_span, info_span};
use url::Url;

use crate::decode::decode;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{Client, ControllerInfo, Device, FullDevice, Page, Site};
use crate::pagination::Paginator;
use crate::transport::{Transport, TransportConfig};

/// Async client for a UniFi controller's Integration API.
///
/// Authenticates every request with a static API key. Logging goes to the
/// span supplied at construction (see [`with_span`](Self::with_span)), so
/// callers decide where controller traffic is reported.
#[derive(Debug, Clone)]
pub struct Controller {
    transport: Transport,
    paginator: Paginator,
    span: Span,
}

impl Controller {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build with default transport settings.
    pub fn new(host: &str, api_key: &SecretString) -> Result<Self, Error> {
        Self::from_api_key(host, api_key, &TransportConfig::default())
    }

    /// Build from an API key and transport config.
    ///
    /// `host` is the controller root, e.g. `https://192.168.1.1`.
    pub fn from_api_key(
        host: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Transport::from_api_key(host, api_key, transport).map(Self::with_transport)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        host: &str,
        api_key: &SecretString,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Transport::from_reqwest(host, api_key, http).map(Self::with_transport)
    }

    pub fn with_transport(transport: Transport) -> Self {
        let span = info_span!("controller", host = %transport.host());
        Self {
            transport,
            paginator: Paginator::default(),
            span,
        }
    }

    /// Replace the page size / page budget used by list operations.
    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Report all controller traffic under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Abort in-flight requests with [`Error::Cancelled`] once `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.transport.set_cancellation(token);
        self
    }

    pub fn host(&self) -> &Url {
        self.transport.host()
    }

    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.transport.get(&endpoint, params).await?;
        decode(&body)
    }

    /// Aggregate every page of a list endpoint.
    async fn list<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<Vec<T>, Error> {
        debug_assert!(endpoint.is_paginated(), "{endpoint:?} is not a listing");
        let scope = endpoint.scope_params();
        self.paginator
            .collect(|offset, limit| {
                let mut params = scope.clone();
                params.push(("offset", offset.to_string()));
                params.push(("limit", limit.to_string()));
                async move { self.fetch::<Page<T>>(endpoint, &params).await }
            })
            .await
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Controller application version.
    pub async fn get_info(&self) -> Result<ControllerInfo, Error> {
        self.fetch(Endpoint::Info, &[])
            .instrument(debug_span!(parent: &self.span, "get_info"))
            .await
    }

    /// All sites visible to the API key, in controller order.
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        self.list(Endpoint::Sites)
            .instrument(debug_span!(parent: &self.span, "list_sites"))
            .await
    }

    /// All clients connected to `site_id`, in controller order.
    pub async fn list_clients(&self, site_id: &str) -> Result<Vec<Client>, Error> {
        self.list(Endpoint::SiteClients { site_id })
            .instrument(debug_span!(parent: &self.span, "list_clients", site_id))
            .await
    }

    /// All devices adopted by `site_id`, in controller order.
    pub async fn list_devices(&self, site_id: &str) -> Result<Vec<Device>, Error> {
        self.list(Endpoint::SiteDevices { site_id })
            .instrument(debug_span!(parent: &self.span, "list_devices", site_id))
            .await
    }

    /// Full detail for one device. Always a single request.
    pub async fn get_device_detail(
        &self,
        site_id: &str,
        device_id: &str,
    ) -> Result<FullDevice, Error> {
        let endpoint = Endpoint::DeviceDetail { site_id, device_id };
        debug_assert!(!endpoint.is_paginated());
        let params = endpoint.scope_params();
        self.fetch(endpoint, &params)
            .instrument(debug_span!(
                parent: &self.span,
                "get_device_detail",
                site_id,
                device_id
            ))
            .await
    }
}
