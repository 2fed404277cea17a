// Endpoint catalogue for the Integration API.
//
// Every path lives under `/proxy/network/integrations`. Scoped endpoints
// repeat their identifiers as query parameters; controllers in the field
// have been seen to expect both forms, so both are always sent.

/// Fixed prefix between the controller host and every endpoint path.
pub const API_BASE_PATH: [&str; 3] = ["proxy", "network", "integrations"];

/// API version segment shared by all endpoints.
const VERSION: &str = "v1";

/// One readable resource on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /v1/info`
    Info,
    /// `GET /v1/sites`
    Sites,
    /// `GET /v1/sites/{siteId}/clients`
    SiteClients { site_id: &'a str },
    /// `GET /v1/sites/{siteId}/devices`
    SiteDevices { site_id: &'a str },
    /// `GET /v1/sites/{siteId}/devices/{deviceId}`
    DeviceDetail { site_id: &'a str, device_id: &'a str },
}

impl<'a> Endpoint<'a> {
    /// Path segments after [`API_BASE_PATH`], unescaped.
    ///
    /// Identifiers are kept whole so the URL builder can percent-encode
    /// each one as a single segment.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::Info => vec![VERSION, "info"],
            Self::Sites => vec![VERSION, "sites"],
            Self::SiteClients { site_id } => vec![VERSION, "sites", site_id, "clients"],
            Self::SiteDevices { site_id } => vec![VERSION, "sites", site_id, "devices"],
            Self::DeviceDetail { site_id, device_id } => {
                vec![VERSION, "sites", site_id, "devices", device_id]
            }
        }
    }

    /// Scoping query parameters. The transport sorts the final query by key.
    pub fn scope_params(&self) -> Vec<(&'static str, String)> {
        match *self {
            Self::Info | Self::Sites => Vec::new(),
            Self::SiteClients { site_id } | Self::SiteDevices { site_id } => {
                vec![("siteId", site_id.to_owned())]
            }
            Self::DeviceDetail { site_id, device_id } => vec![
                ("siteId", site_id.to_owned()),
                ("deviceId", device_id.to_owned()),
            ],
        }
    }

    /// Whether the endpoint answers with a paginated envelope.
    pub fn is_paginated(&self) -> bool {
        matches!(
            self,
            Self::Sites | Self::SiteClients { .. } | Self::SiteDevices { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_endpoints_repeat_identifiers_in_query() {
        let ep = Endpoint::DeviceDetail {
            site_id: "site-1",
            device_id: "dev-9",
        };
        assert_eq!(
            ep.segments(),
            vec!["v1", "sites", "site-1", "devices", "dev-9"]
        );
        assert_eq!(
            ep.scope_params(),
            vec![
                ("siteId", "site-1".to_owned()),
                ("deviceId", "dev-9".to_owned())
            ]
        );
        assert!(!ep.is_paginated());
    }

    #[test]
    fn site_listing_has_no_scope() {
        assert!(Endpoint::Sites.scope_params().is_empty());
        assert!(Endpoint::Sites.is_paginated());
        assert!(!Endpoint::Info.is_paginated());
        assert_eq!(
            Endpoint::SiteClients { site_id: "s" }.scope_params(),
            vec![("siteId", "s".to_owned())]
        );
    }
}
