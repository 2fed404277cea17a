// uniscan-api: async client for the read-only UniFi Network Integration API
//
// Layering, leaves first: `transport` (URL join + API-key header + one
// exchange), `decode` (body → typed shape), `pagination` (offset/limit
// aggregation), and the `Controller` facade composing them.

pub mod controller;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod pagination;
pub mod transport;

pub use controller::Controller;
pub use endpoint::Endpoint;
pub use error::Error;
pub use models::{
    Client, ControllerInfo, Device, DeviceFeatures, DeviceInterfaces, DevicePort, DeviceRadio,
    DeviceUplink, FullDevice, Page, Site, uplink_index,
};
pub use pagination::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, Paginator};
pub use transport::{TlsMode, Transport, TransportConfig};

// Re-exported so callers can build keys and tokens without extra deps.
pub use secrecy::SecretString;
pub use tokio_util::sync::CancellationToken;
