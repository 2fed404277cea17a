//! Walks the controller in the order the output is printed: info, then
//! each site with its devices (optionally with details) and clients.

use serde::Serialize;
use tracing::info;

use uniscan_api::{Client, Controller, ControllerInfo, Device, Error, FullDevice, Site};

/// Which per-site listings to fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub devices: bool,
    pub device_details: bool,
    pub clients: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub controller: ControllerInfo,
    pub sites: Vec<SiteReport>,
}

#[derive(Debug, Serialize)]
pub struct SiteReport {
    #[serde(flatten)]
    pub site: Site,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<DeviceReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Client>>,
}

#[derive(Debug, Serialize)]
pub struct DeviceReport {
    #[serde(flatten)]
    pub device: Device,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<FullDevice>,
}

/// Gather everything `selection` asks for. The first error aborts the run.
pub async fn collect(controller: &Controller, selection: Selection) -> Result<Report, Error> {
    let info = controller.get_info().await?;
    let sites = controller.list_sites().await?;
    info!(
        version = %info.application_version,
        sites = sites.len(),
        "connected to controller"
    );

    let mut reports = Vec::with_capacity(sites.len());
    for site in sites {
        let devices = if selection.devices {
            Some(collect_devices(controller, &site.id, selection.device_details).await?)
        } else {
            None
        };
        let clients = if selection.clients {
            Some(controller.list_clients(&site.id).await?)
        } else {
            None
        };
        reports.push(SiteReport {
            site,
            devices,
            clients,
        });
    }

    Ok(Report {
        controller: info,
        sites: reports,
    })
}

async fn collect_devices(
    controller: &Controller,
    site_id: &str,
    with_details: bool,
) -> Result<Vec<DeviceReport>, Error> {
    let devices = controller.list_devices(site_id).await?;
    let mut reports = Vec::with_capacity(devices.len());
    for device in devices {
        let detail = if with_details {
            Some(controller.get_device_detail(site_id, &device.id).await?)
        } else {
            None
        };
        reports.push(DeviceReport { device, detail });
    }
    Ok(reports)
}
