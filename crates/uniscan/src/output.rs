//! Output formatting: plain, table, JSON.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::report::{DeviceReport, Report};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Updatable")]
    updatable: String,
}

fn rows(report: &Report) -> Vec<InventoryRow> {
    let mut rows = Vec::new();
    for site in &report.sites {
        for d in site.devices.iter().flatten() {
            rows.push(InventoryRow {
                site: site.site.name.clone(),
                kind: "device",
                name: d.device.name.clone(),
                model: d.device.model.clone(),
                state: d.device.state.clone(),
                ip: d.device.ip_address.map(|ip| ip.to_string()).unwrap_or_default(),
                updatable: d
                    .detail
                    .as_ref()
                    .map(|full| full.firmware_updatable.to_string())
                    .unwrap_or_default(),
            });
        }
        for c in site.clients.iter().flatten() {
            rows.push(InventoryRow {
                site: site.site.name.clone(),
                kind: "client",
                name: c.name.clone(),
                model: String::new(),
                state: c
                    .connected_at
                    .map(|t| format!("since {}", t.format("%Y-%m-%d %H:%M")))
                    .unwrap_or_default(),
                ip: c.ip_address.map(|ip| ip.to_string()).unwrap_or_default(),
                updatable: String::new(),
            });
        }
        if site.devices.is_none() && site.clients.is_none() {
            rows.push(InventoryRow {
                site: site.site.name.clone(),
                kind: "site",
                name: site.site.id.clone(),
                model: String::new(),
                state: String::new(),
                ip: String::new(),
                updatable: String::new(),
            });
        }
    }
    rows
}

// ── Renderers ───────────────────────────────────────────────────────

pub fn render(format: &OutputFormat, report: &Report) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(render_plain(report)),
        OutputFormat::Table => Ok(format!(
            "Controller: {}\n{}",
            report.controller.application_version,
            Table::new(rows(report)).with(Style::rounded())
        )),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

fn device_line(d: &DeviceReport) -> String {
    let base = format!(
        "  * Device: {}, {}, {}",
        d.device.name, d.device.model, d.device.state
    );
    match d.detail {
        Some(ref full) => format!("{base}, Updatable({})", full.firmware_updatable),
        None => base,
    }
}

fn render_plain(report: &Report) -> String {
    let mut lines = vec![format!(
        "Controller: {}",
        report.controller.application_version
    )];
    for site in &report.sites {
        lines.push(format!("Site: {}", site.site.name));
        lines.extend(site.devices.iter().flatten().map(device_line));
        lines.extend(
            site.clients
                .iter()
                .flatten()
                .map(|c| format!("  * Client: {}", c.name)),
        );
    }
    lines.join("\n")
}

/// Write to stdout, ignoring broken pipes.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uniscan_api::{Client, ControllerInfo, Device, FullDevice, Site};

    use super::*;
    use crate::report::SiteReport;

    fn sample() -> Report {
        Report {
            controller: ControllerInfo {
                application_version: "9.0.114".into(),
            },
            sites: vec![SiteReport {
                site: Site {
                    id: "s1".into(),
                    name: "Default".into(),
                },
                devices: Some(vec![
                    DeviceReport {
                        device: Device {
                            name: "Gateway".into(),
                            model: "UCG-Ultra".into(),
                            state: "ONLINE".into(),
                            ..Device::default()
                        },
                        detail: Some(FullDevice {
                            firmware_updatable: true,
                            ..FullDevice::default()
                        }),
                    },
                    DeviceReport {
                        device: Device {
                            name: "AP".into(),
                            model: "U6-Lite".into(),
                            state: "OFFLINE".into(),
                            ..Device::default()
                        },
                        detail: None,
                    },
                ]),
                clients: Some(vec![Client {
                    name: "laptop".into(),
                    ..Client::default()
                }]),
            }],
        }
    }

    #[test]
    fn plain_output_lists_everything_in_order() {
        let out = render(&OutputFormat::Plain, &sample()).unwrap();
        assert_eq!(
            out,
            "Controller: 9.0.114\n\
             Site: Default\n  \
             * Device: Gateway, UCG-Ultra, ONLINE, Updatable(true)\n  \
             * Device: AP, U6-Lite, OFFLINE\n  \
             * Client: laptop"
        );
    }

    #[test]
    fn table_output_has_one_row_per_item() {
        let out = render(&OutputFormat::Table, &sample()).unwrap();
        assert!(out.starts_with("Controller: 9.0.114\n"));
        assert!(out.contains("Gateway"));
        assert!(out.contains("laptop"));
        assert!(out.contains("Updatable"));
    }

    #[test]
    fn json_output_omits_unrequested_listings() {
        let mut report = sample();
        report.sites[0].clients = None;
        let out = render(&OutputFormat::Json, &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["controller"]["applicationVersion"], "9.0.114");
        assert_eq!(value["sites"][0]["name"], "Default");
        assert!(value["sites"][0].get("clients").is_none());
        assert_eq!(value["sites"][0]["devices"][0]["detail"]["firmwareUpdatable"], true);
    }
}
