//! Response types for the read-only Integration API endpoints.
//!
//! Decoding is purely structural. Absent or `null` fields fall back to
//! their zero value (empty string, `0`, `false`, `None`); only JSON that
//! does not fit the shape at all is an error.

use std::collections::HashMap;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Decoding helpers ─────────────────────────────────────────────────

/// Treat `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// IP address that may be absent, `null`, or the empty string.
fn optional_ip<'de, D>(deserializer: D) -> Result<Option<IpAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ── Pagination ───────────────────────────────────────────────────────

/// Envelope returned by every list endpoint.
///
/// `count` describes this page only; `total_count` is the size of the
/// whole result set and is taken as-is, even when negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    default,
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Page<T> {
    #[serde(deserialize_with = "null_default")]
    pub offset: i64,
    #[serde(deserialize_with = "null_default")]
    pub limit: i32,
    #[serde(deserialize_with = "null_default")]
    pub count: i32,
    #[serde(deserialize_with = "null_default")]
    pub total_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub data: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 0,
            count: 0,
            total_count: 0,
            data: Vec::new(),
        }
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// Controller application info — from `GET /v1/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerInfo {
    #[serde(deserialize_with = "null_default")]
    pub application_version: String,
}

// ── Sites ────────────────────────────────────────────────────────────

/// Site overview — from `GET /v1/sites`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Site {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

// ── Clients ──────────────────────────────────────────────────────────

/// Connected client — from `GET /v1/sites/{siteId}/clients`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub connected_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "optional_ip")]
    pub ip_address: Option<IpAddr>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Adopted device overview — from `GET /v1/sites/{siteId}/devices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub model: String,
    #[serde(deserialize_with = "null_default")]
    pub mac_address: String,
    #[serde(deserialize_with = "optional_ip")]
    pub ip_address: Option<IpAddr>,
    /// Free-form, e.g. `ONLINE`, `OFFLINE`, `UPDATING`.
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    /// Capability tags such as `switching` or `accessPoint`.
    #[serde(deserialize_with = "null_default")]
    pub features: Vec<String>,
    /// Interface kinds such as `ports` or `radios`.
    #[serde(deserialize_with = "null_default")]
    pub interfaces: Vec<String>,
}

/// Full device detail — from `GET /v1/sites/{siteId}/devices/{deviceId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FullDevice {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub model: String,
    #[serde(deserialize_with = "null_default")]
    pub supported: bool,
    #[serde(deserialize_with = "null_default")]
    pub mac_address: String,
    #[serde(deserialize_with = "optional_ip")]
    pub ip_address: Option<IpAddr>,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub firmware_version: String,
    #[serde(deserialize_with = "null_default")]
    pub firmware_updatable: bool,
    pub adopted_at: Option<DateTime<Utc>>,
    pub provisioned_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_default")]
    pub configuration_id: String,
    pub uplink: Option<DeviceUplink>,
    pub features: Option<DeviceFeatures>,
    pub interfaces: Option<DeviceInterfaces>,
}

impl FullDevice {
    /// Identifier of the device this one uplinks to, if any.
    pub fn uplink_device_id(&self) -> Option<&str> {
        self.uplink
            .as_ref()
            .map(|u| u.device_id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Physical ports in controller order (empty when not reported).
    pub fn ports(&self) -> &[DevicePort] {
        self.interfaces
            .as_ref()
            .map(|i| i.ports.as_slice())
            .unwrap_or_default()
    }

    /// Radios in controller order (empty when not reported).
    pub fn radios(&self) -> &[DeviceRadio] {
        self.interfaces
            .as_ref()
            .map(|i| i.radios.as_slice())
            .unwrap_or_default()
    }
}

/// Reference to the upstream device, by identifier only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceUplink {
    #[serde(deserialize_with = "null_default")]
    pub device_id: String,
}

/// Capability blocks. Their schema differs per device class, so each is
/// kept as the raw JSON the controller sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switching: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_point: Option<Value>,
}

impl DeviceFeatures {
    /// Names of the capability blocks present, in a fixed order.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        if self.switching.is_some() {
            kinds.push("switching");
        }
        if self.access_point.is_some() {
            kinds.push("accessPoint");
        }
        kinds
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceInterfaces {
    #[serde(deserialize_with = "null_default")]
    pub ports: Vec<DevicePort>,
    #[serde(deserialize_with = "null_default")]
    pub radios: Vec<DeviceRadio>,
}

/// One physical port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePort {
    #[serde(rename = "idx", deserialize_with = "null_default")]
    pub index: i32,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    /// Connector type, e.g. `RJ45` or `SFPPLUS`.
    #[serde(deserialize_with = "null_default")]
    pub connector: String,
    #[serde(deserialize_with = "null_default")]
    pub max_speed_mbps: i32,
    #[serde(deserialize_with = "null_default")]
    pub speed_mbps: i32,
}

/// One wireless radio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRadio {
    #[serde(deserialize_with = "null_default")]
    pub wlan_standard: String,
    #[serde(rename = "frequencyGHz", deserialize_with = "null_default")]
    pub frequency_ghz: f64,
    #[serde(rename = "channelWidthMHz", deserialize_with = "null_default")]
    pub channel_width_mhz: i32,
    #[serde(deserialize_with = "null_default")]
    pub channel: i32,
}

// ── Topology ─────────────────────────────────────────────────────────

/// Child → parent lookup table built from device details.
///
/// Devices without an uplink (gateways, unreported links) are omitted.
pub fn uplink_index(devices: &[FullDevice]) -> HashMap<String, String> {
    devices
        .iter()
        .filter_map(|d| {
            d.uplink_device_id()
                .map(|parent| (d.id.clone(), parent.to_owned()))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn switch_detail() -> Value {
        json!({
            "id": "dev-sw",
            "name": "USW-Pro-24",
            "model": "USPPDUP",
            "supported": true,
            "macAddress": "aa:bb:cc:dd:ee:ff",
            "ipAddress": "192.168.1.10",
            "state": "ONLINE",
            "firmwareVersion": "7.1.26",
            "firmwareUpdatable": true,
            "adoptedAt": "2024-01-01T10:00:00Z",
            "provisionedAt": "2024-02-03T04:05:06Z",
            "configurationId": "cfg-42",
            "uplink": { "deviceId": "dev-gw" },
            "features": { "switching": { "stp": { "state": "FORWARDING" } } },
            "interfaces": {
                "ports": [
                    { "idx": 2, "state": "UP", "connector": "RJ45", "maxSpeedMbps": 1000, "speedMbps": 100 },
                    { "idx": 1, "state": "DOWN", "connector": "SFPPLUS", "maxSpeedMbps": 10000, "speedMbps": 0 }
                ],
                "radios": [
                    { "wlanStandard": "802.11ax", "frequencyGHz": 5.0, "channelWidthMHz": 80, "channel": 36 },
                    { "wlanStandard": "802.11n", "frequencyGHz": 2.4, "channelWidthMHz": 20, "channel": 6 }
                ]
            }
        })
    }

    #[test]
    fn full_device_decodes_every_scalar() {
        let device: FullDevice = serde_json::from_value(switch_detail()).unwrap();

        assert_eq!(device.id, "dev-sw");
        assert_eq!(device.name, "USW-Pro-24");
        assert_eq!(device.model, "USPPDUP");
        assert!(device.supported);
        assert_eq!(device.mac_address, "aa:bb:cc:dd:ee:ff");
        assert_eq!(device.ip_address, Some("192.168.1.10".parse().unwrap()));
        assert_eq!(device.state, "ONLINE");
        assert_eq!(device.firmware_version, "7.1.26");
        assert!(device.firmware_updatable);
        assert_eq!(
            device.adopted_at.unwrap().to_rfc3339(),
            "2024-01-01T10:00:00+00:00"
        );
        assert_eq!(
            device.provisioned_at.unwrap().to_rfc3339(),
            "2024-02-03T04:05:06+00:00"
        );
        assert_eq!(device.configuration_id, "cfg-42");
        assert_eq!(device.uplink_device_id(), Some("dev-gw"));
    }

    #[test]
    fn full_device_preserves_port_and_radio_order() {
        let device: FullDevice = serde_json::from_value(switch_detail()).unwrap();

        let ports: Vec<i32> = device.ports().iter().map(|p| p.index).collect();
        assert_eq!(ports, vec![2, 1]);
        assert_eq!(device.ports()[1].connector, "SFPPLUS");
        assert_eq!(device.ports()[1].max_speed_mbps, 10000);
        assert_eq!(device.ports()[0].speed_mbps, 100);

        let channels: Vec<i32> = device.radios().iter().map(|r| r.channel).collect();
        assert_eq!(channels, vec![36, 6]);
        assert_eq!(device.radios()[1].wlan_standard, "802.11n");
        assert!((device.radios()[1].frequency_ghz - 2.4).abs() < f64::EPSILON);
        assert_eq!(device.radios()[0].channel_width_mhz, 80);
    }

    #[test]
    fn full_device_survives_reencoding() {
        let device: FullDevice = serde_json::from_value(switch_detail()).unwrap();
        let encoded = serde_json::to_vec(&device).unwrap();
        let decoded: FullDevice = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, device);
    }

    #[test]
    fn features_block_is_kept_verbatim() {
        let device: FullDevice = serde_json::from_value(switch_detail()).unwrap();
        let features = device.features.unwrap();
        assert_eq!(features.kinds(), vec!["switching"]);
        assert_eq!(
            features.switching.unwrap(),
            json!({ "stp": { "state": "FORWARDING" } })
        );
        assert!(features.access_point.is_none());
    }

    #[test]
    fn missing_and_null_fields_fall_back_to_zero_values() {
        let device: FullDevice = serde_json::from_value(json!({
            "id": "dev-1",
            "name": null,
            "ipAddress": "",
            "interfaces": { "ports": null }
        }))
        .unwrap();

        assert_eq!(device.id, "dev-1");
        assert_eq!(device.name, "");
        assert!(!device.supported);
        assert!(device.ip_address.is_none());
        assert!(device.adopted_at.is_none());
        assert!(device.uplink_device_id().is_none());
        assert!(device.ports().is_empty());
        assert!(device.radios().is_empty());
    }

    #[test]
    fn invalid_ip_address_is_rejected() {
        let result = serde_json::from_value::<Client>(json!({ "ipAddress": "999.1.1.1" }));
        assert!(result.is_err());
    }

    #[test]
    fn page_accepts_negative_total_and_null_data() {
        let page: Page<Site> = serde_json::from_value(json!({
            "offset": 0,
            "limit": 25,
            "count": 0,
            "totalCount": -1,
            "data": null
        }))
        .unwrap();
        assert_eq!(page.total_count, -1);
        assert!(page.data.is_empty());
    }

    #[test]
    fn device_tags_decode_in_order() {
        let device: Device = serde_json::from_value(json!({
            "id": "d",
            "macAddress": "00:11:22:33:44:55",
            "ipAddress": "fe80::1",
            "features": ["switching", "accessPoint"],
            "interfaces": ["ports", "radios"]
        }))
        .unwrap();
        assert_eq!(device.features, vec!["switching", "accessPoint"]);
        assert_eq!(device.interfaces, vec!["ports", "radios"]);
        assert!(device.ip_address.unwrap().is_ipv6());
    }

    #[test]
    fn uplink_index_maps_children_to_parents() {
        let gateway = FullDevice {
            id: "gw".into(),
            ..FullDevice::default()
        };
        let switch = FullDevice {
            id: "sw".into(),
            uplink: Some(DeviceUplink {
                device_id: "gw".into(),
            }),
            ..FullDevice::default()
        };
        let ap = FullDevice {
            id: "ap".into(),
            uplink: Some(DeviceUplink {
                device_id: "sw".into(),
            }),
            ..FullDevice::default()
        };

        let index = uplink_index(&[gateway, switch, ap]);
        assert_eq!(index.len(), 2);
        assert_eq!(index["sw"], "gw");
        assert_eq!(index["ap"], "sw");
    }
}
