//! Stream (transport-layer) settings for inbounds and outbounds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::network::Network;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub security: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_settings: Option<HttpSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<TlsSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kcp_settings: Option<KcpSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WsSettings>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HttpSettings {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TlsSettings {
    #[serde(skip_serializing_if = "super::common::is_false")]
    pub allow_insecure: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WsSettings {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub headers: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KcpSettings {
    #[serde(skip_serializing_if = "super::common::is_zero_u32")]
    pub mtu: u32,
    #[serde(skip_serializing_if = "super::common::is_zero_u32")]
    pub tti: u32,
    #[serde(skip_serializing_if = "super::common::is_zero_u32")]
    pub uplink_capacity: u32,
    #[serde(skip_serializing_if = "super::common::is_zero_u32")]
    pub downlink_capacity: u32,
    #[serde(skip_serializing_if = "super::common::is_false")]
    pub congestion: bool,
    #[serde(skip_serializing_if = "super::common::is_zero_u32")]
    pub read_buffer_size: u32,
    #[serde(skip_serializing_if = "super::common::is_zero_u32")]
    pub write_buffer_size: u32,
    /// Opaque header obfuscation config, passed through as raw JSON.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub header: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream_serializes_to_empty_object() {
        let stream = StreamConfig::default();
        assert_eq!(serde_json::to_string(&stream).unwrap(), "{}");
    }

    #[test]
    fn test_stream_field_names() {
        let stream = StreamConfig {
            network: Some(Network::Ws),
            ws_settings: Some(WsSettings {
                path: "/test".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&stream).unwrap(),
            r#"{"network":"ws","wsSettings":{"path":"/test"}}"#
        );
    }
}
