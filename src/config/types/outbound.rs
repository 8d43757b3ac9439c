//! Outbound (egress target) configuration types.

use serde::{Deserialize, Serialize};

use super::common::User;
use super::stream::StreamConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Outbound {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    pub settings: OutboundSettings,
    pub stream_settings: StreamConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutboundSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vnext: Vec<Vnext>,
}

/// A remote vmess server entry for an outbound.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Vnext {
    pub address: String,
    pub port: u16,
    pub users: Vec<User>,
}
