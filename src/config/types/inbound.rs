//! Inbound listener configuration types.

use serde::{Deserialize, Serialize};

use super::common::{is_false, is_zero_u16, User};
use super::stream::StreamConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Inbound {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub listen: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(skip_serializing_if = "is_zero_u16")]
    pub port: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sniffing: Option<SniffingSettings>,
    pub settings: InboundSettings,
    pub stream_settings: StreamConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SniffingSettings {
    #[serde(skip_serializing_if = "is_false")]
    pub enable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dest_override: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<User>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_insecure_encryption: bool,
}
