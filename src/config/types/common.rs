//! Shared document pieces (log, policy, user) and serde skip helpers.
//!
//! The external tool's encoder omits zero-valued fields, so the serialize
//! attributes here mirror that with `skip_serializing_if`.

use serde::{Deserialize, Serialize};

pub fn is_false(b: &bool) -> bool {
    !*b
}

pub fn is_zero_u16(n: &u16) -> bool {
    *n == 0
}

pub fn is_zero_u32(n: &u32) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Log {
    pub access: String,
    pub error: String,
    pub loglevel: String,
}

/// Present in the schema as an always-empty object.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct States {}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Policy {
    pub system: SystemPolicy,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemPolicy {
    #[serde(skip_serializing_if = "is_false")]
    pub stats_inbound_uplink: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub stats_inbound_downlink: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub level: u32,
    #[serde(rename = "alterId", skip_serializing_if = "is_zero_u32")]
    pub alter_id: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub security: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_skips_zero_fields() {
        let user = User {
            id: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":"abc"}"#);
    }

    #[test]
    fn test_user_full_field_names() {
        let user = User {
            id: "abc".to_string(),
            level: 1,
            alter_id: 64,
            security: "auto".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":"abc","level":1,"alterId":64,"security":"auto"}"#
        );
    }
}
