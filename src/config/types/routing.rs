//! Routing rule and balancer configuration types.

use serde::{Deserialize, Serialize};

use super::network::Network;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Routing {
    pub rules: Vec<RoutingRule>,
    pub balancers: Vec<RoutingBalancer>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingRule {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub rule_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inbound_tag: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub balancer_tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub outbound_tag: String,
}

impl RoutingRule {
    /// An empty rule of the only match type the schema defines.
    pub fn field() -> Self {
        RoutingRule {
            rule_type: "field".to_string(),
            ..Default::default()
        }
    }
}

/// A named group of outbounds selected by tag prefix.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutingBalancer {
    pub tag: String,
    pub selector: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_serializes_only_set_fields() {
        let rule = RoutingRule {
            ip: vec!["geoip:cn".to_string()],
            outbound_tag: "freedom".to_string(),
            ..RoutingRule::field()
        };
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"type":"field","ip":["geoip:cn"],"outboundTag":"freedom"}"#
        );
    }
}
