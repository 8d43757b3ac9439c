//! The user-supplied input descriptor: one user identity plus lists of
//! relay endpoints.

use std::collections::BTreeMap;

use log::warn;
use serde::Deserialize;

use crate::config::{Network, User};

/// Default remote port for tunnel outbounds and subscription URLs, unless an
/// endpoint overrides it for a specific network.
pub const DEFAULT_ENDPOINT_PORT: u16 = 443;

/// The parsed descriptor file.
///
/// The schema drifted across generations of the original tool; both the
/// `user`-as-id-string and `client`-as-object shapes are accepted, and every
/// field falls back to its zero value when missing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Descriptor {
    #[serde(alias = "client")]
    pub user: UserSpec,
    pub tunnels: Vec<Endpoint>,
    pub vpses: Vec<Endpoint>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UserSpec {
    Id(String),
    Full(User),
}

impl Default for UserSpec {
    fn default() -> Self {
        UserSpec::Id(String::new())
    }
}

/// A single remote relay host.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoint {
    #[serde(alias = "address")]
    pub ip: String,
    pub location: String,
    pub cloud: String,
    /// Optional per-network port overrides. BTreeMap keeps iteration
    /// deterministic.
    pub ports: BTreeMap<Network, u16>,
}

impl Endpoint {
    pub fn port_for(&self, network: Network) -> u16 {
        self.ports
            .get(&network)
            .copied()
            .unwrap_or(DEFAULT_ENDPOINT_PORT)
    }

    /// Human-readable label for subscription entries.
    pub fn label(&self) -> &str {
        if self.location.is_empty() {
            &self.ip
        } else {
            &self.location
        }
    }
}

impl Descriptor {
    /// Loads the descriptor from a JSON file.
    ///
    /// An unreadable file is a hard error. A readable but malformed file is
    /// accepted with zero-valued defaults, matching the original behavior.
    pub fn load(path: &str) -> std::io::Result<Descriptor> {
        let bytes = std::fs::read(path).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Could not read descriptor file {path}: {e}"),
            )
        })?;

        let text = String::from_utf8(bytes).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Could not parse descriptor file {path} as UTF8: {e}"),
            )
        })?;

        match serde_json::from_str::<Descriptor>(&text) {
            Ok(descriptor) => Ok(descriptor),
            Err(e) => {
                warn!("Malformed descriptor file {path}, substituting zero-valued defaults: {e}");
                Ok(Descriptor::default())
            }
        }
    }

    /// Derives the user record, applying the original's defaults when only
    /// an id string was given.
    pub fn build_user(&self) -> User {
        match &self.user {
            UserSpec::Id(id) => User {
                id: id.clone(),
                level: 1,
                alter_id: 64,
                security: "auto".to_string(),
            },
            UserSpec::Full(user) => user.clone(),
        }
    }

    /// All reachable endpoints (tunnels first, then vpses), order preserved.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let mut endpoints = Vec::with_capacity(self.tunnels.len() + self.vpses.len());
        endpoints.extend(self.tunnels.iter().cloned());
        endpoints.extend(self.vpses.iter().cloned());
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_as_id_string() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"user": "b2a40065-715c-4eca-a691-6c7b10f4c45e"}"#).unwrap();
        let user = descriptor.build_user();
        assert_eq!(user.id, "b2a40065-715c-4eca-a691-6c7b10f4c45e");
        assert_eq!(user.level, 1);
        assert_eq!(user.alter_id, 64);
        assert_eq!(user.security, "auto");
    }

    #[test]
    fn test_client_as_full_object() {
        let descriptor: Descriptor = serde_json::from_str(
            r#"{"client": {"id": "abc", "level": 2, "alterId": 8, "security": "aes-128-gcm"}}"#,
        )
        .unwrap();
        let user = descriptor.build_user();
        assert_eq!(user.id, "abc");
        assert_eq!(user.level, 2);
        assert_eq!(user.alter_id, 8);
        assert_eq!(user.security, "aes-128-gcm");
    }

    #[test]
    fn test_missing_fields_get_zero_defaults() {
        let descriptor: Descriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(descriptor.build_user().id, "");
        assert!(descriptor.tunnels.is_empty());
        assert!(descriptor.vpses.is_empty());
        assert!(descriptor.endpoints().is_empty());
    }

    #[test]
    fn test_endpoint_port_override() {
        let endpoint: Endpoint = serde_json::from_str(
            r#"{"ip": "1.2.3.4", "location": "us", "ports": {"ws": 8443}}"#,
        )
        .unwrap();
        assert_eq!(endpoint.port_for(Network::Ws), 8443);
        assert_eq!(endpoint.port_for(Network::Kcp), DEFAULT_ENDPOINT_PORT);
    }

    #[test]
    fn test_endpoint_address_alias_and_label() {
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"address": "relay.example.com"}"#).unwrap();
        assert_eq!(endpoint.ip, "relay.example.com");
        assert_eq!(endpoint.label(), "relay.example.com");

        let located: Endpoint =
            serde_json::from_str(r#"{"ip": "1.2.3.4", "location": "us"}"#).unwrap();
        assert_eq!(located.label(), "us");
    }

    #[test]
    fn test_endpoints_preserves_tunnels_then_vpses_order() {
        let descriptor: Descriptor = serde_json::from_str(
            r#"{
                "tunnels": [{"ip": "10.0.0.1", "location": "hk"}],
                "vpses": [{"ip": "10.0.0.2", "location": "us"}, {"ip": "10.0.0.3", "location": "us"}]
            }"#,
        )
        .unwrap();
        let endpoints = descriptor.endpoints();
        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[0].ip, "10.0.0.1");
        assert_eq!(endpoints[1].ip, "10.0.0.2");
        assert_eq!(endpoints[2].ip, "10.0.0.3");
    }
}
