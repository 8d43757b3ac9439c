//! Subscription blob: shareable `vmess://` URLs for every reachable
//! (endpoint, network) pair, base64-encoded as one newline-joined list.

use base64::engine::{general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::{Network, User, QUERY_PATH};
use crate::descriptor::Endpoint;

/// The JSON payload of a `vmess://` URL. All fields are strings per the
/// de-facto subscription format; field order fixes the emitted JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct VmessUrl {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub v: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub add: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ps: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<Network>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub aid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub url_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl VmessUrl {
    /// Serializes the payload and wraps it as `vmess://<base64 json>`.
    pub fn encode(&self) -> std::io::Result<String> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        Ok(format!("vmess://{}", STANDARD.encode(json)))
    }
}

fn create_url(endpoint: &Endpoint, network: Network, user: &User) -> VmessUrl {
    VmessUrl {
        v: "2".to_string(),
        add: endpoint.ip.clone(),
        port: endpoint.port_for(network).to_string(),
        ps: endpoint.label().to_string(),
        net: Some(network),
        id: user.id.clone(),
        aid: user.alter_id.to_string(),
        tls: "tls".to_string(),
        url_type: "none".to_string(),
        path: QUERY_PATH.to_string(),
        ..Default::default()
    }
}

/// Builds the subscription blob: one URL per (endpoint, network) pair,
/// newline-joined and base64-encoded.
pub fn subscription(
    endpoints: &[Endpoint],
    networks: &[Network],
    user: &User,
) -> std::io::Result<String> {
    let mut urls = Vec::with_capacity(endpoints.len() * networks.len());
    for endpoint in endpoints {
        for &network in networks {
            urls.push(create_url(endpoint, network, user).encode()?);
        }
    }
    Ok(STANDARD.encode(urls.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "b2a40065-715c-4eca-a691-6c7b10f4c45e".to_string(),
            level: 1,
            alter_id: 64,
            security: "auto".to_string(),
        }
    }

    fn test_endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint {
                ip: "relay.example.com".to_string(),
                location: "us".to_string(),
                ..Default::default()
            },
            Endpoint {
                ip: "10.0.0.2".to_string(),
                ..Default::default()
            },
        ]
    }

    fn decode_urls(blob: &str) -> Vec<VmessUrl> {
        let joined = STANDARD.decode(blob).unwrap();
        String::from_utf8(joined)
            .unwrap()
            .lines()
            .map(|line| {
                let payload = line.strip_prefix("vmess://").expect("vmess:// prefix");
                let json = STANDARD.decode(payload).unwrap();
                serde_json::from_slice(&json).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_one_url_per_endpoint_and_network() {
        let networks = [Network::Ws, Network::Kcp];
        let blob = subscription(&test_endpoints(), &networks, &test_user()).unwrap();
        let urls = decode_urls(&blob);
        assert_eq!(urls.len(), 4);

        let mut pairs: Vec<(String, Network)> = urls
            .iter()
            .map(|u| (u.add.clone(), u.net.unwrap()))
            .collect();
        pairs.sort();
        let mut expected = vec![
            ("relay.example.com".to_string(), Network::Ws),
            ("relay.example.com".to_string(), Network::Kcp),
            ("10.0.0.2".to_string(), Network::Ws),
            ("10.0.0.2".to_string(), Network::Kcp),
        ];
        expected.sort();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_url_fields() {
        let user = test_user();
        let blob = subscription(&test_endpoints(), &[Network::Ws], &user).unwrap();
        let urls = decode_urls(&blob);
        let url = &urls[0];
        assert_eq!(url.v, "2");
        assert_eq!(url.id, user.id);
        assert_eq!(url.aid, "64");
        assert_eq!(url.port, "443");
        assert_eq!(url.tls, "tls");
        assert_eq!(url.url_type, "none");
        assert_eq!(url.path, "/test");
        assert_eq!(urls[0].ps, "us");
        // ps falls back to the address when no location is set.
        assert_eq!(urls[1].ps, "10.0.0.2");
    }

    #[test]
    fn test_url_port_override() {
        let mut endpoints = test_endpoints();
        endpoints[0].ports.insert(Network::Ws, 8443);
        let blob = subscription(&endpoints, &[Network::Ws], &test_user()).unwrap();
        let urls = decode_urls(&blob);
        assert_eq!(urls[0].port, "8443");
        assert_eq!(urls[1].port, "443");
    }

    #[test]
    fn test_empty_endpoints_give_empty_blob() {
        let blob = subscription(&[], &[Network::Ws], &test_user()).unwrap();
        assert_eq!(STANDARD.decode(blob).unwrap(), b"");
    }
}
