//! Template filling: turns a user and a set of endpoints into complete
//! server-side and tunnel-side configuration documents.

use serde_json::json;

use crate::descriptor::Endpoint;

use super::types::{
    vmess_tag, Config, HttpSettings, Inbound, InboundSettings, KcpSettings, Log, Network, Outbound,
    OutboundSettings, Policy, Routing, RoutingBalancer, RoutingRule, SniffingSettings,
    StreamConfig, SystemPolicy, TlsSettings, User, Vnext, WsSettings,
};

/// Obfuscation path shared by the http and ws transports.
pub const QUERY_PATH: &str = "/test";

/// Default local listeners: one vmess inbound per (network, port) entry.
pub const DEFAULT_LISTENERS: &[(Network, u16)] = &[(Network::Ws, 22000)];

const LOCAL_HTTP_PORT: u16 = 1087;

pub fn http_stream() -> StreamConfig {
    StreamConfig {
        network: Some(Network::Http),
        security: "tls".to_string(),
        http_settings: Some(HttpSettings {
            path: QUERY_PATH.to_string(),
            ..Default::default()
        }),
        tls_settings: Some(TlsSettings {
            allow_insecure: true,
        }),
        ..Default::default()
    }
}

pub fn ws_stream() -> StreamConfig {
    StreamConfig {
        network: Some(Network::Ws),
        ws_settings: Some(WsSettings {
            path: QUERY_PATH.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn kcp_stream() -> StreamConfig {
    StreamConfig {
        network: Some(Network::Kcp),
        kcp_settings: Some(KcpSettings {
            mtu: 1350,
            tti: 20,
            uplink_capacity: 20,
            downlink_capacity: 100,
            congestion: true,
            read_buffer_size: 2,
            write_buffer_size: 2,
            header: json!({"type": "wechat-video"}),
        }),
        ..Default::default()
    }
}

/// Stream settings for the given network.
pub fn stream_for(network: Network) -> StreamConfig {
    match network {
        Network::Http => http_stream(),
        Network::Ws => ws_stream(),
        Network::Kcp => kcp_stream(),
        Network::Tcp => StreamConfig {
            network: Some(Network::Tcp),
            ..Default::default()
        },
    }
}

/// A loopback vmess listener tagged `vmess-<network>-all`. The client list
/// is installed later by [`Config::fill_in`].
pub fn vmess_inbound(port: u16, network: Network) -> Inbound {
    Inbound {
        listen: "127.0.0.1".to_string(),
        tag: vmess_tag(network, &["all"]),
        port,
        protocol: "vmess".to_string(),
        stream_settings: stream_for(network),
        ..Default::default()
    }
}

/// A vmess outbound for one (endpoint, network) pair, tagged
/// `vmess-<network>-<location>-<index>`.
fn vmess_outbound(location: &str, index: usize, network: Network, vnext: Vnext) -> Outbound {
    Outbound {
        tag: vmess_tag(network, &[location, &index.to_string()]),
        protocol: "vmess".to_string(),
        settings: OutboundSettings { vnext: vec![vnext] },
        stream_settings: stream_for(network),
    }
}

/// Per-location routing: a balancer over `vmess-<network>-<location>-*`
/// outbounds and a geoip rule directing matching traffic to it.
fn location_routing(network: Network, location: &str) -> (RoutingBalancer, RoutingRule) {
    let prefix = vmess_tag(network, &[location, ""]);
    let balancer = RoutingBalancer {
        tag: format!("{prefix}all"),
        selector: vec![prefix.clone()],
    };
    let rule = RoutingRule {
        ip: vec![format!("geoip:{location}")],
        network: Some(network),
        balancer_tag: format!("{prefix}all"),
        ..RoutingRule::field()
    };
    (balancer, rule)
}

impl Config {
    /// The fixed skeleton every generated document starts from: log paths,
    /// stats policy, the `blocked` and `freedom` terminal outbounds, and the
    /// baseline private-range and ad-blocking rules.
    pub fn standard() -> Config {
        Config {
            log: Log {
                access: "/var/log/v2ray/access.log".to_string(),
                error: "/var/log/v2ray/error.log".to_string(),
                loglevel: "warning".to_string(),
            },
            policy: Policy {
                system: SystemPolicy {
                    stats_inbound_uplink: true,
                    stats_inbound_downlink: true,
                },
            },
            outbounds: vec![
                Outbound {
                    tag: "blocked".to_string(),
                    protocol: "blackhole".to_string(),
                    ..Default::default()
                },
                Outbound {
                    tag: "freedom".to_string(),
                    protocol: "freedom".to_string(),
                    ..Default::default()
                },
            ],
            routing: Routing {
                rules: vec![
                    RoutingRule {
                        ip: vec!["geoip:private".to_string()],
                        outbound_tag: "blocked".to_string(),
                        ..RoutingRule::field()
                    },
                    RoutingRule {
                        domain: vec!["geosite:category-ads-all".to_string()],
                        outbound_tag: "blocked".to_string(),
                        ..RoutingRule::field()
                    },
                ],
                balancers: vec![],
            },
            ..Default::default()
        }
    }

    /// Distinct networks declared among vmess inbounds, in first-seen order.
    pub fn inbound_vmess_networks(&self) -> Vec<Network> {
        let mut networks = Vec::new();
        for inbound in &self.inbounds {
            if inbound.protocol != "vmess" {
                continue;
            }
            if let Some(network) = inbound.stream_settings.network {
                if !networks.contains(&network) {
                    networks.push(network);
                }
            }
        }
        networks
    }

    /// Finishes a document: installs the user on every vmess inbound,
    /// enables sniffing on http listeners, and appends the catch-all
    /// per-network rule and balancer pair.
    pub fn fill_in(&mut self, user: &User) {
        for inbound in &mut self.inbounds {
            if inbound.protocol != "vmess" {
                continue;
            }
            inbound.settings = InboundSettings {
                clients: vec![user.clone()],
                disable_insecure_encryption: true,
            };
            if inbound.stream_settings.network == Some(Network::Http) && inbound.sniffing.is_none()
            {
                inbound.sniffing = Some(SniffingSettings {
                    enable: true,
                    dest_override: vec!["http".to_string(), "tls".to_string()],
                });
            }
        }

        for network in self.inbound_vmess_networks() {
            let name = vmess_tag(network, &["all"]);
            let selector = vmess_tag(network, &[""]);
            self.routing.rules.push(RoutingRule {
                inbound_tag: vec![name.clone()],
                balancer_tag: name.clone(),
                ..RoutingRule::field()
            });
            self.routing.balancers.push(RoutingBalancer {
                tag: name,
                selector: vec![selector],
            });
        }
    }

    /// Adds a plain http listener on the loopback for local clients, routed
    /// through the tcp balancer group.
    // Only meaningful for documents that declare a tcp listener.
    #[allow(dead_code)]
    pub fn append_local_http_rule(&mut self) {
        self.inbounds.push(Inbound {
            tag: "localIn".to_string(),
            listen: "127.0.0.1".to_string(),
            port: LOCAL_HTTP_PORT,
            protocol: "http".to_string(),
            ..Default::default()
        });
        self.routing.rules.push(RoutingRule {
            inbound_tag: vec!["localIn".to_string()],
            balancer_tag: vmess_tag(Network::Tcp, &["all"]),
            ..RoutingRule::field()
        });
    }
}

/// Builds the server-side document: the declared listeners plus one
/// `freedom` outbound per distinct listener network.
pub fn server_config(listeners: &[(Network, u16)], user: &User) -> Config {
    let mut config = Config::standard();
    for &(network, port) in listeners {
        config.inbounds.push(vmess_inbound(port, network));
    }
    for network in config.inbound_vmess_networks() {
        config.outbounds.push(Outbound {
            tag: vmess_tag(network, &["all"]),
            protocol: "freedom".to_string(),
            ..Default::default()
        });
    }
    config.fill_in(user);
    config
}

/// Builds the tunnel-side document: the declared listeners, one vmess
/// outbound per (endpoint, listener network), domestic-traffic bypass rules,
/// and one balancer/rule pair per distinct (location, network).
pub fn tunnel_config(listeners: &[(Network, u16)], endpoints: &[Endpoint], user: &User) -> Config {
    let mut config = Config::standard();
    for &(network, port) in listeners {
        config.inbounds.push(vmess_inbound(port, network));
    }

    let networks = config.inbound_vmess_networks();
    let mut locations: Vec<String> = Vec::new();

    for (index, endpoint) in endpoints.iter().enumerate() {
        if !locations.contains(&endpoint.location) {
            locations.push(endpoint.location.clone());
        }
        for &network in &networks {
            let vnext = Vnext {
                address: endpoint.ip.clone(),
                port: endpoint.port_for(network),
                users: vec![user.clone()],
            };
            config
                .outbounds
                .push(vmess_outbound(&endpoint.location, index, network, vnext));
        }
    }

    config.routing.rules.push(RoutingRule {
        ip: vec!["geoip:cn".to_string()],
        outbound_tag: "freedom".to_string(),
        ..RoutingRule::field()
    });
    config.routing.rules.push(RoutingRule {
        domain: vec!["geosite:cn".to_string()],
        outbound_tag: "freedom".to_string(),
        ..RoutingRule::field()
    });

    for location in &locations {
        for &network in &networks {
            let (balancer, rule) = location_routing(network, location);
            config.routing.balancers.push(balancer);
            config.routing.rules.push(rule);
        }
    }

    config.fill_in(user);
    config
}
