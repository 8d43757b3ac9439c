//! Transport network identifiers and vmess tag derivation.

use serde::{Deserialize, Serialize};

/// Transport networks understood by the external tool. The string forms are
/// fixed by its configuration schema.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Http,
    Ws,
    Tcp,
    Kcp,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Http => "http",
            Network::Ws => "ws",
            Network::Tcp => "tcp",
            Network::Kcp => "kcp",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a dash-joined vmess tag: `vmess-<network>[-<part>]*`.
///
/// An empty trailing part produces a selector prefix ending in a dash,
/// e.g. `vmess_tag(Network::Ws, &["us", ""])` is `"vmess-ws-us-"`.
pub fn vmess_tag(network: Network, parts: &[&str]) -> String {
    let mut tag = format!("vmess-{network}");
    for part in parts {
        tag.push('-');
        tag.push_str(part);
    }
    tag
}
