//! Configuration types mirroring the external tool's JSON schema.
//!
//! Organized into submodules by concern:
//!
//! - [`common`]: log/policy/user records and serde skip helpers
//! - [`network`]: transport network identifiers and tag derivation
//! - [`stream`]: transport-layer stream settings
//! - [`inbound`]: local listener entries
//! - [`outbound`]: egress target entries
//! - [`routing`]: routing rules and balancer groups
//! - [`document`]: the top-level document tying the sections together
//!
//! These are pure data transfer records; the template-filling logic that
//! populates them lives in [`super::generate`].

pub mod common;
pub mod document;
pub mod inbound;
pub mod network;
pub mod outbound;
pub mod routing;
pub mod stream;

pub use common::{Log, Policy, States, SystemPolicy, User};
pub use document::Config;
pub use inbound::{Inbound, InboundSettings, SniffingSettings};
pub use network::{vmess_tag, Network};
pub use outbound::{Outbound, OutboundSettings, Vnext};
pub use routing::{Routing, RoutingBalancer, RoutingRule};
pub use stream::{HttpSettings, KcpSettings, StreamConfig, TlsSettings, WsSettings};
