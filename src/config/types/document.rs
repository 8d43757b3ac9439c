//! The top-level configuration document.

use serde::{Deserialize, Serialize};

use super::common::{Log, Policy, States};
use super::inbound::Inbound;
use super::outbound::Outbound;
use super::routing::Routing;

/// A complete configuration document for the external tool. Field order
/// here fixes the order of the emitted JSON sections.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log: Log,
    pub states: States,
    pub policy: Policy,
    pub inbounds: Vec<Inbound>,
    pub outbounds: Vec<Outbound>,
    pub routing: Routing,
}
