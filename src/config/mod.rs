//! Configuration generation for the external proxy tool.
//!
//! This module provides:
//! - [`types`]: serde records mirroring the tool's JSON schema
//! - [`generate`]: template filling that populates them
//!
//! The main entry points are:
//! - [`server_config`]: build the server-side document
//! - [`tunnel_config`]: build the client/tunnel-side document

mod generate;
mod types;

pub use generate::{
    http_stream, kcp_stream, server_config, stream_for, tunnel_config, vmess_inbound, ws_stream,
    DEFAULT_LISTENERS, QUERY_PATH,
};
pub use types::*;
