//! Writes the three generated artifacts under the output directory.

use std::path::Path;

use log::debug;

use crate::config::Config;

pub const SERVER_CONFIG_FILE: &str = "config-server.json";
pub const TUNNEL_CONFIG_FILE: &str = "config-tunnel.json";
pub const SUBSCRIPTION_FILE: &str = "subscribe.txt";

/// Creates the output directory and writes both config documents (pretty
/// JSON, two-space indent) plus the subscription blob.
pub fn write_artifacts(
    out_dir: &str,
    server: &Config,
    tunnel: &Config,
    subscription: &str,
) -> std::io::Result<()> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Could not create output directory {out_dir}: {e}"),
        )
    })?;

    write_json(&Path::new(out_dir).join(SERVER_CONFIG_FILE), server)?;
    write_json(&Path::new(out_dir).join(TUNNEL_CONFIG_FILE), tunnel)?;

    let subscription_path = Path::new(out_dir).join(SUBSCRIPTION_FILE);
    std::fs::write(&subscription_path, subscription).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Could not write {}: {e}", subscription_path.display()),
        )
    })?;
    debug!("wrote {}", subscription_path.display());

    Ok(())
}

fn write_json(path: &Path, config: &Config) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(config).map_err(std::io::Error::other)?;
    std::fs::write(path, json).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Could not write {}: {e}", path.display()))
    })?;
    debug!("wrote {}", path.display());
    Ok(())
}
