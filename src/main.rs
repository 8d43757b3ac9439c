mod config;
mod descriptor;
mod output;
mod subscribe;
mod uuid_util;

use std::io::Write;

use log::{debug, warn};

use crate::config::{server_config, tunnel_config, DEFAULT_LISTENERS};
use crate::descriptor::Descriptor;

const DEFAULT_DESCRIPTOR_FILE: &str = "config.json";
const DEFAULT_OUTPUT_DIR: &str = "output";

fn print_usage_and_exit(arg0: String) {
    eprintln!("Usage: {arg0} [--output/-o DIR] [descriptor filename]");
    eprintln!("       {arg0} generate-uuid");
    std::process::exit(1);
}

fn main() {
    env_logger::builder()
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            let level_style = buf.default_level_style(record.level());
            let sanitized_args = format!("{}", record.args())
                .chars()
                .map(|c| {
                    if c.is_ascii_graphic() || c == ' ' {
                        c
                    } else {
                        '?'
                    }
                })
                .collect::<String>();

            writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}] {}",
                timestamp,
                record.level(),
                record.target(),
                sanitized_args
            )
        })
        .init();

    let mut args: Vec<String> = std::env::args().collect();
    let arg0 = args.remove(0);
    let mut out_dir = DEFAULT_OUTPUT_DIR.to_string();

    while !args.is_empty() && args[0].starts_with('-') {
        if args[0] == "--output" || args[0] == "-o" {
            args.remove(0);
            if args.is_empty() {
                eprintln!("Missing output directory argument.");
                print_usage_and_exit(arg0);
                return;
            }
            out_dir = args.remove(0);
        } else {
            eprintln!("Invalid argument: {}", args[0]);
            print_usage_and_exit(arg0);
            return;
        }
    }

    if args.iter().any(|s| s == "generate-uuid") {
        println!("{}", uuid_util::generate_uuid());
        return;
    }

    if args.is_empty() {
        println!("No descriptor specified, assuming loading from file {DEFAULT_DESCRIPTOR_FILE}");
        args.push(DEFAULT_DESCRIPTOR_FILE.to_string());
    }

    if args.len() > 1 {
        eprintln!("Expected a single descriptor filename, got: {}", args.join(" "));
        print_usage_and_exit(arg0);
        return;
    }

    let descriptor_path = args.remove(0);
    let descriptor = match Descriptor::load(&descriptor_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load descriptor: {e}\n");
            print_usage_and_exit(arg0);
            return;
        }
    };

    let user = descriptor.build_user();
    if let Err(e) = uuid_util::validate_user_id(&user.id) {
        warn!("User id is not a usable vmess id: {e}");
    }

    let server = server_config(DEFAULT_LISTENERS, &user);
    let tunnel = tunnel_config(DEFAULT_LISTENERS, &descriptor.vpses, &user);

    debug!("================================================================================");
    debug!("{server:#?}");
    debug!("{tunnel:#?}");
    debug!("================================================================================");

    let networks: Vec<_> = DEFAULT_LISTENERS.iter().map(|&(network, _)| network).collect();
    let endpoints = descriptor.endpoints();
    let subscription = match subscribe::subscription(&endpoints, &networks, &user) {
        Ok(blob) => blob,
        Err(e) => {
            eprintln!("Failed to build subscription: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = output::write_artifacts(&out_dir, &server, &tunnel, &subscription) {
        eprintln!("Failed to write output files: {e}");
        std::process::exit(1);
    }

    println!(
        "Wrote {}, {} and {} to {}",
        output::SERVER_CONFIG_FILE,
        output::TUNNEL_CONFIG_FILE,
        output::SUBSCRIPTION_FILE,
        out_dir
    );
}
