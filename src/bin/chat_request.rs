//! chat-request — validate request configuration files and print their wire form.
//!
//! Usage:
//!   chat-request validate <file> [--fail-fast]   Report every violation in a configuration
//!   chat-request render <file> [--compact]       Print the canonical JSON body
//!   chat-request fields                          List logical fields and wire names
//!   chat-request pairs                           List alternate field pairs

use anyhow::{bail, Context};
use chat_request::request::ALL_PAIRS;
use chat_request::{RequestConfiguration, Validator, WIRE_FIELDS};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "validate" => cmd_validate(&args[2..]),
        "render" => cmd_render(&args[2..]),
        "fields" => {
            cmd_fields();
            Ok(())
        }
        "pairs" => {
            cmd_pairs();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("chat-request {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"chat-request — chat-completion request checker

USAGE:
    chat-request <COMMAND> [OPTIONS]

COMMANDS:
    validate <file> [--fail-fast]   Report every violation in a YAML/JSON configuration
    render <file> [--compact]       Validate, then print the canonical JSON body
    fields                          List logical fields and their wire names
    pairs                           List fields with alternate input shapes
    version                         Show version information
    help                            Show this help message

ENVIRONMENT:
    RUST_LOG                        Log filter (e.g. chat_request=debug)"#
    );
}

fn load(args: &[String]) -> anyhow::Result<RequestConfiguration> {
    let Some(path) = args.iter().find(|a| !a.starts_with("--")) else {
        bail!("missing <file> argument");
    };
    RequestConfiguration::from_path(path).with_context(|| format!("failed to load {path}"))
}

fn cmd_validate(args: &[String]) -> anyhow::Result<()> {
    let config = load(args)?;
    let validator = if args.iter().any(|a| a == "--fail-fast") {
        Validator::fail_fast()
    } else {
        Validator::new()
    };

    let report = validator.validate(&config);
    if report.is_valid() {
        println!("✅ valid");
        return Ok(());
    }
    println!("❌ {} violation(s):", report.len());
    for v in report.violations() {
        println!("  - {v}");
    }
    std::process::exit(1);
}

fn cmd_render(args: &[String]) -> anyhow::Result<()> {
    let config = load(args)?;
    let body = config.to_wire()?;
    let out = if args.iter().any(|a| a == "--compact") {
        serde_json::to_string(&body)?
    } else {
        serde_json::to_string_pretty(&body)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_fields() {
    println!("{:<20} {}", "LOGICAL", "WIRE");
    for (logical, wire) in WIRE_FIELDS {
        println!("{logical:<20} {wire}");
    }
}

fn cmd_pairs() {
    for pair in ALL_PAIRS {
        println!(
            "{:<16} canonical={:<16} alternates={:<28} rule={:?}",
            pair.logical_name,
            pair.canonical_slot,
            pair.alternate_slots.join(","),
            pair.rule
        );
    }
}
