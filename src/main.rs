use std::io::Read;

use clap::Parser;
use json_data_filter::{filter_value, ErrorPolicy, FilterOptions, Mode};
use serde_json::Value;
use tracing::info;

/// Simple runner: filter JSON instances with JSON filter specs.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON instance or array of instances. `@file` reads a file, `-` reads stdin.
    data: String,
    /// Filter spec object or array of them. Accepts `@file` too.
    #[arg(short, long)]
    filters: String,
    /// Keep (inclusive) or drop (exclusive) matching instances
    #[arg(long, default_value = "inclusive")]
    mode: Mode,
    /// Match when any filter matches instead of all of them
    #[arg(long)]
    no_compound: bool,
    /// Drop instances a filter cannot be applied to instead of failing
    #[arg(long)]
    skip_errors: bool,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Inline JSON, `@path` for a file, or `-` for stdin.
fn load_json(arg: &str) -> Result<Value, String> {
    let text = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("cannot read stdin: {e}"))?;
        buf
    } else if let Some(path) = arg.strip_prefix('@') {
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?
    } else {
        arg.to_string()
    };
    serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {e}"))
}

/// Load `DATA` and `--filters`. Only one of them may come from stdin.
fn load_inputs(data: &str, filters: &str) -> Result<(Value, Value), String> {
    if data == "-" && filters == "-" {
        return Err("DATA and --filters cannot both be read from stdin (`-`)".to_string());
    }
    Ok((load_json(data)?, load_json(filters)?))
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();
    setup_logging(args.verbose);

    let (data, filters) = match load_inputs(&args.data, &args.filters) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Build options.
    let opts = FilterOptions::default()
        .with_mode(args.mode)
        .with_compound(!args.no_compound)
        .with_error_policy(if args.skip_errors {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        });
    info!(mode = %opts.mode, compound = opts.compound, "filtering");

    let out = match filter_value(&data, &filters, opts) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Output result.
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("cannot serialize result: {e}");
            std::process::exit(1);
        }
    }
}
