//! Print the SURT key of each URI given on the command line or on stdin.
//!
//! Hand-rolled argument parsing (no clap dependency).
//!
//! ```text
//! surtkey [FLAGS] [URI...]
//! surtkey --help | -h
//! ```

use std::env;
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use surtkey::{compute_surt, CanonicalizationOptions};

struct Cli {
    options: CanonicalizationOptions,
    inputs: Vec<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = parse_args()?;
    debug!(options = ?cli.options, inputs = cli.inputs.len(), "options resolved");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failures = 0usize;

    if cli.inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read URI from stdin")?;
            failures += emit(&mut out, &line, &cli.options)?;
        }
    } else {
        for input in &cli.inputs {
            failures += emit(&mut out, input, &cli.options)?;
        }
    }

    out.flush().context("failed to flush stdout")?;

    if failures > 0 {
        debug!(failures, "some inputs had no key");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Write one key; returns 1 when the input failed.
fn emit(out: &mut impl Write, input: &str, options: &CanonicalizationOptions) -> Result<usize> {
    match compute_surt(Some(input), options) {
        Ok(key) => {
            writeln!(out, "{}", key).context("failed to write key")?;
            Ok(0)
        }
        Err(err) => {
            eprintln!("error: {}: {}", input, err);
            Ok(1)
        }
    }
}

fn parse_args() -> Result<Cli> {
    let mut args = env::args();
    let exe = args.next().unwrap_or_else(|| "surtkey".into());

    let mut config: Option<String> = None;
    let mut flags: Vec<String> = Vec::new();
    let mut inputs: Vec<String> = Vec::new();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            print_usage(&exe);
            std::process::exit(0);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            config = Some(path.to_string());
            continue;
        }
        if arg.starts_with("--") {
            flags.push(arg);
            continue;
        }
        inputs.push(arg);
    }

    let mut options = match config {
        Some(path) => load_config(&path)?,
        None => CanonicalizationOptions::default(),
    };

    // flags override the config file
    for flag in &flags {
        if !apply_flag(&mut options, flag) {
            eprintln!("error: unknown flag '{}'", flag);
            eprintln!();
            print_usage(&exe);
            std::process::exit(2);
        }
    }

    Ok(Cli { options, inputs })
}

fn load_config(path: &str) -> Result<CanonicalizationOptions> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path))?;
    serde_json::from_str(&data).with_context(|| format!("invalid options in '{}'", path))
}

fn apply_flag(options: &mut CanonicalizationOptions, flag: &str) -> bool {
    match flag {
        "--with-scheme" => options.with_scheme = true,
        "--no-host-massage" => options.host_massage = false,
        "--trailing-comma" => options.trailing_comma = true,
        "--no-reverse-ipaddr" => options.reverse_ipaddr = false,
        "--public-suffix" => options.public_suffix = true,
        "--url" => options.surt = false,
        "--keep-path-case" => options.path_lowercase = false,
        "--keep-path-session-ids" => options.path_strip_session_id = false,
        "--keep-trailing-slash" => options.path_strip_trailing_slash_unless_empty = false,
        "--keep-query-case" => options.query_lowercase = false,
        "--keep-query-order" => options.query_alpha_reorder = false,
        "--keep-query-session-ids" => options.query_strip_session_id = false,
        "--keep-empty-query" => options.query_strip_empty = false,
        _ => return false,
    }
    true
}

fn print_usage(exe: &str) {
    eprintln!("usage: {} [FLAGS] [URI...]", exe);
    eprintln!();
    eprintln!("Prints one SURT key per URI. Reads URIs from stdin, one per line,");
    eprintln!("when none are given.");
    eprintln!();
    eprintln!("FLAGS:");
    eprintln!("  --with-scheme          wrap the host as scheme://(...)");
    eprintln!("  --no-host-massage      keep a leading www label");
    eprintln!("  --trailing-comma       append ',' after the host");
    eprintln!("  --no-reverse-ipaddr    keep IPv4 octets in original order");
    eprintln!("  --public-suffix        reduce hosts to their registrable domain");
    eprintln!("  --url                  print the canonical URL instead of a key");
    eprintln!("  --keep-path-case       do not lowercase the path");
    eprintln!("  --keep-path-session-ids");
    eprintln!("                         keep ASP.NET session segments in paths");
    eprintln!("  --keep-trailing-slash  keep a trailing '/' on the path");
    eprintln!("  --keep-query-case      do not lowercase query keys and values");
    eprintln!("  --keep-query-order     do not sort query parameters");
    eprintln!("  --keep-query-session-ids");
    eprintln!("                         keep session-id query parameters");
    eprintln!("  --keep-empty-query     keep a bare '?'");
    eprintln!("  --config=<file.json>   read options from a JSON document");
    eprintln!("  -h, --help             show this help");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for diagnostics.");
}
