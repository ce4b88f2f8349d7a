//! Keyed record updater CLI.
//!
//! Reads a JSON array of records, replaces the record(s) whose id matches with
//! a transformed copy, and writes the new array. Every other record is emitted
//! unchanged and in place.

use std::convert::Infallible;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use updater::apply::{apply_update, parse_id};
use updater::check::check_records;
use updater::core::transform::{FieldOp, Transform};
use updater::exit_codes;
use updater::io::config::{DEFAULT_CONFIG_PATH, load_config};
use updater::io::records::{STDIO, load_records, read_document, render_records, write_records};
use updater::logging;

#[derive(Parser)]
#[command(
    name = "updater",
    version,
    about = "Replace one record in a JSON list by id, leaving the rest in place"
)]
struct Cli {
    /// TOML config file. Missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Update the record(s) with the given id and emit the new list.
    ///
    /// Ops run in this order: `--ops` file, `--merge`, `--set`, `--inc`, `--unset`.
    Apply {
        /// Records file (JSON array), or `-` for stdin.
        #[arg(short, long, default_value = STDIO)]
        input: String,

        /// Id to match. Parsed as JSON, falling back to a plain string.
        #[arg(long, value_parser = parse_id_arg, allow_hyphen_values = true)]
        id: Value,

        /// JSON file holding a list of ops (`[{"op":"inc","field":"value","by":5}]`).
        #[arg(long = "ops", value_name = "FILE")]
        ops_file: Option<PathBuf>,

        /// Merge a JSON object into the record (RFC 7386).
        #[arg(long, value_name = "JSON", value_parser = FieldOp::parse_merge)]
        merge: Vec<FieldOp>,

        /// Set a field; non-JSON values are taken as strings.
        #[arg(long, value_name = "FIELD=JSON", value_parser = FieldOp::parse_set)]
        set: Vec<FieldOp>,

        /// Add a number to a numeric field.
        #[arg(long, value_name = "FIELD=NUMBER", value_parser = FieldOp::parse_inc, allow_hyphen_values = true)]
        inc: Vec<FieldOp>,

        /// Remove a field.
        #[arg(long, value_name = "FIELD", value_parser = FieldOp::parse_unset)]
        unset: Vec<FieldOp>,

        /// Write the result here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line output, overriding `pretty` in the config.
        #[arg(long)]
        compact: bool,
    },
    /// Check that a records file is a list of records with unique ids.
    Check {
        /// Records file (JSON array), or `-` for stdin.
        #[arg(short, long, default_value = STDIO)]
        input: String,
    },
}

fn parse_id_arg(raw: &str) -> Result<Value, Infallible> {
    Ok(parse_id(raw))
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Apply {
            input,
            id,
            ops_file,
            merge,
            set,
            inc,
            unset,
            output,
            compact,
        } => {
            let mut ops = match ops_file {
                Some(path) => load_ops(&path)?,
                None => Vec::new(),
            };
            ops.extend(merge);
            ops.extend(set);
            ops.extend(inc);
            ops.extend(unset);
            cmd_apply(
                &cli.config,
                &input,
                &id,
                &Transform::new(ops),
                output,
                compact,
            )
        }
        Command::Check { input } => cmd_check(&cli.config, &input),
    }
}

fn cmd_apply(
    config: &Path,
    input: &str,
    id: &Value,
    transform: &Transform,
    output: Option<PathBuf>,
    compact: bool,
) -> Result<i32> {
    let cfg = load_config(config).context("load config")?;
    let records = read_document(input)?;
    let update = apply_update(&records, id, transform, &cfg)?;
    let pretty = cfg.pretty && !compact;

    match output {
        Some(path) => write_records(&path, &update.records, pretty)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(render_records(&update.records, pretty)?.as_bytes())
                .and_then(|()| stdout.flush())
                .context("write records to stdout")?;
        }
    }

    if update.is_match() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::NO_MATCH)
    }
}

fn cmd_check(config: &Path, input: &str) -> Result<i32> {
    let cfg = load_config(config).context("load config")?;
    let records = read_document(input)?;
    let outcome = check_records(&records, &cfg)?;
    println!(
        "{} records, ids unique ({} without '{}')",
        outcome.records, outcome.without_id, cfg.id_field
    );
    Ok(exit_codes::OK)
}

/// Load a JSON op list for `--ops`.
fn load_ops(path: &Path) -> Result<Vec<FieldOp>> {
    let value = load_records(path)?;
    let transform: Transform = serde_json::from_value(value)
        .with_context(|| format!("parse ops {}", path.display()))?;
    Ok(transform.ops().to_vec())
}
