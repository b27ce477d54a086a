//! Sender gate check - screens sender numbers against the deployed config.
//!
//! Reads one sender number per line from stdin and prints `authorized` or
//! `rejected` for each. Exits with an error if the gate cannot be built.

mod error;
mod settings;

use crate::error::AppResult;
use crate::settings::Settings;
use anyhow::Context;
use sender_gate::{AuthorizationGate, GateConfig};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> AppResult<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let file_level = config_file_log_level(settings.config_path.as_deref());
    init_logging(&resolve_log_level(
        settings.log_level.as_deref(),
        file_level.as_deref(),
    ));

    info!("Starting sender gate check...");

    let gate = AuthorizationGate::load(settings.config_path.as_deref())?;
    info!("Authorization gate ready ({})", gate.config_path().display());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    screen(&gate, stdin.lock(), &mut stdout)?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Write one decision line per input line.
///
/// `lines()` drops the `\n` or `\r\n` terminator; nothing else is stripped.
fn screen(
    gate: &AuthorizationGate,
    input: impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        writeln!(output, "{}", decision(gate, &line))?;
    }
    output.flush()
}

fn decision(gate: &AuthorizationGate, number: &str) -> &'static str {
    if gate.is_authorized(number) {
        "authorized"
    } else {
        "rejected"
    }
}

/// `log_level` from the gate config, if the file is already readable.
///
/// Read errors are ignored here; the gate reports them once logging is up.
fn config_file_log_level(path: Option<&Path>) -> Option<String> {
    let path = GateConfig::resolve_path(path);
    GateConfig::read(&path)
        .ok()
        .and_then(|config| config.log_level().map(str::to_owned))
}

/// Pick the filter level: environment setting, then config file, then `info`.
///
/// Config files may spell levels in upper case or as `WARNING`/`CRITICAL`.
fn resolve_log_level(from_env: Option<&str>, from_file: Option<&str>) -> String {
    let level = from_env
        .or(from_file)
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or("info")
        .to_ascii_lowercase();

    match level.as_str() {
        "warning" => "warn".into(),
        "critical" | "fatal" => "error".into(),
        _ => level,
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
