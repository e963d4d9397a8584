//! Entry point for sysmon. Checks args, sets up logging and runs the App.

mod app;
mod ui;

use std::{
    env,
    fs::{File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::Context;
use app::App;
use sysmon_core::Config;
use tracing_subscriber::EnvFilter;

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog}\n\
         \n\
         Live CPU, RAM and GPU usage. Press 'q' to quit.\n\
         \n\
         Logging is off unless SYSMON_LOG_FILE names a file to append to\n\
         (filter via RUST_LOG, default info)."
    )
}

/// sysmon takes no arguments; anything given is reported with the usage text.
fn check_args<I: IntoIterator<Item = String>>(args: I) -> Result<(), String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sysmon".into());
    match it.next() {
        None => Ok(()),
        Some(arg) => Err(format!("Unexpected argument '{arg}'.\n{}", usage(&prog))),
    }
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

/// The TUI owns the terminal, so logs only go to `SYSMON_LOG_FILE` when set.
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = env::var_os("SYSMON_LOG_FILE") else {
        return Ok(());
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = open_log_file(Path::new(&path))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(msg) = check_args(env::args()) {
        eprintln!("{msg}");
        std::process::exit(2);
    }

    init_logging()?;
    let cfg = Config::default();
    tracing::debug!(?cfg, "starting");

    App::new(&cfg).run().await
}
