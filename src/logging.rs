use std::io::IsTerminal;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;

pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a stderr subscriber so log lines never mix with the report on
/// stdout.
pub fn init_tracing(verbose: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(std::io::stderr().is_terminal())
        .with_max_level(level_for_verbosity(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
