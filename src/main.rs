use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use procmem::app::{self, Settings};
use procmem::config::{Config, OutputFormat, load_config, load_config_from_path};
use procmem::logging;
use procmem::system::procfs::ProcFs;

#[derive(Parser)]
#[command(
    name = "procmem",
    about = "Find a process by command line and report its memory usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Substring to look for in process command lines
    #[arg(long)]
    pattern: Option<String>,

    /// Report this PID instead of searching by command line
    #[arg(long)]
    pid: Option<u32>,

    /// Root of the procfs mount
    #[arg(long)]
    proc_root: Option<PathBuf>,

    /// Maximum number of command-line bytes inspected per process
    #[arg(long)]
    cmdline_limit: Option<usize>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let config = load_config_for_cli(&cli);
    let settings = Settings {
        pid: cli.pid,
        ..Settings::from_config(&config)
    };
    let procfs = ProcFs::new(&config.general.proc_root);

    let mut out = stdout().lock();
    let outcome = app::run(&settings, &procfs, &mut out)?;
    out.flush()?;

    Ok(outcome.exit_code())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref pattern) = cli.pattern {
        config.general.pattern = pattern.clone();
    }
    if let Some(ref root) = cli.proc_root {
        config.general.proc_root = root.clone();
    }
    if let Some(limit) = cli.cmdline_limit {
        config.general.cmdline_limit = limit;
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    config
}
