use std::io::Write;
use std::process::ExitCode;

use color_eyre::Result;
use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::format::{JsonReport, render_text};
use crate::system::locator::{LocateResult, find_process_by_cmdline};
use crate::system::memory::{MemoryReading, read_memory};
use crate::system::source::{ProcessEnumerator, ProcessRecords};

#[derive(Clone, Debug)]
pub struct Settings {
    pub pattern: String,
    /// Report this process directly instead of searching for `pattern`.
    pub pid: Option<u32>,
    pub cmdline_limit: usize,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Settings {
            pattern: config.general.pattern.clone(),
            pid: None,
            cmdline_limit: config.general.cmdline_limit,
            format: config.output.format,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Reported,
    NotFound,
    ReadFailed,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.status())
    }

    pub fn status(self) -> u8 {
        match self {
            RunOutcome::Reported => 0,
            RunOutcome::NotFound | RunOutcome::ReadFailed => 1,
        }
    }
}

/// Locates the target process, reads its memory record and writes the
/// report (or a one-line diagnostic) to `out`.
pub fn run<S, W>(settings: &Settings, source: &S, out: &mut W) -> Result<RunOutcome>
where
    S: ProcessEnumerator + ProcessRecords + ?Sized,
    W: Write + ?Sized,
{
    let pid = match settings.pid {
        Some(pid) => pid,
        None => {
            let located =
                find_process_by_cmdline(source, &settings.pattern, settings.cmdline_limit);
            let LocateResult::Found(pid) = located else {
                writeln!(out, "No process matching \"{}\" found", settings.pattern)?;
                return Ok(RunOutcome::NotFound);
            };
            if settings.format == OutputFormat::Text {
                writeln!(
                    out,
                    "Found process matching \"{}\": PID {pid}",
                    settings.pattern
                )?;
            }
            pid
        }
    };

    let mem = match read_memory(source, pid) {
        MemoryReading::Parsed(mem) if mem.virtual_size != 0 => mem,
        reading => {
            info!(pid, ?reading, "no usable memory record");
            writeln!(out, "Failed to read memory information")?;
            return Ok(RunOutcome::ReadFailed);
        }
    };

    match settings.format {
        OutputFormat::Text => write!(out, "{}", render_text(&mem))?,
        OutputFormat::Json => {
            let pattern = settings.pid.is_none().then_some(settings.pattern.as_str());
            let report = JsonReport::new(pid, pattern, mem);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(RunOutcome::Reported)
}
