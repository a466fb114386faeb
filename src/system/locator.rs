use std::borrow::Cow;

use tracing::{debug, trace, warn};

use super::source::{ProcessEnumerator, ProcessRecords};

/// One byte short of a 1 KiB line buffer.
pub const DEFAULT_CMDLINE_LIMIT: usize = 1023;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocateResult {
    Found(u32),
    NotFound,
}

impl LocateResult {
    pub fn pid(self) -> Option<u32> {
        match self {
            LocateResult::Found(pid) => Some(pid),
            LocateResult::NotFound => None,
        }
    }
}

/// The program part of a raw command-line record: the bytes before the
/// first NUL separator, decoded lossily.
pub fn cmdline_text(raw: &[u8]) -> Cow<'_, str> {
    let program = match raw.iter().position(|&b| b == 0) {
        Some(nul) => &raw[..nul],
        None => raw,
    };
    String::from_utf8_lossy(program)
}

/// Returns the first process, in enumeration order, whose program (the
/// command line up to its first NUL) contains `pattern`. At most `limit`
/// bytes of each command line are inspected.
pub fn find_process_by_cmdline<S>(source: &S, pattern: &str, limit: usize) -> LocateResult
where
    S: ProcessEnumerator + ProcessRecords + ?Sized,
{
    let pids = match source.pids() {
        Ok(pids) => pids,
        Err(err) => {
            warn!("cannot list processes: {err}");
            return LocateResult::NotFound;
        }
    };

    for pid in pids {
        let raw = match source.cmdline(pid, limit) {
            Ok(raw) => raw,
            Err(err) => {
                // Exited since the listing, or not ours to read.
                trace!(pid, "skipping process: {err}");
                continue;
            }
        };
        if cmdline_text(&raw).contains(pattern) {
            debug!(pid, pattern, "matched command line");
            return LocateResult::Found(pid);
        }
    }

    LocateResult::NotFound
}
