use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::source::{ProcessEnumerator, ProcessRecords};

pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Process records backed by a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, pid: u32, record: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(record)
    }
}

/// `self`, `thread-self` and the kernel's own directories share the listing
/// with the pid directories; only all-digit names are processes.
fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

impl ProcessEnumerator for ProcFs {
    fn pids(&self) -> io::Result<Vec<u32>> {
        let mut pids = Vec::new();
        for entry in fs::read_dir(&self.root)?.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if let Some(pid) = parse_pid(&name) {
                pids.push(pid);
            }
        }
        Ok(pids)
    }
}

impl ProcessRecords for ProcFs {
    fn cmdline(&self, pid: u32, limit: usize) -> io::Result<Vec<u8>> {
        let file = File::open(self.record_path(pid, "cmdline"))?;
        let mut buf = Vec::with_capacity(limit.min(4096));
        file.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn status(&self, pid: u32) -> io::Result<String> {
        // `Name:` carries the raw comm bytes, cut at 15 bytes and unescaped.
        let bytes = fs::read(self.record_path(pid, "status"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
