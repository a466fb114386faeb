use std::cell::Cell;
use std::io;

use super::source::{ProcessEnumerator, ProcessRecords};

#[derive(Clone, Debug)]
pub struct StaticProcess {
    pub pid: u32,
    /// `None` simulates a process whose command line cannot be read.
    pub cmdline: Option<Vec<u8>>,
    /// `None` simulates a process whose status record cannot be opened.
    pub status: Option<String>,
}

/// In-memory process table. Enumeration follows insertion order.
#[derive(Debug, Default)]
pub struct StaticProcessTable {
    processes: Vec<StaticProcess>,
    status_reads: Cell<usize>,
}

impl StaticProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a process whose command line is `argv` joined with NUL bytes,
    /// the way the kernel exposes it.
    pub fn with_process(mut self, pid: u32, argv: &[&str], status: &str) -> Self {
        let mut cmdline = argv.join("\0").into_bytes();
        if !cmdline.is_empty() {
            cmdline.push(0);
        }
        self.processes.push(StaticProcess {
            pid,
            cmdline: Some(cmdline),
            status: Some(status.to_string()),
        });
        self
    }

    pub fn with_entry(mut self, process: StaticProcess) -> Self {
        self.processes.push(process);
        self
    }

    /// Number of status records requested so far.
    pub fn status_reads(&self) -> usize {
        self.status_reads.get()
    }

    fn find(&self, pid: u32) -> io::Result<&StaticProcess> {
        self.processes
            .iter()
            .find(|p| p.pid == pid)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no process {pid}")))
    }
}

fn unreadable(pid: u32) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("record of process {pid} is not readable"),
    )
}

impl ProcessEnumerator for StaticProcessTable {
    fn pids(&self) -> io::Result<Vec<u32>> {
        Ok(self.processes.iter().map(|p| p.pid).collect())
    }
}

impl ProcessRecords for StaticProcessTable {
    fn cmdline(&self, pid: u32, limit: usize) -> io::Result<Vec<u8>> {
        let cmdline = self.find(pid)?.cmdline.as_ref().ok_or_else(|| unreadable(pid))?;
        Ok(cmdline[..cmdline.len().min(limit)].to_vec())
    }

    fn status(&self, pid: u32) -> io::Result<String> {
        self.status_reads.set(self.status_reads.get() + 1);
        self.find(pid)?.status.clone().ok_or_else(|| unreadable(pid))
    }
}
