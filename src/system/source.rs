use std::io;

/// Lists the identifiers of the processes that are currently running.
pub trait ProcessEnumerator {
    /// Process identifiers in enumeration order. Entries of the listing
    /// that are not numeric are left out.
    fn pids(&self) -> io::Result<Vec<u32>>;
}

/// Reads the per-process records the locator and reporter need.
pub trait ProcessRecords {
    /// Raw command-line record, at most `limit` bytes of it.
    fn cmdline(&self, pid: u32, limit: usize) -> io::Result<Vec<u8>>;

    /// Full text of the status record.
    fn status(&self, pid: u32) -> io::Result<String>;
}
