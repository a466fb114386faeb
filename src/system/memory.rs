use serde::Serialize;
use tracing::debug;

use super::source::ProcessRecords;

/// Memory metrics of one process, all in kilobytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    pub virtual_size: u64,
    pub resident_set_size: u64,
    pub data_segment_size: u64,
    pub stack_size: u64,
}

/// Outcome of reading a status record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryReading {
    Parsed(MemoryInfo),
    NotOpened,
    NoFieldsParsed,
}

impl MemoryReading {
    /// The metrics, or all zero when nothing could be read.
    pub fn info(self) -> MemoryInfo {
        match self {
            MemoryReading::Parsed(info) => info,
            MemoryReading::NotOpened | MemoryReading::NoFieldsParsed => MemoryInfo::default(),
        }
    }
}

/// Splits a `<key> <integer> kB` line. Any other shape yields `None`.
fn parse_kb_line(line: &str) -> Option<(&str, u64)> {
    let mut tokens = line.split_whitespace();
    let key = tokens.next()?;
    let value = tokens.next()?.parse().ok()?;
    if tokens.next()? != "kB" || tokens.next().is_some() {
        return None;
    }
    Some((key, value))
}

/// Extracts the `VmSize`, `VmRSS`, `VmData` and `VmStk` fields from the text
/// of a status record. A repeated key keeps its last value.
pub fn parse_status(record: &str) -> MemoryReading {
    let mut info = MemoryInfo::default();
    let mut recognized = false;

    for line in record.lines() {
        let Some((key, value)) = parse_kb_line(line) else {
            continue;
        };
        let field = match key {
            "VmSize:" => &mut info.virtual_size,
            "VmRSS:" => &mut info.resident_set_size,
            "VmData:" => &mut info.data_segment_size,
            "VmStk:" => &mut info.stack_size,
            _ => continue,
        };
        *field = value;
        recognized = true;
    }

    if recognized {
        MemoryReading::Parsed(info)
    } else {
        MemoryReading::NoFieldsParsed
    }
}

pub fn read_memory<S: ProcessRecords + ?Sized>(source: &S, pid: u32) -> MemoryReading {
    let record = match source.status(pid) {
        Ok(record) => record,
        Err(err) => {
            debug!(pid, "cannot open status record: {err}");
            return MemoryReading::NotOpened;
        }
    };
    let reading = parse_status(&record);
    debug!(pid, ?reading, "parsed status record");
    reading
}

/// Like [`read_memory`], collapsing failures to a zero-valued record.
pub fn read_memory_usage<S: ProcessRecords + ?Sized>(source: &S, pid: u32) -> MemoryInfo {
    read_memory(source, pid).info()
}
