use serde::Serialize;

use crate::system::memory::MemoryInfo;

const KB_PER_MB: f64 = 1024.0;

pub fn kb_to_mb(kb: u64) -> f64 {
    kb as f64 / KB_PER_MB
}

pub fn format_kb_as_mb(kb: u64) -> String {
    format!("{:.2}", kb_to_mb(kb))
}

pub fn render_text(mem: &MemoryInfo) -> String {
    format!(
        "Memory Usage (KB):\n\
         Virtual Size: {}\n\
         Physical RSS: {}\n\
         Data Segment: {}\n\
         Stack Size: {}\n\
         \n\
         Memory Usage (MB):\n\
         Virtual Size: {}\n\
         Physical RSS: {}\n",
        mem.virtual_size,
        mem.resident_set_size,
        mem.data_segment_size,
        mem.stack_size,
        format_kb_as_mb(mem.virtual_size),
        format_kb_as_mb(mem.resident_set_size),
    )
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub pid: u32,
    pub pattern: Option<&'a str>,
    pub memory: MemoryInfo,
    pub virtual_size_mb: f64,
    pub resident_set_size_mb: f64,
}

impl<'a> JsonReport<'a> {
    pub fn new(pid: u32, pattern: Option<&'a str>, memory: MemoryInfo) -> Self {
        JsonReport {
            pid,
            pattern,
            memory,
            virtual_size_mb: round2(kb_to_mb(memory.virtual_size)),
            resident_set_size_mb: round2(kb_to_mb(memory.resident_set_size)),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mb_conversion_uses_two_decimals() {
        assert_eq!(format_kb_as_mb(2048), "2.00");
        assert_eq!(format_kb_as_mb(1536), "1.50");
        assert_eq!(format_kb_as_mb(0), "0.00");
        assert_eq!(format_kb_as_mb(50000), "48.83");
        assert_eq!(format_kb_as_mb(20000), "19.53");
    }

    #[test]
    fn text_keeps_fixed_order() {
        let text = render_text(&MemoryInfo {
            virtual_size: 4,
            resident_set_size: 3,
            data_segment_size: 2,
            stack_size: 1,
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Memory Usage (KB):");
        assert_eq!(lines[1], "Virtual Size: 4");
        assert_eq!(lines[4], "Stack Size: 1");
        assert_eq!(lines[5], "");
        assert_eq!(lines[8], "Physical RSS: 0.00");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn json_report_rounds_megabytes() {
        let report = JsonReport::new(
            12,
            Some("node"),
            MemoryInfo {
                virtual_size: 50000,
                resident_set_size: 20000,
                data_segment_size: 10000,
                stack_size: 132,
            },
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["pid"], 12);
        assert_eq!(value["pattern"], "node");
        assert_eq!(value["memory"]["stack_size"], 132);
        assert_eq!(value["virtual_size_mb"], 48.83);
        assert_eq!(value["resident_set_size_mb"], 19.53);
    }
}
