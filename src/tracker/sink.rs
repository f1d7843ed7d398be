/// Write targets for a tracked task. Values arrive as raw text.
pub trait RenderSink: Send + Sync {
    fn render_status(&self, value: &str);
    fn render_total_records(&self, value: &str);
    fn render_start_time(&self, value: &str);
    fn render_end_time(&self, value: &str);
    /// Disable the pause control for good.
    fn lock_controls(&self);
}

/// Prints each slot update as a line on stdout, prefixed by the task label.
pub struct ConsoleSink {
    label: String,
}

impl ConsoleSink {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    fn line(&self, slot: &str, value: &str) -> String {
        format!("{}  {:<14} {}", self.label, format!("{}:", slot), value)
    }
}

impl RenderSink for ConsoleSink {
    fn render_status(&self, value: &str) {
        println!("{}", self.line("Status", value));
    }

    fn render_total_records(&self, value: &str) {
        println!("{}", self.line("Total records", value));
    }

    fn render_start_time(&self, value: &str) {
        println!("{}", self.line("Start time", value));
    }

    fn render_end_time(&self, value: &str) {
        println!("{}", self.line("End time", value));
    }

    fn lock_controls(&self) {
        println!("{}", self.line("Pause", "disabled"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_line_format() {
        let sink = ConsoleSink::new("task-7");
        assert_eq!(sink.line("Status", "PENDING"), "task-7  Status:        PENDING");
        assert_eq!(sink.line("Total records", "42"), "task-7  Total records: 42");
    }
}
