pub trait UiLog {
    fn log(&mut self, message: &str, warning: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub warning: bool,
}

#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Vec<LogEntry>,
}

impl BufferedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn drain_into(&mut self, out: &mut Vec<LogEntry>) {
        out.append(&mut self.entries);
    }
}

impl UiLog for BufferedLog {
    fn log(&mut self, message: &str, warning: bool) {
        self.entries.push(LogEntry {
            message: message.to_string(),
            warning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_log_records_messages_in_order() {
        let mut log = BufferedLog::new();
        log.log("first", false);
        log.log("second", true);

        assert_eq!(
            log.entries(),
            [
                LogEntry {
                    message: "first".to_string(),
                    warning: false,
                },
                LogEntry {
                    message: "second".to_string(),
                    warning: true,
                },
            ]
        );
    }

    #[test]
    fn drain_into_moves_entries_out() {
        let mut log = BufferedLog::new();
        log.log("only", false);

        let mut out = Vec::new();
        log.drain_into(&mut out);
        assert_eq!(out.len(), 1);
        assert!(log.entries().is_empty());
    }
}
