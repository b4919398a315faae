#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Enter to open the calendar, Ctrl+S to accept.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn browsing(&mut self, title: &str) {
        self.message = format!("Browsing {title}");
    }

    pub fn selected(&mut self, value: &str) {
        self.message = format!("Selected {value}");
    }

    pub fn refused(&mut self, value: &str) {
        self.message = format!("{value} is not available");
    }

    pub fn cleared(&mut self) {
        self.message = "Value cleared".to_string();
    }

    pub fn pending_exit(&mut self) {
        self.message = "Value changed. Press Ctrl+Q again to quit without accepting.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
