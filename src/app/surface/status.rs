/// What the status bar is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    /// Buffer statistics.
    Edit,
    /// A one-off notification such as "Saved".
    Notify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    mode: StatusMode,
    text: String,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            mode: StatusMode::Notify,
            text: "Ready".to_string(),
        }
    }
}

impl StatusLine {
    pub fn mode(&self) -> StatusMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.mode = StatusMode::Notify;
        self.text = text.into();
    }

    pub fn show_stats(&mut self, content: &str) {
        self.mode = StatusMode::Edit;
        self.text = buffer_stats(content);
    }
}

pub fn buffer_stats(content: &str) -> String {
    let lines = content.lines().count().max(1);
    let chars = content.chars().count();
    format!("{} lines, {} chars", lines, chars)
}
