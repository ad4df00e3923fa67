use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Ai,
    User,
    System,
}

/// A single transcript entry. Ephemeral: lives only for the program run,
/// ordered by append order alone.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: String,
    pub content: String,
    pub kind: MessageKind,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(sender: impl Into<String>, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            sender: sanitize(&sender.into()),
            content: sanitize(&content.into()),
            kind,
            timestamp: Local::now(),
        }
    }

    pub fn set_content(&mut self, sender: impl Into<String>, content: impl Into<String>) {
        self.sender = sanitize(&sender.into());
        self.content = sanitize(&content.into());
    }
}

/// Strips control characters from untrusted text so a message body can never
/// carry terminal escape sequences. Newlines survive; everything else that is
/// not printable is dropped.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}
