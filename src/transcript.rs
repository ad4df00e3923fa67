use crate::message::{Message, MessageKind};

/// Index of a message inside the transcript. Handles stay valid until the
/// transcript is cleared; flows must not hold one across a `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle(usize);

/// The ordered message list plus scroll state. Appending jumps the view to
/// the bottom; replacing an entry leaves the scroll position alone unless
/// the view was already following the bottom.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    scroll: u16,
    stick_to_bottom: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            scroll: 0,
            stick_to_bottom: true,
        }
    }

    pub fn append(
        &mut self,
        sender: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> MessageHandle {
        self.messages.push(Message::new(sender, content, kind));
        self.stick_to_bottom = true;
        MessageHandle(self.messages.len() - 1)
    }

    pub fn replace(
        &mut self,
        handle: MessageHandle,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) {
        if let Some(msg) = self.messages.get_mut(handle.0) {
            msg.set_content(sender, content);
        }
    }

    pub fn set_kind(&mut self, handle: MessageHandle, kind: MessageKind) {
        if let Some(msg) = self.messages.get_mut(handle.0) {
            msg.kind = kind;
        }
    }

    /// Removes a single entry. Only the clear flow uses this, for its
    /// transient placeholder, which is always the last entry at that point.
    pub fn remove(&mut self, handle: MessageHandle) {
        if handle.0 < self.messages.len() {
            self.messages.remove(handle.0);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.scroll = 0;
        self.stick_to_bottom = true;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, handle: MessageHandle) -> Option<&Message> {
        self.messages.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn scroll_up(&mut self) {
        self.stick_to_bottom = false;
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Resolves the stored scroll offset against the rendered line count.
    /// Reattaches to the bottom once the user scrolls past the end.
    pub fn visible_scroll(&mut self, total_lines: u16, viewport_height: u16) -> u16 {
        let max_scroll = total_lines.saturating_sub(viewport_height);
        if self.scroll >= max_scroll {
            self.stick_to_bottom = true;
        }
        if self.stick_to_bottom {
            self.scroll = max_scroll;
        }
        self.scroll.min(max_scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(t: &Transcript) -> Vec<(String, String)> {
        t.messages()
            .iter()
            .map(|m| (m.sender.clone(), m.content.clone()))
            .collect()
    }

    #[test]
    fn append_orders_messages_and_returns_handles() {
        let mut t = Transcript::new();
        let a = t.append("You", "first", MessageKind::User);
        let b = t.append("AI", "second", MessageKind::Ai);
        assert_ne!(a, b);
        assert_eq!(
            contents(&t),
            vec![
                ("You".to_string(), "first".to_string()),
                ("AI".to_string(), "second".to_string())
            ]
        );
    }

    #[test]
    fn replace_mutates_in_place() {
        let mut t = Transcript::new();
        t.append("AI", "welcome", MessageKind::Ai);
        let h = t.append("AI", "...", MessageKind::Ai);
        t.replace(h, "AI", "Hello!");
        assert_eq!(t.get(h).unwrap().content, "Hello!");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn remove_drops_the_entry() {
        let mut t = Transcript::new();
        t.append("AI", "welcome", MessageKind::Ai);
        let h = t.append("AI", "...", MessageKind::Ai);
        t.remove(h);
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages()[0].content, "welcome");
    }

    #[test]
    fn append_reattaches_view_to_bottom() {
        let mut t = Transcript::new();
        for i in 0..20 {
            t.append("You", format!("msg {i}"), MessageKind::User);
        }
        assert_eq!(t.visible_scroll(40, 10), 30);
        t.scroll_up();
        t.scroll_up();
        assert_eq!(t.visible_scroll(40, 10), 28);
        t.append("AI", "reply", MessageKind::Ai);
        assert_eq!(t.visible_scroll(42, 10), 32);
    }

    #[test]
    fn visible_scroll_clamps_to_content() {
        let mut t = Transcript::new();
        t.append("You", "short", MessageKind::User);
        assert_eq!(t.visible_scroll(2, 10), 0);
    }
}
