use std::time::{Duration, Instant};

use crate::transcript::MessageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypingState {
    Idle,
    Running,
}

/// Animates one placeholder message while a reply is pending. The tick state
/// lives on the instance, never in a global, so there can only ever be one
/// active cycle per indicator: `start` while running replaces the previous
/// cycle instead of stacking a second one.
#[derive(Debug)]
pub struct TypingIndicator {
    state: TypingState,
    dots: u8,
    tick: Duration,
    last_tick: Instant,
    handle: Option<MessageHandle>,
}

impl TypingIndicator {
    pub fn new(tick: Duration) -> Self {
        Self {
            state: TypingState::Idle,
            dots: 0,
            tick,
            last_tick: Instant::now(),
            handle: None,
        }
    }

    /// Begins animating `handle`. Any cycle already running is stopped first.
    pub fn start(&mut self, handle: MessageHandle) {
        self.state = TypingState::Running;
        self.dots = 0;
        self.last_tick = Instant::now();
        self.handle = Some(handle);
    }

    /// Ends the animation and releases the placeholder handle. No-op when
    /// idle. The caller writes the final content; the indicator never leaves
    /// dots behind on its own.
    pub fn stop(&mut self) -> Option<MessageHandle> {
        match self.state {
            TypingState::Idle => None,
            TypingState::Running => {
                self.state = TypingState::Idle;
                self.dots = 0;
                self.handle.take()
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TypingState::Running
    }

    pub fn active_handle(&self) -> Option<MessageHandle> {
        self.handle
    }

    /// Called from the draw loop. When a full tick has elapsed, cycles the
    /// dot counter 0→1→2→3→0 and yields the next frame text for the
    /// placeholder. Returns `None` when idle or between ticks.
    pub fn advance(&mut self, now: Instant) -> Option<(MessageHandle, String)> {
        if self.state != TypingState::Running {
            return None;
        }
        if now.duration_since(self.last_tick) < self.tick {
            return None;
        }
        self.last_tick = now;
        self.dots = (self.dots + 1) % 4;
        let handle = self.handle?;
        Some((handle, ".".repeat(self.dots as usize)))
    }
}
