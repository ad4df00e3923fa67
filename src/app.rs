use std::time::Instant;

use crate::config::Config;
use crate::message::MessageKind;
use crate::transcript::Transcript;
use crate::typing::TypingIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    ClearConfirm,
    QuitConfirm,
    Quit,
}

/// Guard against overlapping flows: checked and set inside a single lock
/// acquisition before anything is rendered, cleared on every exit path.
/// A clear in progress blocks sends too, so no flow ever holds a transcript
/// handle across another flow's `clear` or `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Sending,
    Clearing,
}

/// One chat session. Lives for the whole program run; there is no teardown
/// beyond process exit.
pub struct App {
    pub state: AppState,
    pub flow_state: FlowState,
    pub config: Config,
    pub transcript: Transcript,
    pub typing: TypingIndicator,
    pub input: String,
    /// Blocking notice shown over the chat until any key is pressed.
    pub alert: Option<String>,
}

impl App {
    pub fn new(config: Config) -> App {
        let typing = TypingIndicator::new(config.typing_tick());
        let mut app = App {
            state: AppState::Chat,
            flow_state: FlowState::Idle,
            config,
            transcript: Transcript::new(),
            typing,
            input: String::new(),
            alert: None,
        };
        app.show_welcome();
        app
    }

    pub fn show_welcome(&mut self) {
        let ai_name = self.config.ai_name.clone();
        let welcome = self.config.ai_welcome.clone();
        self.transcript.append(ai_name, welcome, MessageKind::Ai);
    }

    pub fn is_sending(&self) -> bool {
        self.flow_state == FlowState::Sending
    }

    /// True while either flow is outstanding.
    pub fn is_busy(&self) -> bool {
        self.flow_state != FlowState::Idle
    }

    /// Advances the typing animation. Called once per draw-loop iteration;
    /// the indicator itself decides whether a tick has elapsed.
    pub fn tick(&mut self) {
        if let Some((handle, frame)) = self.typing.advance(Instant::now()) {
            let ai_name = self.config.ai_name.clone();
            self.transcript.replace(handle, ai_name, frame);
        }
    }
}
