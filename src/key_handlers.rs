use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::Mutex;

use crate::app::{App, AppState, FlowState};
use crate::controller;
use crate::transport::ChatTransport;

/// Dispatches one key press. Flows that touch the network are spawned so the
/// draw loop keeps animating while they run.
pub fn handle_key<T>(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>, transport: Arc<T>)
where
    T: ChatTransport + ?Sized + 'static,
{
    // A blocking alert swallows the next key press, nothing else.
    if app.alert.is_some() {
        app.alert = None;
        return;
    }

    match app.state {
        AppState::Chat => handle_chat_key(key, app, app_arc, transport),
        AppState::ClearConfirm => handle_clear_confirm_key(key, app, app_arc, transport),
        AppState::QuitConfirm => handle_quit_confirm_key(key, app),
        AppState::Quit => {}
    }
}

fn handle_chat_key<T>(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>, transport: Arc<T>)
where
    T: ChatTransport + ?Sized + 'static,
{
    match key.code {
        KeyCode::Enter => {
            // Shift+Enter is reserved; it must not submit.
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                return;
            }
            if let Some(text) = controller::begin_send(app) {
                tokio::spawn(controller::run_send_flow(app_arc, transport, text));
            }
        }
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::PageUp => app.transcript.scroll_up(),
        KeyCode::PageDown => app.transcript.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'l' => {
                        // No clearing while another flow is in flight.
                        if !app.is_busy() {
                            app.state = AppState::ClearConfirm;
                        }
                    }
                    'u' => app.transcript.scroll_up(),
                    'd' => app.transcript.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_clear_confirm_key<T>(
    key: KeyEvent,
    app: &mut App,
    app_arc: Arc<Mutex<App>>,
    transport: Arc<T>,
) where
    T: ChatTransport + ?Sized + 'static,
{
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Chat;
            // Armed here, under the same lock as the confirmation, so a
            // send cannot slip in before the spawned flow starts.
            app.flow_state = FlowState::Clearing;
            tokio::spawn(controller::run_clear_flow(app_arc, transport));
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            // Declined: nothing changes.
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

fn handle_quit_confirm_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::transport::{ChatReply, TransportError};
    use async_trait::async_trait;

    struct NullTransport;

    #[async_trait]
    impl ChatTransport for NullTransport {
        async fn send_message(&self, _text: &str) -> Result<ChatReply, TransportError> {
            Err(TransportError::Protocol("unreachable in test".to_string()))
        }

        async fn clear_history(&self) -> Result<(), TransportError> {
            Err(TransportError::Protocol("unreachable in test".to_string()))
        }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn snapshot(app: &App) -> Vec<(String, String)> {
        app.transcript
            .messages()
            .iter()
            .map(|m| (m.sender.clone(), m.content.clone()))
            .collect()
    }

    #[tokio::test]
    async fn declined_clear_leaves_transcript_untouched() {
        let app_arc = Arc::new(Mutex::new(App::new(Config::default())));
        let transport = Arc::new(NullTransport);

        let mut app = app_arc.lock().await;
        app.input = "keep me".to_string();
        let before = snapshot(&app);

        handle_key(
            press(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &mut app,
            app_arc.clone(),
            transport.clone(),
        );
        assert_eq!(app.state, AppState::ClearConfirm);

        handle_key(
            press(KeyCode::Char('n'), KeyModifiers::NONE),
            &mut app,
            app_arc.clone(),
            transport,
        );
        assert_eq!(app.state, AppState::Chat);
        assert_eq!(snapshot(&app), before);
        assert_eq!(app.input, "keep me");
    }

    #[tokio::test]
    async fn shift_enter_does_not_submit() {
        let app_arc = Arc::new(Mutex::new(App::new(Config::default())));
        let transport = Arc::new(NullTransport);

        let mut app = app_arc.lock().await;
        app.input = "draft".to_string();
        handle_key(
            press(KeyCode::Enter, KeyModifiers::SHIFT),
            &mut app,
            app_arc.clone(),
            transport,
        );
        assert_eq!(app.input, "draft");
        assert_eq!(app.transcript.len(), 1);
        assert!(!app.is_sending());
    }

    #[tokio::test]
    async fn alert_is_dismissed_by_any_key() {
        let app_arc = Arc::new(Mutex::new(App::new(Config::default())));
        let transport = Arc::new(NullTransport);

        let mut app = app_arc.lock().await;
        app.alert = Some("Something went wrong while clearing the chat.".to_string());
        handle_key(
            press(KeyCode::Char('x'), KeyModifiers::NONE),
            &mut app,
            app_arc.clone(),
            transport,
        );
        assert!(app.alert.is_none());
        // The key that dismissed the alert is not typed into the input.
        assert!(app.input.is_empty());
    }

    #[tokio::test]
    async fn confirmed_clear_arms_the_flow_guard() {
        let app_arc = Arc::new(Mutex::new(App::new(Config::default())));
        let transport = Arc::new(NullTransport);

        let mut app = app_arc.lock().await;
        handle_key(
            press(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &mut app,
            app_arc.clone(),
            transport.clone(),
        );
        handle_key(
            press(KeyCode::Char('y'), KeyModifiers::NONE),
            &mut app,
            app_arc.clone(),
            transport,
        );
        assert_eq!(app.state, AppState::Chat);
        // Enter must not start a send while the clear flow is outstanding.
        assert_eq!(app.flow_state, FlowState::Clearing);
        app.input = "Hi".to_string();
        assert!(crate::controller::begin_send(&mut app).is_none());
    }

    #[tokio::test]
    async fn quit_confirm_round_trip() {
        let app_arc = Arc::new(Mutex::new(App::new(Config::default())));
        let transport = Arc::new(NullTransport);

        let mut app = app_arc.lock().await;
        handle_key(
            press(KeyCode::Esc, KeyModifiers::NONE),
            &mut app,
            app_arc.clone(),
            transport.clone(),
        );
        assert_eq!(app.state, AppState::QuitConfirm);
        handle_key(
            press(KeyCode::Char('y'), KeyModifiers::NONE),
            &mut app,
            app_arc.clone(),
            transport,
        );
        assert_eq!(app.state, AppState::Quit);
    }
}
