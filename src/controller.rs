use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::app::{App, FlowState};
use crate::message::MessageKind;
use crate::transport::ChatTransport;

const SEND_FAILED_MESSAGE: &str = "Error: Could not contact server.";
const CLEAR_FAILED_MESSAGE: &str = "Something went wrong while clearing the chat.";

/// Synchronous head of the send flow, run under the UI lock: validates the
/// input, renders the user's message optimistically and arms the flow guard.
/// Returns the trimmed text to dispatch, or `None` when nothing should
/// happen (blank input, or a send or clear already in flight).
pub fn begin_send(app: &mut App) -> Option<String> {
    if app.is_busy() {
        return None;
    }
    let text = app.input.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let user_name = app.config.user_name.clone();
    app.transcript.append(user_name, text.clone(), MessageKind::User);
    app.input.clear();
    app.flow_state = FlowState::Sending;
    Some(text)
}

/// Async tail of the send flow. After a cosmetic delay, renders the AI
/// placeholder, starts the typing animation, awaits the backend, and
/// replaces the placeholder with the reply or a system error. The indicator
/// is stopped and the send guard released on both paths.
pub async fn run_send_flow<T>(app: Arc<Mutex<App>>, transport: Arc<T>, text: String)
where
    T: ChatTransport + ?Sized,
{
    let reply_delay = { app.lock().await.config.reply_delay() };
    sleep(reply_delay).await;

    let handle = {
        let mut guard = app.lock().await;
        let ai_name = guard.config.ai_name.clone();
        let handle = guard.transcript.append(ai_name, "...", MessageKind::Ai);
        guard.typing.start(handle);
        handle
    };

    let result = transport.send_message(&text).await;

    let mut guard = app.lock().await;
    guard.typing.stop();
    match result {
        Ok(reply) => {
            log::info!("chat reply received ({} chars)", reply.message.len());
            let ai_name = guard.config.ai_name.clone();
            guard.transcript.replace(handle, ai_name, reply.message);
        }
        Err(e) => {
            log::error!("chat request failed: {e}");
            guard.transcript.replace(handle, "System", SEND_FAILED_MESSAGE);
            guard.transcript.set_kind(handle, MessageKind::System);
        }
    }
    guard.flow_state = FlowState::Idle;
}

/// Clear flow, entered only after the user confirmed; the caller arms the
/// `Clearing` guard before spawning so no send can start underneath the
/// delay window and invalidate its handles. On success the transcript is
/// reset through a short transient placeholder and ends with the welcome
/// message alone. On failure nothing is touched except a blocking alert.
/// The guard is released on both paths.
pub async fn run_clear_flow<T>(app: Arc<Mutex<App>>, transport: Arc<T>)
where
    T: ChatTransport + ?Sized,
{
    match transport.clear_history().await {
        Err(e) => {
            log::error!("failed to clear chat: {e}");
            let mut guard = app.lock().await;
            guard.alert = Some(CLEAR_FAILED_MESSAGE.to_string());
            guard.flow_state = FlowState::Idle;
        }
        Ok(()) => {
            log::info!("chat history cleared");
            let (placeholder, clear_delay) = {
                let mut guard = app.lock().await;
                guard.transcript.clear();
                let ai_name = guard.config.ai_name.clone();
                let placeholder = guard.transcript.append(ai_name, "...", MessageKind::Ai);
                (placeholder, guard.config.clear_delay())
            };
            sleep(clear_delay).await;

            let mut guard = app.lock().await;
            guard.transcript.remove(placeholder);
            guard.show_welcome();
            guard.flow_state = FlowState::Idle;
        }
    }
}
