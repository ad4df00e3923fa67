// src/ui.rs

pub mod chat;
pub mod confirm;

use ratatui::Frame;

use crate::app::{App, AppState};

pub fn draw(f: &mut Frame, app: &mut App) {
    chat::draw_chat(f, app);

    match app.state {
        AppState::ClearConfirm => confirm::draw_confirm(
            f,
            "Confirm Clear",
            "Are you sure you want to clear this chat?\n\nPress 'y' to clear or 'n' to cancel.",
        ),
        AppState::QuitConfirm => confirm::draw_confirm(
            f,
            "Confirm Quit",
            "Are you sure you want to quit?\n\nPress 'y' to quit or 'n' to cancel.",
        ),
        _ => {}
    }

    if let Some(alert) = app.alert.clone() {
        confirm::draw_alert(f, &alert);
    }
}
