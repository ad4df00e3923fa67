use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::message::{Message, MessageKind};

pub fn draw_chat(f: &mut Frame<'_>, app: &mut App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(size);

    draw_messages(f, app, chunks[0]);
    draw_status(f, app, chunks[1]);
    draw_input(f, app, chunks[2]);
}

fn message_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::User => Style::default().fg(Color::Rgb(255, 223, 128)),
        MessageKind::Ai => Style::default().fg(Color::Rgb(144, 238, 144)),
        MessageKind::System => Style::default().fg(Color::Red),
    }
}

fn message_lines(msg: &Message, area: Rect) -> Vec<Line<'static>> {
    let style = message_style(msg.kind);
    let timestamp = msg.timestamp.format("%H:%M").to_string();
    let mut lines = vec![Line::from(vec![
        Span::styled("┌─ ".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        Span::styled(" ".to_string(), style),
        Span::styled(msg.sender.clone(), style.add_modifier(Modifier::BOLD)),
    ])];

    let wrap_width = (area.width as usize).saturating_sub(4).max(1);
    for raw_line in msg.content.lines() {
        if raw_line.is_empty() {
            lines.push(Line::from(Span::styled("│".to_string(), style)));
            continue;
        }
        for wrapped in wrap(raw_line, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped.to_string(), style),
            ]));
        }
    }
    if msg.content.is_empty() {
        // The typing placeholder at dot count zero still gets a body line.
        lines.push(Line::from(Span::styled("│".to_string(), style)));
    }

    lines.push(Line::from(Span::styled("╰─".to_string(), style)));
    lines
}

fn draw_messages(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.transcript.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message_lines(message, area));
    }

    let total_lines = lines.len() as u16;
    let scroll = app.transcript.visible_scroll(total_lines, area.height);

    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame<'_>, app: &App, area: Rect) {
    let text = if app.is_sending() {
        "waiting for reply…"
    } else {
        "enter: send  ctrl+l: clear  pgup/pgdn: scroll  esc: quit"
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

fn draw_input(f: &mut Frame<'_>, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let input = Line::from(vec![
        Span::styled("→ ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.clone(), Style::default().fg(Color::White)),
    ]);

    let text_width = app.input.width() as u16;
    let scroll_offset = input_scroll_offset(area, text_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    f.set_cursor_position((input_cursor_x(area, text_width), area.y + 1));
}

fn input_scroll_offset(area: Rect, text_width: u16) -> u16 {
    text_width.saturating_sub(area.width.saturating_sub(2))
}

/// Cursor column for the input line, clamped so a line that exactly fills
/// the visible width does not push the cursor past the input area.
fn input_cursor_x(area: Rect, text_width: u16) -> u16 {
    let x = area.x + 2 + text_width - input_scroll_offset(area, text_width);
    x.min(area.x + area.width.saturating_sub(1))
}
