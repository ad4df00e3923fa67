use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_confirm(f: &mut Frame<'_>, title: &str, body: &str) {
    draw_modal(f, title, body, Color::LightYellow);
}

pub fn draw_alert(f: &mut Frame<'_>, message: &str) {
    let body = format!("{message}\n\nPress any key to continue.");
    draw_modal(f, "Notice", &body, Color::Red);
}

fn draw_modal(f: &mut Frame<'_>, title: &str, body: &str, accent: Color) {
    let area = centered_rect(50, 30, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(accent).bg(Color::Black));

    let paragraph = Paragraph::new(body)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
