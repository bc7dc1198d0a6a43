use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::utils::format_compact;

/// Market totals across the fetched page, with a loading marker while a
/// refresh is in flight.
pub fn render_overview_bar(f: &mut Frame, app: &App, area: Rect) {
    let overview = &app.overview;
    let status = if app.coins_loading { " ⟳" } else { "" };

    let line = Line::from(vec![
        Span::styled(
            "Coinwatch",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" [{}]", app.currency.to_uppercase())),
        Span::raw(" | Market Cap: "),
        Span::raw(format_compact(overview.total_market_cap)),
        Span::raw(" | 24h Volume: "),
        Span::raw(format_compact(overview.total_volume)),
        Span::raw(" | "),
        Span::styled(
            format!("▲{}", overview.gainers),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" / "),
        Span::styled(
            format!("▼{}", overview.losers),
            Style::default().fg(Color::Red),
        ),
        Span::styled(status, Style::default().fg(Color::Yellow)),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_loading(f: &mut Frame, title: &str, area: Rect) {
    let placeholder = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(placeholder, area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
