use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, View};
use super::{
    components::{centered_rect, render_overview_bar},
    dashboard::{render_coin_table, render_watchlist},
    detail::render_detail,
};

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Overview bar
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_overview_bar(f, app, chunks[0]);

    match app.view {
        View::Dashboard => render_coin_table(f, app, chunks[1]),
        View::Watchlist => render_watchlist(f, app, chunks[1]),
        View::Detail => render_detail(f, app, chunks[1]),
    }

    let footer_text = match app.view {
        View::Dashboard | View::Watchlist if app.search_mode => {
            format!("Search: {}_ | Enter: Apply | Esc: Cancel", app.search_query)
        }
        View::Dashboard => {
            "↑↓: Navigate | Enter: Detail | Space: Watch | s: Sort | /: Search | Tab: Watchlist | r: Refresh | q: Quit"
                .to_string()
        }
        View::Watchlist => {
            "↑↓: Navigate | Enter: Detail | Space: Unwatch | /: Search | Tab: Dashboard | r: Refresh | q: Quit"
                .to_string()
        }
        View::Detail => {
            "1/7/3/9: Chart range | Space: Watch | r: Reload | Esc: Back | q: Quit".to_string()
        }
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);

    // Error overlay
    if let Some(ref error) = app.error_message {
        let area = centered_rect(60, 20, f.area());
        f.render_widget(Clear, area);
        let error_block = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default()
                .borders(Borders::ALL)
                .title("Error - press r to retry")
                .style(Style::default().fg(Color::Red)));
        f.render_widget(error_block, area);
    }
}
