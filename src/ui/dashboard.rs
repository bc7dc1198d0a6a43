use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::Coin;
use crate::utils::{format_compact, format_percentage, format_price, truncate_str};

use super::components::render_loading;

pub fn render_coin_table(f: &mut Frame, app: &App, area: Rect) {
    if app.coins.is_empty() {
        if app.coins_loading {
            render_loading(f, "Coins", area);
        } else {
            let empty = Paragraph::new("No coin data")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Coins"));
            f.render_widget(empty, area);
        }
        return;
    }

    let title = if app.search_mode || !app.search_query.is_empty() {
        format!(
            "Coins - Search: '{}' ({}/{})",
            app.search_query,
            app.filtered_coins.len(),
            app.coins.len()
        )
    } else {
        format!("Coins ({} total) - Sort: {}", app.coins.len(), app.sort_key.label())
    };

    render_rows(f, app, &app.filtered_coins, app.selected_coin, &title, area);
}

pub fn render_watchlist(f: &mut Frame, app: &App, area: Rect) {
    if app.watchlist.is_empty() {
        let hint = Paragraph::new("Watchlist is empty. Press Space on a coin to add it.")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Watchlist"));
        f.render_widget(hint, area);
        return;
    }

    if app.coins.is_empty() && app.coins_loading {
        render_loading(f, "Watchlist", area);
        return;
    }

    let title = format!("Watchlist ({} coins)", app.watchlist.len());
    render_rows(f, app, &app.watchlist_rows, app.selected_watch, &title, area);
}

fn render_rows(
    f: &mut Frame,
    app: &App,
    rows: &[usize],
    selected: usize,
    title: &str,
    area: Rect,
) {
    // Borders, title row and table header
    let visible_height = area.height.saturating_sub(3) as usize;
    let total_items = rows.len();

    if total_items == 0 {
        let empty = Paragraph::new("No matching coins")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        f.render_widget(empty, area);
        return;
    }

    // Keep the selected row inside the window
    let scroll_offset = if selected >= visible_height && visible_height > 0 {
        selected - visible_height + 1
    } else {
        0
    };
    let visible_end = std::cmp::min(scroll_offset + visible_height, total_items);

    let mut table_rows = Vec::with_capacity(visible_height);
    for (i, &coin_idx) in rows.iter().skip(scroll_offset).take(visible_height).enumerate() {
        let coin = &app.coins[coin_idx];
        let global_idx = scroll_offset + i;
        let style = if global_idx == selected {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        table_rows.push(coin_row(coin, app.watchlist.contains(&coin.id)).style(style));
    }

    let header = Row::new(vec!["#", "", "Name", "Symbol", "Price", "24h %", "Market Cap", "Volume"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(table, area);

    if total_items > visible_height {
        let scroll_indicator = format!(" {}-{}/{} ", scroll_offset + 1, visible_end, total_items);
        let indicator_width = scroll_indicator.len() as u16;
        if indicator_width < area.width {
            let indicator_area = Rect {
                x: area.x + area.width - indicator_width - 1,
                y: area.y,
                width: indicator_width,
                height: 1,
            };
            let indicator = Paragraph::new(scroll_indicator).style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, indicator_area);
        }
    }
}

fn coin_row(coin: &Coin, watched: bool) -> Row<'static> {
    let change = coin.price_change_percentage_24h;
    let change_style = match change {
        Some(c) if c > 0.0 => Style::default().fg(Color::Green),
        Some(c) if c < 0.0 => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Gray),
    };

    Row::new(vec![
        Cell::from(
            coin.market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::from(if watched { "★" } else { " " }),
        Cell::from(truncate_str(&coin.name, 24)),
        Cell::from(coin.symbol.to_uppercase()),
        Cell::from(
            coin.current_price
                .map(format_price)
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::from(
            change
                .map(format_percentage)
                .unwrap_or_else(|| "-".to_string()),
        )
        .style(change_style),
        Cell::from(
            coin.market_cap
                .map(format_compact)
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::from(
            coin.total_volume
                .map(format_compact)
                .unwrap_or_else(|| "-".to_string()),
        ),
    ])
}
