use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, ChartPeriod};
use crate::utils::{format_compact, format_percentage, format_price};

use super::charts::render_price_chart;
use super::components::render_loading;

pub fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),  // Coin facts
            Constraint::Length(3),  // Period tabs
            Constraint::Min(10),    // Price chart
        ])
        .split(area);

    render_facts(f, app, chunks[0]);
    render_period_tabs(f, app, chunks[1]);
    render_price_chart(f, app, chunks[2]);
}

fn render_facts(f: &mut Frame, app: &App, area: Rect) {
    let Some(ref detail) = app.detail else {
        if app.detail_loading {
            render_loading(f, "Coin", area);
        } else {
            let missing = Paragraph::new("No data for this coin")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Coin"));
            f.render_widget(missing, area);
        }
        return;
    };

    let currency = app.currency.as_str();
    let market = detail.market_data.as_ref();
    let fmt_opt = |v: Option<f64>, f: fn(f64) -> String| {
        v.map(f).unwrap_or_else(|| "-".to_string())
    };

    let change = market.and_then(|m| m.price_change_percentage_24h);
    let change_style = match change {
        Some(c) if c > 0.0 => Style::default().fg(Color::Green),
        Some(c) if c < 0.0 => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Gray),
    };

    let watched = app.watchlist.contains(&detail.id);
    let star = if watched { " ★" } else { "" };
    let rank = detail
        .market_cap_rank
        .map(|r| format!("#{r}"))
        .unwrap_or_else(|| "unranked".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(
                detail.name.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" ({}) {rank}{star}", detail.symbol.to_uppercase())),
        ]),
        Line::from(vec![
            Span::raw("Price:       "),
            Span::raw(fmt_opt(market.and_then(|m| m.price_in(currency)), format_price)),
            Span::raw("  24h: "),
            Span::styled(fmt_opt(change, format_percentage), change_style),
        ]),
        Line::from(format!(
            "Market Cap:  {}",
            fmt_opt(market.and_then(|m| m.market_cap_in(currency)), format_compact)
        )),
        Line::from(format!(
            "24h Volume:  {}",
            fmt_opt(market.and_then(|m| m.volume_in(currency)), format_compact)
        )),
        Line::from(format!(
            "Circulating: {}",
            market
                .and_then(|m| m.circulating_supply)
                .map(|s| format!("{:.0} {}", s, detail.symbol.to_uppercase()))
                .unwrap_or_else(|| "-".to_string())
        )),
        Line::from(vec![
            Span::raw(format!(
                "All-time high: {} (",
                fmt_opt(market.and_then(|m| m.ath_in(currency)), format_price)
            )),
            Span::raw(fmt_opt(market.and_then(|m| m.ath_change_in(currency)), format_percentage)),
            Span::raw(" from ATH)"),
        ]),
    ];

    let facts = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Coin"));
    f.render_widget(facts, area);
}

fn render_period_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = ChartPeriod::ALL.iter().map(|p| p.label()).collect();
    let selected = ChartPeriod::ALL
        .iter()
        .position(|&p| p == app.chart_period)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Range"))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .select(selected)
        .divider("|");
    f.render_widget(tabs, area);
}
