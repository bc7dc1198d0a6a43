use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::utils::format_price;

/// Render the price series for the detail view's current coin and period.
pub fn render_price_chart(f: &mut Frame, app: &App, area: Rect) {
    let title = format!("Price ({})", app.chart_period.label());

    let Some(ref series) = app.chart else {
        let text = if app.chart_loading {
            "Loading chart..."
        } else {
            "No chart data available"
        };
        let placeholder = Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(placeholder, area);
        return;
    };

    let chart_data: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|p| (p.timestamp.timestamp() as f64, p.price))
        .collect();

    if chart_data.len() < 2 {
        let no_data = Paragraph::new("Not enough data points to draw")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(no_data, area);
        return;
    }

    let (min_time, max_time) = series.get_time_range().unwrap();
    let (min_price, max_price) = series.get_price_range().unwrap();

    // Intraday windows get clock labels, longer windows calendar dates
    let time_format = if app.chart_period.intraday() {
        "%H:%M"
    } else {
        "%m/%d"
    };
    let mid_time = min_time + (max_time - min_time) / 2;

    let datasets = vec![Dataset::default()
        .name("Price")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Cyan))
        .graph_type(GraphType::Line)
        .data(&chart_data)];

    let chart_title = match series.current_price() {
        Some(price) => format!("{title} - Current: {}", format_price(price)),
        None => title,
    };

    let chart = Chart::new(datasets)
        .block(Block::default().title(chart_title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds([min_time.timestamp() as f64, max_time.timestamp() as f64])
                .labels(vec![
                    Span::from(min_time.format(time_format).to_string()),
                    Span::from(mid_time.format(time_format).to_string()),
                    Span::from(max_time.format(time_format).to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds([min_price, max_price])
                .labels(vec![
                    Span::from(format_price(min_price)),
                    Span::from(format_price((min_price + max_price) / 2.0)),
                    Span::from(format_price(max_price)),
                ]),
        );
    f.render_widget(chart, area);
}
