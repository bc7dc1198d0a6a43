//! Display formatting helpers for prices, percentages, and large magnitudes.

/// Format a price as a currency string.
///
/// Sub-cent prices get extra fraction digits (up to 6) so they don't all
/// render as "$0.00"; everything else gets 2 decimals with thousands grouping.
pub fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        let fixed = format!("{:.2}", price);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("${}.{}", group_thousands(int_part.parse().unwrap_or(0)), frac_part)
    } else if price >= 1.0 {
        format!("${:.2}", price)
    } else if price >= 0.01 {
        format!("${:.4}", price)
    } else {
        format!("${:.6}", price)
    }
}

/// Format a large currency value with a magnitude suffix.
///
/// Thresholds are checked largest-first: 1e12 -> T, 1e9 -> B, 1e6 -> M,
/// 1e3 -> K, otherwise a plain 2-decimal currency string.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000_000.0 {
        format!("${:.2}T", value / 1_000_000_000_000.0)
    } else if abs >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Format a percentage with an explicit sign: "+" for non-negative values.
pub fn format_percentage(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Truncate a string to `max_len` characters, appending "..." when cut.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let end = s
            .char_indices()
            .nth(max_len.saturating_sub(3))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}

fn group_thousands(n: u64) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}
