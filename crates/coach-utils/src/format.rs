//! Display formatting helpers for CLI output

/// Format a dollar amount with thousands separators, no cents
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a percentage to one decimal place
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a ratio to two decimal places; infinity renders as a dash
pub fn format_ratio(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}x")
    } else {
        "-".to_string()
    }
}
