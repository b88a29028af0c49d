//! Number formatting for the French UI

/// `1234567.4` -> `"1 234 567"`. Rounds to whole units.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Always carries a sign: `+250`, `-80`, `+0`
pub fn format_signed_amount(value: f64) -> String {
    let formatted = format_amount(value);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{formatted}")
    }
}

/// One decimal with a comma: `4.8` -> `"4,8"`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}").replace('.', ",")
}
