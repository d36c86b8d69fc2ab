//! Digit grouping for large numbers in diagnostic messages.

/// Format a value rounded to the nearest integer with `_` between groups of
/// three digits, e.g. `2_183_915`.
///
/// Only used for human-readable rejection messages; computations never see
/// the grouped form.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() || value.abs() >= u64::MAX as f64 {
        return value.to_string();
    }

    let digits = (value.round().abs() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value.round() < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(ch);
    }
    grouped
}
