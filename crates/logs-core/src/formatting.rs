/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use logs_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so exact midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an invocation cost in US dollars.
///
/// Single invocations cost fractions of a cent, so nine decimal places are
/// shown instead of the usual two.
///
/// ```
/// use logs_core::formatting::format_cost;
///
/// assert_eq!(format_cost(0.000000625125), "$0.000000625");
/// assert_eq!(format_cost(1234.5), "$1,234.500000000");
/// ```
pub fn format_cost(amount: f64) -> String {
    if amount < 0.0 {
        format!("$-{}", format_number(amount.abs(), 9))
    } else {
        format!("${}", format_number(amount, 9))
    }
}

/// Format a megabyte quantity the way the platform prints it, e.g. `"128 MB"`.
pub fn format_memory(megabytes: u64) -> String {
    format!("{} MB", format_number(megabytes as f64, 0))
}

/// Format a duration in milliseconds.
///
/// * `< 1000` ms → `"102.25 ms"` (trailing zeros dropped)
/// * `≥ 1000` ms → `"3.20 s"`
///
/// ```
/// use logs_core::formatting::format_duration_ms;
///
/// assert_eq!(format_duration_ms(300.0), "300 ms");
/// assert_eq!(format_duration_ms(102.25), "102.25 ms");
/// assert_eq!(format_duration_ms(3200.0), "3.20 s");
/// ```
pub fn format_duration_ms(millis: f64) -> String {
    // Pick the unit after rounding so 999.996 ms does not print as "1000 ms".
    let rounded = (millis * 100.0).round() / 100.0;
    if rounded.abs() < 1000.0 {
        let text = format!("{:.2}", rounded);
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        format!("{} ms", trimmed)
    } else {
        format!("{} s", format_number(millis / 1000.0, 2))
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    // ── format_cost ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_cost_sub_cent() {
        assert_eq!(format_cost(0.000025005), "$0.000025005");
    }

    #[test]
    fn test_format_cost_zero() {
        assert_eq!(format_cost(0.0), "$0.000000000");
    }

    #[test]
    fn test_format_cost_negative() {
        assert_eq!(format_cost(-0.5), "$-0.500000000");
    }

    // ── format_memory ────────────────────────────────────────────────────────

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory(128), "128 MB");
        assert_eq!(format_memory(10_240), "10,240 MB");
    }

    // ── format_duration_ms ───────────────────────────────────────────────────

    #[test]
    fn test_format_duration_sub_second() {
        assert_eq!(format_duration_ms(0.0), "0 ms");
        assert_eq!(format_duration_ms(999.5), "999.5 ms");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration_ms(1000.0), "1.00 s");
        assert_eq!(format_duration_ms(61_500.0), "61.50 s");
    }

    #[test]
    fn test_format_duration_rounds_before_choosing_unit() {
        assert_eq!(format_duration_ms(999.996), "1.00 s");
        assert_eq!(format_duration_ms(999.994), "999.99 ms");
    }
}
