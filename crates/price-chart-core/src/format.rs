// File: crates/price-chart-core/src/format.rs
// Summary: Pure formatting functions used for series label, tooltip and y-axis tick text.

/// Label of the single price series, e.g. `Precio (USD)`.
pub fn series_label(currency: &str) -> String {
    format!("Precio ({currency})")
}

/// Y-axis tick text: `$` followed by the value at two decimals.
pub fn format_price_tick(value: f64) -> String {
    format!("${}", format_fixed(value, 2))
}

/// Tooltip text for a hovered point, e.g. `Precio: $20.00 EUR`.
pub fn format_tooltip_label(value: f64, currency: &str) -> String {
    format!("Precio: ${} {}", format_fixed(value, 2), currency)
}

/// Fixed-point text with the same results as JavaScript's `Number.prototype.toFixed`.
///
/// Differences from `format!("{:.N}")` that matter here:
/// - exact halfway values round away from zero (`0.125` -> `0.13`), not to even;
/// - negative zero prints without a sign;
/// - non-finite values print as `NaN`, `Infinity`, `-Infinity`;
/// - magnitudes of `1e21` and above use exponent notation (`1e+21`).
pub fn format_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 {
        return format!("{value:e}").replacen('e', "e+", 1);
    }
    let body = if is_exact_tie(magnitude, digits) {
        round_tie_up(magnitude, digits)
    } else {
        format!("{:.*}", digits, magnitude)
    };
    // -0.001 keeps its sign in toFixed ("-0.00"); only a true zero loses it.
    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

// Decided on the exact decimal expansion; scaling by 10^digits loses bits past 2^53.
fn is_exact_tie(magnitude: f64, digits: usize) -> bool {
    if magnitude.fract() == 0.0 {
        return false;
    }
    let exact = format!("{:.1100}", magnitude);
    match exact.split_once('.') {
        Some((_, frac)) => {
            let tail = &frac[digits.min(frac.len())..];
            tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
        }
        None => false,
    }
}

fn round_tie_up(magnitude: f64, digits: usize) -> String {
    let exact = format!("{:.*}", digits + 1, magnitude);
    let truncated = &exact[..exact.len() - 1];
    let truncated = truncated.strip_suffix('.').unwrap_or(truncated);
    increment_last_digit(truncated)
}

fn increment_last_digit(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    // every digit carried over
    let mut out = String::with_capacity(bytes.len() + 1);
    out.push('1');
    out.push_str(&String::from_utf8_lossy(&bytes));
    out
}
