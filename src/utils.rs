/// Parses the leading integer of `value`, the way hand-edited URL fields are read.
///
/// Leading whitespace is skipped and an optional sign is accepted; parsing stops at
/// the first non-digit, so `"12abc"` reads as `12`. A `0x`/`0X` prefix switches to
/// hexadecimal (`"0x1A"` reads as `26`). Input without any leading digit yields
/// `NaN`, which callers let flow through their arithmetic.
pub fn parse_int(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut magnitude = 0.0_f64;
    let mut seen = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        magnitude = magnitude * f64::from(radix) + f64::from(digit);
        seen = true;
    }
    if !seen {
        return f64::NAN;
    }
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Renders a number the way it shows up in the UI: integral values without a
/// fraction, `NaN`/`Infinity` spelled out, negative zero as `0`, and magnitudes
/// below `1e-6` or from `1e21` up in exponent form (`1e+21`, `1.5e-7`).
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return exponent_text(value);
    }
    format!("{}", value)
}

fn exponent_text(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
