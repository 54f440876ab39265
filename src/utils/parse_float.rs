/// Parse the leading decimal number of a string, ignoring anything after it.
///
/// Mirrors how form input is usually read: `"2GB"` is 2, `" 1.5 "` is 1.5
/// and text with no leading number is NaN.
pub fn parse_float_prefix(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return f64::NAN;
    }
    s[..end].trim_end_matches('.').parse::<f64>().unwrap_or(f64::NAN)
}
