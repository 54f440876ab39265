/// Format an amount in Ghana cedis, e.g. `GH₵ 20.00`
pub fn format_cedis(amount: f64) -> String {
    format!("GH₵ {:.2}", amount)
}

/// Format a bundle size: below 1 GB as megabytes, otherwise gigabytes
/// without trailing zeros.
pub fn format_capacity(capacity_gb: f64) -> String {
    if capacity_gb > 0.0 && capacity_gb < 1.0 {
        return format!("{} MB", (capacity_gb * 1000.0).round() as i64);
    }
    let s = format!("{:.2}", capacity_gb);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{} GB", s)
}
