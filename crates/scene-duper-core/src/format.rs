/// Decimal units, GB from 10^9 bytes upward, otherwise MB.
pub fn format_file_size(size: u64) -> String {
    if size >= 1_000_000_000 {
        format!("{:.2} GB", size as f64 / 1_000_000_000.0)
    } else {
        format!("{:.2} MB", size as f64 / 1_000_000.0)
    }
}

/// Whole hours and minutes, e.g. `1h 2m`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}
