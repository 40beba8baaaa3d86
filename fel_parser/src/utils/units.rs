//! Byte-size token handling for crash log fields
//!
//! Crash logs express sizes inconsistently: "16266548k" in the Memory line,
//! "76288K" in heap generation lines, plain byte counts in the global flag
//! table. Everything normalizes to bytes here; a malformed token yields None
//! and the caller leaves the field unset.

/// Parse a crash-log size token ("2048K", "16g", "4096", "8257532k") into bytes.
pub fn parse_size_token(token: &str) -> Option<u64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let (digits, suffix) = match token.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => token.split_at(idx),
        None => (token, ""),
    };

    let value: u64 = digits.parse().ok()?;

    let multiplier: u64 = match suffix.trim() {
        "" | "b" | "B" => 1,
        "k" | "K" | "kb" | "KB" => 1024,
        "m" | "M" | "mb" | "MB" => 1024 * 1024,
        "g" | "G" | "gb" | "GB" => 1024 * 1024 * 1024,
        "t" | "T" | "tb" | "TB" => 1024u64.pow(4),
        _ => return None,
    };

    value.checked_mul(multiplier)
}

/// Format a byte count in human-readable form
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Percentage of numerator over denominator, rounded, zero-guarded.
pub fn percent(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u64
}
