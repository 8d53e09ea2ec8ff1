//! Metric name sanitization.

/// Characters Prometheus accepts in a metric name.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}

/// Replace every character outside `[A-Za-z0-9_:]` with `u0x<hex>` of its
/// code point. Total and deterministic: `"sensor.co₂"` becomes
/// `"sensoru0x2ecou0x2082"`.
pub fn sanitize_metric_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if is_allowed(c) {
            out.push(c);
        } else {
            out.push_str(&format!("u{:#x}", c as u32));
        }
    }
    out
}
