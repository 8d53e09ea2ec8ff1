//! Prometheus text exposition (format 0.0.4).

use std::fmt::Write;

use super::registry::{FamilySnapshot, MetricKind};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Prometheus float spelling: `NaN`, `+Inf`, `-Inf`; whole numbers keep a
/// trailing `.0`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Name a family is exported under. Counters carry `_total`.
fn sample_name(family: &FamilySnapshot) -> String {
    match family.kind {
        MetricKind::Counter if !family.name.ends_with("_total") => format!("{}_total", family.name),
        _ => family.name.clone(),
    }
}

/// Render families in order. Families without samples still emit their
/// HELP/TYPE header.
pub fn encode_text(families: &[FamilySnapshot]) -> String {
    let mut out = String::new();
    for family in families {
        let name = sample_name(family);
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(&family.help));
        let _ = writeln!(out, "# TYPE {} {}", name, family.kind.as_str());
        for (values, v) in &family.samples {
            let label_str = family
                .label_names
                .iter()
                .zip(values)
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", name, format_value(*v));
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", name, label_str, format_value(*v));
            }
        }
    }
    out
}
