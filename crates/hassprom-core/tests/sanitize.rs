#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hassprom_core::metrics::sanitize_metric_name;

fn allowed(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

#[test]
fn co2_sensor_name() {
    let once = sanitize_metric_name("sensor.co₂");
    assert!(allowed(&once));
    assert_eq!(once, "sensoru0x2ecou0x2082");
    assert_eq!(sanitize_metric_name("sensor.co₂"), once);
}

#[test]
fn valid_names_pass_through() {
    for name in ["homeassistant_sensor_state", "a:b_c9", ""] {
        assert_eq!(sanitize_metric_name(name), name);
    }
}

#[test]
fn escapes_are_distinct_per_code_point() {
    let names = ["x-y", "x/y", "x y", "x°y", "x%y"];
    let out: Vec<String> = names.iter().map(|n| sanitize_metric_name(n)).collect();
    for (i, a) in out.iter().enumerate() {
        assert!(allowed(a), "{a}");
        for b in out.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
    assert_eq!(sanitize_metric_name("°"), "u0xb0");
}
