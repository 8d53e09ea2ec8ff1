#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use hassprom_exporter::config::{ComponentOverride, FilterConfig};
use hassprom_exporter::filter::{ComponentOverrides, EntityFilter, Glob};

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn glob_matching() {
    let g = Glob::compile("sensor.*_temp?").unwrap();
    assert!(g.matches("sensor.kitchen_temp1"));
    assert!(g.matches("sensor._tempX"));
    assert!(!g.matches("sensor.kitchen_temp"));
    assert!(!g.matches("light.kitchen_temp1"));

    assert!(Glob::compile("*").unwrap().matches(""));
    assert!(Glob::compile("a*b*c").unwrap().matches("aXXbYYbZc"));
    assert!(!Glob::compile("a*b*c").unwrap().matches("aXXbYY"));
    assert!(Glob::compile(" ").is_err());
}

#[test]
fn empty_filter_accepts_everything() {
    let f = EntityFilter::compile(&FilterConfig::default()).unwrap();
    assert!(f.is_empty());
    assert!(f.matches("anything.at_all"));
}

#[test]
fn include_only() {
    let f = EntityFilter::compile(&FilterConfig {
        include_domains: strings(&["sensor"]),
        include_entities: strings(&["light.porch"]),
        ..Default::default()
    })
    .unwrap();
    assert!(f.matches("sensor.a"));
    assert!(f.matches("light.porch"));
    assert!(!f.matches("light.kitchen"));
}

#[test]
fn exclude_only() {
    let f = EntityFilter::compile(&FilterConfig {
        exclude_domains: strings(&["automation"]),
        exclude_entity_globs: strings(&["sensor.weather_*"]),
        ..Default::default()
    })
    .unwrap();
    assert!(!f.matches("automation.x"));
    assert!(!f.matches("sensor.weather_wind"));
    assert!(f.matches("sensor.kitchen"));
}

#[test]
fn mixed_precedence() {
    let f = EntityFilter::compile(&FilterConfig {
        include_domains: strings(&["sensor"]),
        include_entities: strings(&["sensor.weather_keep"]),
        exclude_entity_globs: strings(&["sensor.weather_*"]),
        exclude_entities: strings(&["sensor.noisy"]),
        ..Default::default()
    })
    .unwrap();
    assert!(f.matches("sensor.kitchen"));
    assert!(f.matches("sensor.weather_keep"));
    assert!(!f.matches("sensor.weather_wind"));
    assert!(!f.matches("sensor.noisy"));
    assert!(!f.matches("switch.x"));
}

#[test]
fn component_override_precedence() {
    let ov = |m: &str| ComponentOverride {
        override_metric: Some(m.to_string()),
    };
    let mut by_entity = BTreeMap::new();
    by_entity.insert("sensor.kitchen_power".to_string(), ov("entity"));
    let mut by_domain = BTreeMap::new();
    by_domain.insert("sensor".to_string(), ov("domain"));
    let mut by_glob = BTreeMap::new();
    by_glob.insert("sensor.*_power".to_string(), ov("glob"));

    let c = ComponentOverrides::compile(&by_entity, &by_domain, &by_glob).unwrap();
    assert_eq!(c.override_metric("sensor.kitchen_power"), Some("entity"));
    assert_eq!(c.override_metric("sensor.garage_power"), Some("glob"));
    assert_eq!(c.override_metric("sensor.garage_temp"), Some("domain"));
    assert_eq!(c.override_metric("light.garage_power"), None);
}
