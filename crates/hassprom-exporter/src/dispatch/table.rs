use std::collections::HashMap;

use hassprom_core::error::Result;
use hassprom_core::State;

use crate::handlers::{self, HandlerCtx};

/// Per-domain handler. Plain function pointers: the table is built once and
/// never captures state.
pub type DomainHandler = fn(&HandlerCtx<'_>, &State) -> Result<()>;

/// Domain -> handler lookup.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<&'static str, DomainHandler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Table with every built-in domain registered.
    pub fn builtin() -> Self {
        let mut t = Self::new();
        t.register("alarm_control_panel", handlers::alarm_control_panel);
        t.register("automation", handlers::automation);
        t.register("binary_sensor", handlers::binary_sensor);
        t.register("climate", handlers::climate);
        t.register("counter", handlers::counter);
        t.register("cover", handlers::cover);
        t.register("device_tracker", handlers::device_tracker);
        t.register("fan", handlers::fan);
        t.register("humidifier", handlers::humidifier);
        t.register("input_boolean", handlers::input_boolean);
        t.register("input_number", handlers::input_number);
        t.register("light", handlers::light);
        t.register("lock", handlers::lock);
        t.register("number", handlers::number);
        t.register("person", handlers::person);
        t.register("sensor", handlers::sensor);
        t.register("switch", handlers::switch);
        t.register("update", handlers::update);
        t.register("zwave", handlers::zwave);
        t
    }

    /// Later registrations replace earlier ones for the same domain.
    pub fn register(&mut self, domain: &'static str, handler: DomainHandler) {
        self.handlers.insert(domain, handler);
    }

    pub fn get(&self, domain: &str) -> Option<DomainHandler> {
        self.handlers.get(domain).copied()
    }

    pub fn registered_domains(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = self.handlers.keys().copied().collect();
        out.sort_unstable();
        out
    }
}
