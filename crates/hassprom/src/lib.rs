//! Top-level facade crate for hassprom.
//!
//! Re-exports the core registry types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use hassprom_core::*;
}

pub mod exporter {
    pub use hassprom_exporter::*;
}
