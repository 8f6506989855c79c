// Adapters layer: concrete record sources for external systems.

pub mod csv_source;
