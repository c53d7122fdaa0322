pub mod symbol;

pub use symbol::{SymbolExporter, FORMAT_VERSION, GENERATOR};
