pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod kicad;
pub mod layout;
pub mod pins;

pub use cli::Cli;
pub use config::{GeneratorConfig, LayoutStrategy, SymbolConfig};
pub use error::{AppError, ConfigError, InputError, Result};
pub use generator::{generate, render, GenerateReport, RenderedSymbol};
pub use kicad::SymbolExporter;
pub use layout::{balance, SideAssignment, SymbolLayout};
pub use pins::{classify_group, ElectricalType, GroupRules, GroupTag, Pin, RawPin};
