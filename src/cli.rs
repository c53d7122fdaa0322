use clap::Parser;
use std::path::PathBuf;

use crate::config::{GeneratorConfig, LayoutStrategy};
use crate::error::{ConfigError, Result};
use crate::pins::ElectricalType;

#[derive(Parser, Debug)]
#[command(name = "pinsym")]
#[command(version)]
#[command(about = "Generate a KiCad schematic symbol from a CSV pin list", long_about = None)]
pub struct Cli {
    /// Pin table: number, name[, electrical type]
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output .kicad_sym library path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Symbol name
    #[arg(short, long)]
    pub name: Option<String>,

    /// JSON config file; command-line values take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pin placement strategy
    #[arg(long, value_enum)]
    pub strategy: Option<LayoutStrategy>,

    /// Pin length in mm
    #[arg(long)]
    pub pin_length: Option<f64>,

    /// Vertical pin pitch in mm
    #[arg(long)]
    pub pin_spacing: Option<f64>,

    /// Half of the body width in mm
    #[arg(long)]
    pub half_width: Option<f64>,

    /// Electrical type for pins with an unknown or empty type (KiCad keyword)
    #[arg(long, value_name = "TYPE")]
    pub default_type: Option<String>,

    /// Field separator of the pin table
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Build the effective configuration: defaults, then the config file,
    /// then command-line overrides.
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("Loading config: {}", path.display());
                GeneratorConfig::load(path)?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }

        let symbol = &mut config.symbol;
        if let Some(name) = &self.name {
            symbol.symbol_name = name.clone();
        }
        if let Some(strategy) = self.strategy {
            symbol.strategy = strategy;
        }
        if let Some(v) = self.pin_length {
            symbol.pin_length = v;
        }
        if let Some(v) = self.pin_spacing {
            symbol.pin_spacing = v;
        }
        if let Some(v) = self.half_width {
            symbol.half_width = v;
        }
        if let Some(t) = &self.default_type {
            symbol.default_type = t.parse::<ElectricalType>()?;
        }
        if let Some(d) = self.delimiter {
            symbol.delimiter = d;
        }

        self.validate(&config)?;
        Ok(config)
    }

    pub fn validate(&self, config: &GeneratorConfig) -> Result<()> {
        config.symbol.validate()?;
        if config.input == config.output {
            return Err(ConfigError::InvalidValue {
                field: "output",
                reason: "must differ from the input path".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
