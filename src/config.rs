//! Generator settings.
//!
//! Everything the pipeline needs is carried in [`GeneratorConfig`]; nothing
//! is read from globals. A config file is plain JSON where every field is
//! optional:
//!
//! ```json
//! {
//!   "input": "stm32_pins.csv",
//!   "output": "stm32.kicad_sym",
//!   "symbol_name": "STM32F103C8",
//!   "pin_spacing": 2.54,
//!   "default_type": "passive",
//!   "rules": { "clock": ["CLK", "OSC", "MCO"] }
//! }
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::pins::{ElectricalType, GroupRules};

/// How pins are assigned to the two sides of the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Functional groups, balanced between the sides
    #[default]
    Grouped,
    /// Inputs and power inputs left, everything else right
    ByType,
}

/// Everything that shapes the emitted symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    pub symbol_name: String,
    pub reference: String,
    pub footprint: String,
    pub datasheet: String,
    /// Pin length in mm.
    pub pin_length: f64,
    /// Vertical pitch between pins in mm.
    pub pin_spacing: f64,
    /// Half the body width in mm.
    pub half_width: f64,
    /// Blank rows after each group, in units of `pin_spacing`.
    pub group_gap: f64,
    pub default_type: ElectricalType,
    pub delimiter: char,
    pub strategy: LayoutStrategy,
    pub rules: GroupRules,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            symbol_name: "My_Chip".to_string(),
            reference: "U".to_string(),
            footprint: String::new(),
            datasheet: String::new(),
            pin_length: 2.54,
            pin_spacing: 2.54,
            half_width: 12.7,
            group_gap: 1.0,
            default_type: ElectricalType::Unspecified,
            delimiter: ',',
            strategy: LayoutStrategy::Grouped,
            rules: GroupRules::default(),
        }
    }
}

impl SymbolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "symbol_name",
                reason: "must not be empty".to_string(),
            });
        }
        for (field, value) in [
            ("pin_length", self.pin_length),
            ("pin_spacing", self.pin_spacing),
            ("half_width", self.half_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }
        if !(self.group_gap.is_finite() && self.group_gap >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "group_gap",
                reason: format!("must not be negative, got {}", self.group_gap),
            });
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() && !self.delimiter.is_ascii_alphanumeric() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidValue {
                field: "delimiter",
                reason: format!("{:?} is not a single-byte separator", self.delimiter),
            })
        }
    }
}

/// Input and output locations plus symbol settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub symbol: SymbolConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("pins.csv"),
            output: PathBuf::from("my_lib.kicad_sym"),
            symbol: SymbolConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(text)?;
        config.symbol.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = GeneratorConfig::from_json(
            r#"{
                "input": "mcu.csv",
                "symbol_name": "MCU",
                "pin_spacing": 5.08,
                "default_type": "passive",
                "strategy": "by-type",
                "delimiter": ";",
                "rules": { "clock": ["MCO"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("mcu.csv"));
        assert_eq!(config.output, PathBuf::from("my_lib.kicad_sym"));
        assert_eq!(config.symbol.symbol_name, "MCU");
        assert_eq!(config.symbol.pin_spacing, 5.08);
        assert_eq!(config.symbol.default_type, ElectricalType::Passive);
        assert_eq!(config.symbol.strategy, LayoutStrategy::ByType);
        assert_eq!(config.symbol.delimiter_byte().unwrap(), b';');
        assert_eq!(config.symbol.rules.clock, vec!["MCO"]);
        assert_eq!(config.symbol.rules.power, GroupRules::default().power);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let err = GeneratorConfig::from_json(r#"{ "pin_spacing": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "pin_spacing", .. }));
    }

    #[test]
    fn rejects_bad_delimiter() {
        let config = SymbolConfig {
            delimiter: 'é',
            ..SymbolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_pin_type() {
        let err = GeneratorConfig::from_json(r#"{ "default_type": "analog" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
