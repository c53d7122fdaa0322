use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// KiCad pin electrical type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricalType {
    Input,
    Output,
    Bidirectional,
    TriState,
    Passive,
    Free,
    #[default]
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NoConnect,
}

impl ElectricalType {
    pub const ALL: [ElectricalType; 12] = [
        ElectricalType::Input,
        ElectricalType::Output,
        ElectricalType::Bidirectional,
        ElectricalType::TriState,
        ElectricalType::Passive,
        ElectricalType::Free,
        ElectricalType::Unspecified,
        ElectricalType::PowerIn,
        ElectricalType::PowerOut,
        ElectricalType::OpenCollector,
        ElectricalType::OpenEmitter,
        ElectricalType::NoConnect,
    ];

    /// Keyword used in `.kicad_sym` files.
    pub fn as_kicad(&self) -> &'static str {
        match self {
            ElectricalType::Input => "input",
            ElectricalType::Output => "output",
            ElectricalType::Bidirectional => "bidirectional",
            ElectricalType::TriState => "tri_state",
            ElectricalType::Passive => "passive",
            ElectricalType::Free => "free",
            ElectricalType::Unspecified => "unspecified",
            ElectricalType::PowerIn => "power_in",
            ElectricalType::PowerOut => "power_out",
            ElectricalType::OpenCollector => "open_collector",
            ElectricalType::OpenEmitter => "open_emitter",
            ElectricalType::NoConnect => "no_connect",
        }
    }
}

impl fmt::Display for ElectricalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_kicad())
    }
}

impl FromStr for ElectricalType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ElectricalType::ALL
            .into_iter()
            .find(|t| t.as_kicad().eq_ignore_ascii_case(key))
            .ok_or_else(|| ConfigError::UnknownPinType(key.to_string()))
    }
}

/// One pin row as read from the input, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPin {
    pub number: String,
    pub name: String,
    pub kind: String,
}

impl RawPin {
    pub fn new(number: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A classified pin. Immutable once built by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    pub number: String,
    pub name: String,
    pub pin_type: ElectricalType,
    pub group: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kicad_keywords_parse_back() {
        for t in ElectricalType::ALL {
            assert_eq!(t.as_kicad().parse::<ElectricalType>().unwrap(), t);
        }
        assert_eq!("POWER_IN".parse::<ElectricalType>().unwrap(), ElectricalType::PowerIn);
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        let err = "analog".parse::<ElectricalType>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPinType(ref k) if k == "analog"));
    }

    #[test]
    fn serde_uses_kicad_keywords() {
        let json = serde_json::to_string(&ElectricalType::NoConnect).unwrap();
        assert_eq!(json, "\"no_connect\"");
        let t: ElectricalType = serde_json::from_str("\"open_collector\"").unwrap();
        assert_eq!(t, ElectricalType::OpenCollector);
    }
}
