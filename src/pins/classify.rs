use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use super::model::{ElectricalType, Pin, RawPin};

/// Free-text type labels accepted in the input, matched case-insensitively.
const TYPE_TABLE: &[(&str, ElectricalType)] = &[
    ("Input", ElectricalType::Input),
    ("Output", ElectricalType::Output),
    ("I/O", ElectricalType::Bidirectional),
    ("Bidirectional", ElectricalType::Bidirectional),
    ("Power Input", ElectricalType::PowerIn),
    ("Power", ElectricalType::PowerIn),
    ("GND", ElectricalType::PowerIn),
    ("Passive", ElectricalType::Passive),
    ("NC", ElectricalType::NoConnect),
];

// Letters, a digit run, then end of name or a separator: PA2, PA10/TX, D0_N
static PORT_PIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)[0-9]+(?:[^A-Za-z0-9].*)?$").unwrap()
});

/// Map a free-text electrical type to a KiCad type, or `default` when the
/// text is empty or not in the table.
pub fn map_electrical_type(raw: &str, default: ElectricalType) -> ElectricalType {
    let key = raw.trim();
    if key.is_empty() {
        return default;
    }
    TYPE_TABLE
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(key))
        .map(|(_, t)| *t)
        .unwrap_or(default)
}

/// Functional group derived from a pin label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupTag {
    Power,
    Reset,
    Clock,
    Port(String),
    Other,
}

impl GroupTag {
    pub const POWER: &'static str = "POWER";
    pub const RESET: &'static str = "RESET";
    pub const CLOCK: &'static str = "CLOCK";
    pub const OTHER: &'static str = "OTHER";

    pub fn as_str(&self) -> &str {
        match self {
            GroupTag::Power => Self::POWER,
            GroupTag::Reset => Self::RESET,
            GroupTag::Clock => Self::CLOCK,
            GroupTag::Port(prefix) => prefix,
            GroupTag::Other => Self::OTHER,
        }
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword lists driving group detection. Keywords are matched as
/// substrings of the uppercased pin name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRules {
    pub power: Vec<String>,
    pub reset: Vec<String>,
    pub clock: Vec<String>,
}

impl Default for GroupRules {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            power: words(&["VDD", "VCC", "VSS", "GND", "VBAT", "VIN", "VREF", "VCAP", "AVDD", "DVDD", "3V3"]),
            reset: words(&["RST", "RESET"]),
            clock: words(&["CLK", "XTAL", "OSC", "XIN", "XOUT"]),
        }
    }
}

impl GroupRules {
    /// Classify a pin name. Rules are tried in order power, reset, clock,
    /// port prefix; the first match wins.
    pub fn classify(&self, name: &str) -> GroupTag {
        let upper = name.to_uppercase();
        let hit = |keywords: &[String]| {
            keywords
                .iter()
                .any(|k| !k.is_empty() && upper.contains(&k.to_uppercase()))
        };

        if hit(&self.power) {
            GroupTag::Power
        } else if hit(&self.reset) {
            GroupTag::Reset
        } else if hit(&self.clock) {
            GroupTag::Clock
        } else if let Some(caps) = PORT_PIN.captures(&upper) {
            GroupTag::Port(caps[1].to_string())
        } else {
            GroupTag::Other
        }
    }
}

/// Classify with the default keyword lists.
pub fn classify_group(name: &str) -> GroupTag {
    GroupRules::default().classify(name)
}

pub fn classify_pins(raw: &[RawPin], rules: &GroupRules, default: ElectricalType) -> Vec<Pin> {
    raw.iter()
        .map(|r| Pin {
            number: r.number.clone(),
            name: r.name.clone(),
            pin_type: map_electrical_type(&r.kind, default),
            group: rules.classify(&r.name).to_string(),
        })
        .collect()
}

/// Bucket pins by group label. Each bucket is in natural name order.
pub fn group_pins(pins: Vec<Pin>) -> BTreeMap<String, Vec<Pin>> {
    let mut groups: BTreeMap<String, Vec<Pin>> = BTreeMap::new();
    for pin in pins {
        groups.entry(pin.group.clone()).or_default().push(pin);
    }
    for members in groups.values_mut() {
        members.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    }
    groups
}

/// Compare names treating digit runs as integers and text case-insensitively.
/// Names equal under that rule fall back to plain byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => break,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.cmp(b)
}

// Arbitrary-length integer compare without parsing.
fn cmp_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits { Chunk::Digits(chunk) } else { Chunk::Text(chunk) })
    }
}
