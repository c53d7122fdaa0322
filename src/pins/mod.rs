pub mod classify;
pub mod loader;
pub mod model;

pub use classify::{
    classify_group, classify_pins, group_pins, map_electrical_type, natural_cmp, GroupRules, GroupTag,
};
pub use loader::{load_pins, parse_pins};
pub use model::{ElectricalType, Pin, RawPin};
