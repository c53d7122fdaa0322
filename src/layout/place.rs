use std::collections::BTreeMap;

use crate::config::SymbolConfig;
use crate::pins::{ElectricalType, Pin};
use super::balance::SideAssignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Pin orientation in degrees; pins point away from the body.
    pub fn rotation(&self) -> f64 {
        match self {
            Side::Left => 0.0,
            Side::Right => 180.0,
        }
    }

    fn x_sign(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPin {
    pub pin: Pin,
    pub side: Side,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Body geometry plus every pin's position, left side first.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolLayout {
    pub half_width: f64,
    pub half_height: f64,
    pub pins: Vec<PlacedPin>,
}

impl SymbolLayout {
    pub fn side(&self, side: Side) -> impl Iterator<Item = &PlacedPin> {
        self.pins.iter().filter(move |p| p.side == side)
    }
}

/// Lay out balanced groups. Each group is followed by `group_gap` blank rows
/// and the body reserves room for those gaps plus a one-row margin top and
/// bottom.
pub fn layout_grouped(
    groups: &BTreeMap<String, Vec<Pin>>,
    sides: &SideAssignment,
    config: &SymbolConfig,
) -> SymbolLayout {
    let left = side_groups(&sides.left, groups);
    let right = side_groups(&sides.right, groups);

    let max_pins = sides.left_pins(groups).max(sides.right_pins(groups));
    let max_groups = left.len().max(right.len());
    let total_rows = max_pins as f64 + max_groups as f64 * config.group_gap + 2.0;

    place(&left, &right, total_rows, config.group_gap, config)
}

fn side_groups<'a>(names: &[String], groups: &'a BTreeMap<String, Vec<Pin>>) -> Vec<&'a [Pin]> {
    names
        .iter()
        .filter_map(|n| groups.get(n).map(Vec::as_slice))
        .collect()
}

/// Two-column layout without grouping: inputs, power inputs and open
/// collector pins on the left, everything else on the right, in input order.
pub fn layout_by_type(pins: &[Pin], config: &SymbolConfig) -> SymbolLayout {
    let (left, right): (Vec<Pin>, Vec<Pin>) = pins.iter().cloned().partition(|p| {
        matches!(
            p.pin_type,
            ElectricalType::Input | ElectricalType::PowerIn | ElectricalType::OpenCollector
        )
    });

    let max_pins = left.len().max(right.len()).max(2);
    let total_rows = max_pins as f64 + 1.0;

    place(&[left.as_slice()], &[right.as_slice()], total_rows, 0.0, config)
}

fn place(
    left: &[&[Pin]],
    right: &[&[Pin]],
    total_rows: f64,
    gap: f64,
    config: &SymbolConfig,
) -> SymbolLayout {
    let half_rows = total_rows / 2.0;
    let mut pins = Vec::new();

    for (side, groups) in [(Side::Left, left), (Side::Right, right)] {
        let x = side.x_sign() * (config.half_width + config.pin_length);
        let mut row = 1.0;
        for group in groups {
            for pin in group.iter() {
                pins.push(PlacedPin {
                    pin: pin.clone(),
                    side,
                    x,
                    y: config.pin_spacing * (half_rows - row),
                    rotation: side.rotation(),
                });
                row += 1.0;
            }
            row += gap;
        }
    }

    SymbolLayout {
        half_width: config.half_width,
        half_height: config.pin_spacing * half_rows,
        pins,
    }
}
