use std::collections::BTreeMap;

use crate::pins::{GroupTag, Pin};

/// Groups always drawn on the left, top to bottom, when present.
pub const LEFT_ANCHORED: [&str; 3] = [GroupTag::POWER, GroupTag::RESET, GroupTag::CLOCK];

/// Group names per side, each in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideAssignment {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl SideAssignment {
    pub fn left_pins(&self, groups: &BTreeMap<String, Vec<Pin>>) -> usize {
        count(&self.left, groups)
    }

    pub fn right_pins(&self, groups: &BTreeMap<String, Vec<Pin>>) -> usize {
        count(&self.right, groups)
    }
}

fn count(names: &[String], groups: &BTreeMap<String, Vec<Pin>>) -> usize {
    names.iter().map(|n| groups.get(n).map_or(0, Vec::len)).sum()
}

/// Split groups between the two sides of the body.
///
/// Anchored groups start on the left and everything else starts on the right
/// in alphabetical order. The first right-hand group is then moved left for
/// as long as doing so strictly shrinks the pin-count difference. This is a
/// greedy pass: once the head of the right side fails to help, no later
/// group is tried.
pub fn balance(groups: &BTreeMap<String, Vec<Pin>>) -> SideAssignment {
    let left: Vec<String> = LEFT_ANCHORED
        .iter()
        .filter(|name| groups.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    let mut right: Vec<String> = groups
        .keys()
        .filter(|name| !LEFT_ANCHORED.contains(&name.as_str()))
        .cloned()
        .collect();

    let mut left_count = count(&left, groups);
    let mut right_count = count(&right, groups);
    let mut sides = SideAssignment { left, right: Vec::new() };

    while !right.is_empty() && right_count > left_count {
        let size = groups.get(&right[0]).map_or(0, Vec::len);
        let before = left_count.abs_diff(right_count);
        let after = (left_count + size).abs_diff(right_count - size);
        if after >= before {
            break;
        }

        let moved = right.remove(0);
        log::debug!("Moving group {} ({} pins) to the left side", moved, size);
        sides.left.push(moved);
        left_count += size;
        right_count -= size;
    }

    sides.right = right;
    sides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::ElectricalType;

    fn groups(sizes: &[(&str, usize)]) -> BTreeMap<String, Vec<Pin>> {
        sizes.iter()
            .map(|(name, n)| {
                let pins = (0..*n)
                    .map(|i| Pin {
                        number: i.to_string(),
                        name: format!("{}{}", name, i),
                        pin_type: ElectricalType::Unspecified,
                        group: name.to_string(),
                    })
                    .collect();
                (name.to_string(), pins)
            })
            .collect()
    }

    #[test]
    fn moves_one_group_then_stops() {
        let g = groups(&[("POWER", 3), ("PA", 5), ("PB", 5)]);
        let sides = balance(&g);

        assert_eq!(sides.left, vec!["POWER", "PA"]);
        assert_eq!(sides.right, vec!["PB"]);
        assert_eq!(sides.left_pins(&g).abs_diff(sides.right_pins(&g)), 3);
    }

    #[test]
    fn anchored_groups_keep_their_order() {
        let g = groups(&[("CLOCK", 2), ("POWER", 4), ("RESET", 1), ("PA", 16)]);
        let sides = balance(&g);

        assert_eq!(sides.left, vec!["POWER", "RESET", "CLOCK"]);
        assert_eq!(sides.right, vec!["PA"]);
    }

    #[test]
    fn greedy_stops_at_first_unhelpful_group() {
        // Moving PA (12) would overshoot; PB (2) would help but is never tried.
        let g = groups(&[("POWER", 5), ("PA", 12), ("PB", 2)]);
        let sides = balance(&g);

        assert_eq!(sides.left, vec!["POWER"]);
        assert_eq!(sides.right, vec!["PA", "PB"]);
    }

    #[test]
    fn no_anchors_moves_from_empty_left() {
        let g = groups(&[("OTHER", 2), ("PA", 4), ("PB", 4)]);
        let sides = balance(&g);

        assert_eq!(sides.left, vec!["OTHER", "PA"]);
        assert_eq!(sides.right, vec!["PB"]);
    }

    #[test]
    fn every_group_lands_on_exactly_one_side() {
        let g = groups(&[("POWER", 2), ("PA", 3), ("PB", 1), ("PC", 7), ("OTHER", 2)]);
        let sides = balance(&g);

        let mut all: Vec<_> = sides.left.iter().chain(&sides.right).cloned().collect();
        all.sort();
        let mut expected: Vec<_> = g.keys().cloned().collect();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn empty_input_is_empty_assignment() {
        let sides = balance(&BTreeMap::new());
        assert_eq!(sides, SideAssignment::default());
    }
}
