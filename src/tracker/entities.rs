//! Derived entity lists (dots, hotspots)
//!
//! Built by scanning host child objects: excluded markers are dropped, the
//! trailing number of each name gives its ordinal, and the survivors are
//! sorted and renumbered from 1.

use crate::probe::{Probe, ProbeValue};

/// A navigable child object of the host
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// 1-based display number after sorting
    pub number: usize,
    pub name: String,
    /// Ordinal parsed from the name, if any
    pub ordinal: Option<u32>,
    pub position: Option<[f64; 3]>,
}

/// Trailing decimal run of `name` (`"Dot_07"` is 7)
pub fn trailing_ordinal(name: &str) -> Option<u32> {
    let digits = name.len() - name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    name[name.len() - digits..].parse().ok()
}

pub fn is_excluded(name: &str, patterns: &[String]) -> bool {
    let name = name.to_lowercase();
    patterns
        .iter()
        .any(|pattern| !pattern.is_empty() && name.contains(&pattern.to_lowercase()))
}

/// Read a 3D position, accepting 2D values on the `z = 0` plane
pub fn read_position(value: &ProbeValue) -> Option<[f64; 3]> {
    match value.as_vector::<3>() {
        Probe::Found(p) => Some(p),
        Probe::NotAvailable => value.as_vector::<2>().found().map(|[x, y]| [x, y, 0.0]),
    }
}

/// Build the sorted, renumbered entity list from host children
///
/// Children without a `name` are skipped. Entities without an ordinal sort
/// after numbered ones, by name.
pub fn derive_entities(children: &[ProbeValue], position_field: &str, exclusions: &[String]) -> Vec<Entity> {
    let mut entities: Vec<Entity> = children
        .iter()
        .filter_map(|child| {
            let name = child.field("name").and_then(|v| v.as_str()).found()?;
            if is_excluded(name, exclusions) {
                return None;
            }
            Some(Entity {
                number: 0,
                name: name.to_string(),
                ordinal: trailing_ordinal(name),
                position: child.field(position_field).found().and_then(read_position),
            })
        })
        .collect();

    entities.sort_by(|a, b| match (a.ordinal, b.ordinal) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
    for (i, entity) in entities.iter_mut().enumerate() {
        entity.number = i + 1;
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn children(value: serde_json::Value) -> Vec<ProbeValue> {
        ProbeValue::from(&value).into_list().found().unwrap()
    }

    #[test]
    fn test_trailing_ordinal() {
        assert_eq!(trailing_ordinal("Dot_07"), Some(7));
        assert_eq!(trailing_ordinal("hotspot12"), Some(12));
        assert_eq!(trailing_ordinal("spot_a"), None);
        assert_eq!(trailing_ordinal("3d_spot"), None);
    }

    #[test]
    fn test_sort_filter_and_renumber() {
        let list = children(json!([
            { "name": "Spot_10", "center": [1, 1, 1] },
            { "name": "Spot_2", "center": [2, 2, 2] },
            { "name": "SpotMarker_1" },
            { "name": "Spot_Extra" },
            { "name": "Spot_3", "center": { "x": 3, "y": 3, "z": 3 } },
            { "center": [0, 0, 0] }
        ]));
        let exclusions = vec!["marker".to_string()];
        let entities = derive_entities(&list, "center", &exclusions);

        let names: Vec<_> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Spot_2", "Spot_3", "Spot_10", "Spot_Extra"]);
        let numbers: Vec<_> = entities.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(entities[1].position, Some([3.0, 3.0, 3.0]));
        assert_eq!(entities[3].position, None);
    }

    #[test]
    fn test_two_dimensional_position() {
        let list = children(json!([{ "name": "dot_1", "position": [10.5, -4] }]));
        let entities = derive_entities(&list, "position", &[]);
        assert_eq!(entities[0].position, Some([10.5, -4.0, 0.0]));
    }
}
