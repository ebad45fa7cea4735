//! Joining cluster labels onto map polygons by region name

use crate::labels::HardLabels;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fill colours for clusters 0 to 9
pub const CLUSTER_COLORS: [&str; 10] = [
    "red", "yellow", "green", "blue", "purple", "orange", "pink", "cyan", "lime", "brown",
];

/// Colour for regions without a clustering result
pub const UNMATCHED_COLOR: &str = "gray";

/// Canonical form of a region name used as the join key: trimmed, lower-cased
pub fn normalize_region_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Palette colour for a cluster index
pub fn cluster_color(cluster: usize) -> &'static str {
    CLUSTER_COLORS[cluster % CLUSTER_COLORS.len()]
}

/// Polygon keys with the cluster each one received
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapJoin {
    /// `(normalized polygon key, cluster)` in polygon order
    pub assignments: Vec<(String, Option<usize>)>,
    /// Normalized polygon keys that have no clustering result
    pub missing: Vec<String>,
}

impl MapJoin {
    /// Colour per polygon, in polygon order
    pub fn colors(&self) -> Vec<&'static str> {
        self.assignments
            .iter()
            .map(|(_, cluster)| cluster.map_or(UNMATCHED_COLOR, cluster_color))
            .collect()
    }
}

/// Attach hard labels to polygon keys, matching on normalized names.
///
/// When two table rows normalize to the same key the first row wins.
pub fn join_labels<S: AsRef<str>>(polygon_keys: &[S], labels: &HardLabels) -> MapJoin {
    let mut by_key: HashMap<String, usize> = HashMap::with_capacity(labels.len());
    for (key, cluster) in labels.iter() {
        by_key.entry(normalize_region_key(key)).or_insert(cluster);
    }

    let mut assignments = Vec::with_capacity(polygon_keys.len());
    let mut missing = Vec::new();
    for polygon in polygon_keys {
        let key = normalize_region_key(polygon.as_ref());
        let cluster = by_key.get(&key).copied();
        if cluster.is_none() {
            missing.push(key.clone());
        }
        assignments.push((key, cluster));
    }

    if !missing.is_empty() {
        log::warn!("Regions without a clustering result: {:?}", missing);
    }

    MapJoin { assignments, missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn labels() -> HardLabels {
        HardLabels::from_labels(
            vec!["Kota Kendari ".into(), "BUTON".into(), "Muna".into()],
            arr1(&[0, 1, 2]),
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_region_key() {
        assert_eq!(normalize_region_key("  Kota Baubau\t"), "kota baubau");
    }

    #[test]
    fn test_join_matches_normalized_names() {
        let join = join_labels(&["kota kendari", " Buton", "Wakatobi"], &labels());

        assert_eq!(
            join.assignments,
            vec![
                ("kota kendari".to_string(), Some(0)),
                ("buton".to_string(), Some(1)),
                ("wakatobi".to_string(), None),
            ]
        );
        assert_eq!(join.missing, vec!["wakatobi".to_string()]);
        assert_eq!(join.colors(), vec!["red", "yellow", UNMATCHED_COLOR]);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(cluster_color(0), "red");
        assert_eq!(cluster_color(9), "brown");
        assert_eq!(cluster_color(10), "red");
    }
}
