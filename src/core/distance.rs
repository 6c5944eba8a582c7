use crate::models::{Community, Coordinates};
use std::collections::HashMap;

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Approximate zip centroid coordinates for Greater Cleveland and the
/// surrounding Northeast Ohio service area. Loaded once per process.
const ZIP_COORDINATES: &[(&str, f64, f64)] = &[
    // Cleveland city
    ("44102", 41.4744, -81.7399),
    ("44103", 41.5156, -81.6406),
    ("44104", 41.4817, -81.6256),
    ("44105", 41.4497, -81.6269),
    ("44106", 41.5090, -81.6082),
    ("44108", 41.5390, -81.6065),
    ("44109", 41.4449, -81.6951),
    ("44110", 41.5638, -81.5697),
    ("44111", 41.4585, -81.7885),
    ("44112", 41.5361, -81.5740),
    ("44113", 41.4847, -81.6972),
    ("44114", 41.5074, -81.6788),
    ("44115", 41.4928, -81.6656),
    ("44135", 41.4341, -81.8054),
    // West side suburbs
    ("44107", 41.4824, -81.7982),
    ("44116", 41.4692, -81.8541),
    ("44126", 41.4441, -81.8526),
    ("44140", 41.4850, -81.9220),
    ("44145", 41.4533, -81.9293),
    ("44070", 41.4152, -81.9230),
    ("44138", 41.3746, -81.9185),
    ("44017", 41.3687, -81.8632),
    ("44011", 41.4517, -82.0354),
    ("44012", 41.5053, -82.0110),
    ("44035", 41.3683, -82.1076),
    // East side suburbs
    ("44117", 41.5710, -81.5269),
    ("44118", 41.5016, -81.5562),
    ("44119", 41.5880, -81.5465),
    ("44120", 41.4734, -81.5805),
    ("44121", 41.5276, -81.5321),
    ("44122", 41.4649, -81.5057),
    ("44123", 41.6038, -81.5256),
    ("44124", 41.5110, -81.4661),
    ("44132", 41.6064, -81.5004),
    ("44137", 41.4090, -81.5629),
    ("44139", 41.3846, -81.4420),
    ("44143", 41.5553, -81.4813),
    ("44060", 41.6895, -81.3421),
    ("44094", 41.6179, -81.4065),
    // South side suburbs
    ("44125", 41.4345, -81.6292),
    ("44129", 41.3904, -81.7349),
    ("44130", 41.3784, -81.7795),
    ("44131", 41.3836, -81.6543),
    ("44133", 41.3140, -81.7450),
    ("44134", 41.3860, -81.7059),
    ("44136", 41.3126, -81.8296),
    ("44141", 41.3186, -81.6261),
    ("44147", 41.3149, -81.6726),
    ("44087", 41.3169, -81.4401),
    // Akron / Summit / Medina corridor
    ("44221", 41.1390, -81.4750),
    ("44224", 41.1765, -81.4343),
    ("44236", 41.2400, -81.4412),
    ("44256", 41.1403, -81.8632),
    ("44313", 41.1205, -81.5796),
    ("44333", 41.1481, -81.6315),
];

/// Great-circle distance between two points in miles, rounded to one
/// decimal place
///
/// Symmetric, and zero for identical points.
#[inline]
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_tenth(EARTH_RADIUS_MILES * c)
}

#[inline]
fn round_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

/// Postal-code coordinate lookup plus distance helpers over communities
///
/// Every operation is total: malformed or unknown zips and communities
/// without coordinates degrade to "distance unavailable" rather than
/// erroring, and ranking treats missing distance as neutral.
#[derive(Debug, Clone)]
pub struct ZipDistanceIndex {
    coords: HashMap<&'static str, Coordinates>,
}

impl ZipDistanceIndex {
    pub fn new() -> Self {
        let coords = ZIP_COORDINATES
            .iter()
            .map(|&(zip, lat, lng)| (zip, Coordinates { lat, lng }))
            .collect();
        Self { coords }
    }

    /// Resolve a 5-digit zip to coordinates; `None` for malformed or
    /// unmapped zips
    pub fn lookup(&self, zip: &str) -> Option<Coordinates> {
        if !is_valid_zip(zip) {
            return None;
        }
        self.coords.get(zip).copied()
    }

    /// Distance from a user's zip to a community's precomputed coordinates
    ///
    /// `None` when either side lacks coordinates.
    pub fn distance_to_community(&self, zip: &str, community: &Community) -> Option<f64> {
        let origin = self.lookup(zip)?;
        let target = community.coordinates?;
        Some(distance_miles(origin, target))
    }

    /// Sort communities by distance from a zip, ascending, dropping any
    /// without resolvable distance
    pub fn sort_by_distance(
        &self,
        communities: Vec<Community>,
        zip: &str,
    ) -> Vec<(Community, f64)> {
        let mut with_distance: Vec<(Community, f64)> = communities
            .into_iter()
            .filter_map(|c| {
                let d = self.distance_to_community(zip, &c)?;
                Some((c, d))
            })
            .collect();

        with_distance.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        with_distance
    }

    /// Communities within `max_miles` of a zip, closest first, at most
    /// `limit` results
    pub fn nearby(
        &self,
        communities: Vec<Community>,
        zip: &str,
        max_miles: f64,
        limit: usize,
    ) -> Vec<(Community, f64)> {
        let mut results = self.sort_by_distance(communities, zip);
        results.retain(|(_, d)| *d <= max_miles);
        results.truncate(limit);
        results
    }
}

impl Default for ZipDistanceIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community(id: &str, coordinates: Option<Coordinates>) -> Community {
        Community {
            id: id.to_string(),
            name: format!("Community {}", id),
            care_types: vec!["Assisted Living".to_string()],
            amenities: vec![],
            rating: None,
            coordinates,
            zip: None,
        }
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = Coordinates { lat: 41.4993, lng: -81.6944 };
        assert_eq!(distance_miles(p, p), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let a = Coordinates { lat: 41.4744, lng: -81.7399 };
        let b = Coordinates { lat: 41.1765, lng: -81.4343 };
        assert_eq!(distance_miles(a, b), distance_miles(b, a));
    }

    #[test]
    fn test_distance_rounded_to_one_decimal() {
        let a = Coordinates { lat: 41.4744, lng: -81.7399 };
        let b = Coordinates { lat: 41.4824, lng: -81.7982 };
        let d = distance_miles(a, b);
        assert_eq!(d, (d * 10.0).round() / 10.0);
    }

    #[test]
    fn test_adjacent_zips_closer_than_distant_zips() {
        // Cleveland west side vs Lakewood (adjacent) and Stow (far)
        let index = ZipDistanceIndex::new();
        let origin = index.lookup("44102").unwrap();
        let lakewood = index.lookup("44107").unwrap();
        let stow = index.lookup("44224").unwrap();

        let near = distance_miles(origin, lakewood);
        let far = distance_miles(origin, stow);

        assert!(near < 6.0, "44102 -> 44107 should be a few miles, got {}", near);
        assert!(far > 20.0, "44102 -> 44224 should be 20+ miles, got {}", far);
        assert!(near < far);
    }

    #[test]
    fn test_lookup_rejects_malformed_zips() {
        let index = ZipDistanceIndex::new();
        assert!(index.lookup("4410").is_none());
        assert!(index.lookup("441022").is_none());
        assert!(index.lookup("44l02").is_none());
        assert!(index.lookup("").is_none());
    }

    #[test]
    fn test_lookup_unknown_zip_is_none() {
        let index = ZipDistanceIndex::new();
        assert!(index.lookup("00000").is_none());
        assert!(index.lookup("90210").is_none());
    }

    #[test]
    fn test_distance_to_community_unavailable() {
        let index = ZipDistanceIndex::new();
        let with_coords = community("a", Some(Coordinates { lat: 41.48, lng: -81.80 }));
        let without_coords = community("b", None);

        assert!(index.distance_to_community("00000", &with_coords).is_none());
        assert!(index.distance_to_community("44102", &without_coords).is_none());
        assert!(index.distance_to_community("44102", &with_coords).is_some());
    }

    #[test]
    fn test_sort_by_distance_drops_unresolvable() {
        let index = ZipDistanceIndex::new();
        let communities = vec![
            community("far", Some(Coordinates { lat: 41.1765, lng: -81.4343 })),
            community("none", None),
            community("near", Some(Coordinates { lat: 41.4824, lng: -81.7982 })),
        ];

        let sorted = index.sort_by_distance(communities, "44102");
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].0.id, "near");
        assert_eq!(sorted[1].0.id, "far");
        assert!(sorted[0].1 < sorted[1].1);
    }

    #[test]
    fn test_nearby_filters_and_truncates() {
        let index = ZipDistanceIndex::new();
        let communities = vec![
            community("a", Some(Coordinates { lat: 41.4824, lng: -81.7982 })),
            community("b", Some(Coordinates { lat: 41.4692, lng: -81.8541 })),
            community("c", Some(Coordinates { lat: 41.1765, lng: -81.4343 })),
        ];

        let results = index.nearby(communities, "44102", 10.0, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.id, "a");
    }
}
