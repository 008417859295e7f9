//! Region Climate Presets
//!
//! Indian cities grouped by region with typical temperature/humidity
//! ranges. The synthesizer samples a region uniformly and a city uniformly
//! within it; the desktop form uses the same table to show typical ranges
//! for the selected city preset.
//!
//! Temperature and humidity are display-only context: they are not dataset
//! columns and not model features. The labeling heuristic compensates with
//! a per-region baseline factor (see `labeling::region_baseline`).

use rand::seq::SliceRandom;
use rand::Rng;

/// One region's city presets and typical ambient ranges.
#[derive(Debug, Clone, Copy)]
pub struct RegionClimate {
    pub name: &'static str,
    pub cities: &'static [&'static str],
    /// Typical ambient temperature range, °C.
    pub temp_range: (f64, f64),
    /// Typical relative humidity range, %.
    pub humidity_range: (f64, f64),
}

pub const REGIONS: &[RegionClimate] = &[
    RegionClimate {
        name: "North",
        cities: &["Delhi", "Chandigarh", "Lucknow", "Jaipur", "Srinagar"],
        temp_range: (10.0, 25.0),
        humidity_range: (20.0, 80.0),
    },
    RegionClimate {
        name: "South",
        cities: &["Chennai", "Kochi", "Hyderabad", "Bengaluru", "Pune", "Madurai"],
        temp_range: (24.0, 34.0),
        humidity_range: (50.0, 90.0),
    },
    RegionClimate {
        name: "West",
        cities: &["Mumbai", "Goa", "Ahmedabad", "Surat"],
        temp_range: (23.0, 35.0),
        humidity_range: (50.0, 90.0),
    },
    RegionClimate {
        name: "East",
        cities: &["Kolkata", "Bhubaneswar", "Guwahati", "Patna"],
        temp_range: (22.0, 32.0),
        humidity_range: (50.0, 95.0),
    },
    RegionClimate {
        name: "Central",
        cities: &["Bhopal", "Nagpur", "Indore", "Raipur"],
        temp_range: (20.0, 32.0),
        humidity_range: (30.0, 85.0),
    },
    RegionClimate {
        name: "NorthEast",
        cities: &["Guwahati", "Imphal", "Shillong"],
        temp_range: (15.0, 27.0),
        humidity_range: (60.0, 98.0),
    },
];

/// Find the region a city preset belongs to.
///
/// Guwahati appears under both East and NorthEast in the presets; the
/// first listing wins, matching the synthesizer's iteration order.
pub fn region_for_city(city: &str) -> Option<&'static RegionClimate> {
    REGIONS.iter().find(|r| r.cities.contains(&city))
}

/// All city presets in region order (for the form's dropdown).
pub fn all_cities() -> Vec<&'static str> {
    REGIONS.iter().flat_map(|r| r.cities.iter().copied()).collect()
}

/// Sample a (city, region) pair: region uniform, then city uniform within it.
pub fn sample_city<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static RegionClimate) {
    let region = REGIONS.choose(rng).expect("REGIONS is non-empty");
    let city = *region.cities.choose(rng).expect("region has cities");
    (city, region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_region_lookup() {
        assert_eq!(region_for_city("Mumbai").unwrap().name, "West");
        assert_eq!(region_for_city("Srinagar").unwrap().name, "North");
        assert!(region_for_city("Atlantis").is_none());
    }

    #[test]
    fn test_guwahati_resolves_to_first_listing() {
        assert_eq!(region_for_city("Guwahati").unwrap().name, "East");
    }

    #[test]
    fn test_sample_city_is_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (city, region) = sample_city(&mut rng);
            assert!(region.cities.contains(&city));
            assert!(region.temp_range.0 < region.temp_range.1);
            assert!(region.humidity_range.0 < region.humidity_range.1);
        }
    }
}
