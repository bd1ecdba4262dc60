//! Configuration: the district gazetteer, travel-speed table and traffic
//! calendar the optimizer consults.

use crate::coordinates::Coordinates;
use std::collections::HashMap;

/// Mode of transport an executor uses, affecting travel speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportMode {
    Car,
    Motorcycle,
    Public,
}

/// Traffic condition bucket for a given hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficBand {
    Rush,
    Evening,
    Normal,
}

/// Determines the traffic band for an hour (0..24), using the default
/// rush-hour windows 07-09 and 17-19, and evening from 20 onward.
pub fn traffic_band_for_hour(hour: u32) -> TrafficBand {
    if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        TrafficBand::Rush
    } else if hour >= 20 {
        TrafficBand::Evening
    } else {
        TrafficBand::Normal
    }
}

/// District gazetteer, travel speeds and optimization bounds.
pub struct GeoConfig {
    pub(crate) district_coordinates: HashMap<String, Coordinates>,
    pub(crate) travel_speeds_kmh: HashMap<TransportMode, HashMap<&'static str, f64>>,
    pub(crate) default_district: String,
    pub(crate) default_distance_km: f64,
    pub(crate) max_distance_km: f64,
}

impl GeoConfig {
    pub fn builder() -> GeoConfigBuilder {
        GeoConfigBuilder::new()
    }

    pub fn district_coordinates(&self, district: &str) -> Option<Coordinates> {
        self.district_coordinates.get(district).copied()
    }

    pub fn speed_kmh(&self, mode: TransportMode, band: TrafficBand) -> f64 {
        let band_key = match band {
            TrafficBand::Rush => "rush_hour",
            TrafficBand::Evening => "evening",
            TrafficBand::Normal => "normal",
        };
        self.travel_speeds_kmh
            .get(&mode)
            .and_then(|speeds| speeds.get(band_key))
            .copied()
            .unwrap_or(25.0)
    }
}

/// Builder for [`GeoConfig`], seeded with the Tashkent district gazetteer
/// and travel-speed table used as the default fixture.
pub struct GeoConfigBuilder {
    district_coordinates: HashMap<String, Coordinates>,
    travel_speeds_kmh: HashMap<TransportMode, HashMap<&'static str, f64>>,
    default_district: String,
    default_distance_km: f64,
    max_distance_km: f64,
}

impl GeoConfigBuilder {
    pub fn new() -> Self {
        let mut district_coordinates = HashMap::new();
        district_coordinates.insert("Chilanzar".to_string(), Coordinates::new(41.2856, 69.2034));
        district_coordinates.insert("Yunusabad".to_string(), Coordinates::new(41.3265, 69.2891));
        district_coordinates.insert(
            "Mirzo-Ulugbek".to_string(),
            Coordinates::new(41.3142, 69.2856),
        );
        district_coordinates.insert("Yashnabad".to_string(), Coordinates::new(41.2667, 69.2167));
        district_coordinates.insert("Sergeli".to_string(), Coordinates::new(41.2045, 69.2234));
        district_coordinates.insert(
            "Shaykhantakhur".to_string(),
            Coordinates::new(41.3058, 69.2542),
        );
        district_coordinates.insert("Almazar".to_string(), Coordinates::new(41.3357, 69.2978));
        district_coordinates.insert("Bektemir".to_string(), Coordinates::new(41.2089, 69.3367));
        district_coordinates.insert("Uchtepa".to_string(), Coordinates::new(41.2756, 69.1892));
        district_coordinates.insert("Yangihayot".to_string(), Coordinates::new(41.2123, 69.1234));

        let mut travel_speeds_kmh = HashMap::new();
        travel_speeds_kmh.insert(
            TransportMode::Car,
            HashMap::from([("normal", 25.0), ("rush_hour", 15.0), ("evening", 30.0)]),
        );
        travel_speeds_kmh.insert(
            TransportMode::Motorcycle,
            HashMap::from([("normal", 35.0), ("rush_hour", 25.0), ("evening", 40.0)]),
        );
        travel_speeds_kmh.insert(
            TransportMode::Public,
            HashMap::from([("normal", 20.0), ("rush_hour", 12.0), ("evening", 18.0)]),
        );

        Self {
            district_coordinates,
            travel_speeds_kmh,
            default_district: "Chilanzar".to_string(),
            default_distance_km: 10.0,
            max_distance_km: 15.0,
        }
    }

    pub fn district(mut self, name: impl Into<String>, coordinates: Coordinates) -> Self {
        self.district_coordinates.insert(name.into(), coordinates);
        self
    }

    pub fn default_district(mut self, name: impl Into<String>) -> Self {
        self.default_district = name.into();
        self
    }

    pub fn default_distance_km(mut self, km: f64) -> Self {
        self.default_distance_km = km;
        self
    }

    pub fn max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }

    pub fn build(self) -> GeoConfig {
        GeoConfig {
            district_coordinates: self.district_coordinates,
            travel_speeds_kmh: self.travel_speeds_kmh,
            default_district: self.default_district,
            default_distance_km: self.default_distance_km,
            max_distance_km: self.max_distance_km,
        }
    }
}

impl Default for GeoConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
