//! District distance/travel-time lookups, nearest-neighbor route
//! optimization and district clustering.

use crate::config::{traffic_band_for_hour, GeoConfig, TransportMode};
use crate::coordinates::haversine_km;
use crate::events::GeoEvent;
use dispatch_core::events::EventListeners;
use std::collections::BTreeMap;
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::warn;

/// One stop on an executor's route: a caller-chosen identifier and the
/// district it falls in (already resolved by the caller from an address
/// or GPS fix).
#[derive(Debug, Clone)]
pub struct RouteStop {
    pub id: String,
    pub district: String,
}

/// Result of [`GeoOptimizer::optimize_route`].
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub ordered_stops: Vec<RouteStop>,
    pub total_distance_km: f64,
    pub total_travel_time_minutes: u32,
    pub improvement_percent: f64,
}

pub struct GeoOptimizer {
    config: GeoConfig,
    event_listeners: EventListeners<GeoEvent>,
}

impl GeoOptimizer {
    pub fn new(config: GeoConfig) -> Self {
        Self {
            config,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: dispatch_core::events::EventListener<GeoEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    pub fn config(&self) -> &GeoConfig {
        &self.config
    }

    /// Distance between two districts, in kilometers. Falls back to the
    /// configured default distance (with a warning) when either district is
    /// absent from the gazetteer — the GPS-unavailable path.
    pub fn district_distance(&self, district1: &str, district2: &str) -> f64 {
        let (Some(a), Some(b)) = (
            self.config.district_coordinates(district1),
            self.config.district_coordinates(district2),
        ) else {
            let unknown = if self.config.district_coordinates(district1).is_none() {
                district1
            } else {
                district2
            };

            #[cfg(feature = "tracing")]
            warn!(district = unknown, "unknown district, using default distance");

            self.event_listeners.emit(&GeoEvent::UnknownDistrict {
                district: unknown.to_string(),
                timestamp: Instant::now(),
            });

            return self.config.default_distance_km;
        };

        haversine_km(a, b)
    }

    /// Travel time in minutes between two districts, including a buffer for
    /// parking/walking (`5 + 2 * distance_km`).
    pub fn travel_time_minutes(
        &self,
        district1: &str,
        district2: &str,
        mode: TransportMode,
        hour_of_day: u32,
    ) -> u32 {
        let distance = self.district_distance(district1, district2);
        let band = traffic_band_for_hour(hour_of_day);
        let speed_kmh = self.config.speed_kmh(mode, band);

        let travel_minutes = (distance / speed_kmh) * 60.0;
        let buffer_minutes = 5.0 + distance * 2.0;

        (travel_minutes + buffer_minutes).round() as u32
    }

    /// Nearest-neighbor TSP approximation starting from `stops[0]`. For
    /// `stops.len() <= 1` the result is the identity with zero distance.
    pub fn optimize_route(&self, stops: &[RouteStop], mode: TransportMode, hour_of_day: u32) -> RouteResult {
        if stops.len() <= 1 {
            return RouteResult {
                ordered_stops: stops.to_vec(),
                total_distance_km: 0.0,
                total_travel_time_minutes: 0,
                improvement_percent: 0.0,
            };
        }

        let n = stops.len();
        let mut distance_matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    distance_matrix[i][j] = self.district_distance(&stops[i].district, &stops[j].district);
                }
            }
        }

        let mut unvisited: Vec<usize> = (1..n).collect();
        let mut route = vec![0usize];
        let mut current = 0usize;
        let mut total_distance = 0.0;

        while !unvisited.is_empty() {
            let (idx, &nearest) = unvisited
                .iter()
                .enumerate()
                .min_by(|(_, &a), (_, &b)| {
                    distance_matrix[current][a]
                        .partial_cmp(&distance_matrix[current][b])
                        .unwrap()
                })
                .unwrap();

            total_distance += distance_matrix[current][nearest];
            route.push(nearest);
            unvisited.remove(idx);
            current = nearest;
        }

        let total_travel_time_minutes: u32 = route
            .windows(2)
            .map(|pair| self.travel_time_minutes(&stops[pair[0]].district, &stops[pair[1]].district, mode, hour_of_day))
            .sum();

        // Compare against the unordered (input-order) schedule.
        let unordered_distance: f64 = (0..n - 1).map(|i| distance_matrix[i][i + 1]).sum();
        let improvement_percent = if unordered_distance > 0.0 {
            ((unordered_distance - total_distance) / unordered_distance * 100.0).max(0.0)
        } else {
            0.0
        };

        self.event_listeners.emit(&GeoEvent::RouteOptimized {
            stop_count: n,
            total_distance_km: total_distance,
            improvement_percent,
            timestamp: Instant::now(),
        });

        RouteResult {
            ordered_stops: route.into_iter().map(|i| stops[i].clone()).collect(),
            total_distance_km: (total_distance * 100.0).round() / 100.0,
            total_travel_time_minutes,
            improvement_percent: (improvement_percent * 10.0).round() / 10.0,
        }
    }

    /// Groups `(id, district)` pairs by district, largest cluster first.
    pub fn cluster_by_district(&self, items: &[(String, String)]) -> Vec<(String, Vec<String>)> {
        let mut clusters: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (id, district) in items {
            clusters.entry(district.clone()).or_default().push(id.clone());
        }

        let mut clusters: Vec<(String, Vec<String>)> = clusters.into_iter().collect();
        clusters.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        clusters
    }
}
