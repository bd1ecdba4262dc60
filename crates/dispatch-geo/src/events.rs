//! Events emitted by the geo optimizer.

use dispatch_core::ResilienceEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum GeoEvent {
    /// A district name was not present in the configured gazetteer; the
    /// default fallback distance was used instead.
    UnknownDistrict {
        district: String,
        timestamp: Instant,
    },
    /// A route was computed for an executor's stop list.
    RouteOptimized {
        stop_count: usize,
        total_distance_km: f64,
        improvement_percent: f64,
        timestamp: Instant,
    },
}

impl ResilienceEvent for GeoEvent {
    fn event_type(&self) -> &'static str {
        match self {
            GeoEvent::UnknownDistrict { .. } => "unknown_district",
            GeoEvent::RouteOptimized { .. } => "route_optimized",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            GeoEvent::UnknownDistrict { timestamp, .. } => *timestamp,
            GeoEvent::RouteOptimized { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        "geo_optimizer"
    }
}
