//! Distance, travel time, route optimization and clustering over districts
//! and coordinates.
//!
//! - [`coordinates`] — `Coordinates` and the Haversine distance formula.
//! - [`config`] — the district gazetteer and travel-speed table.
//! - [`optimizer`] — district distance/travel-time lookups, nearest-neighbor
//!   route optimization, and district clustering.

pub mod config;
pub mod coordinates;
pub mod events;
pub mod optimizer;

pub use config::{traffic_band_for_hour, GeoConfig, GeoConfigBuilder, TrafficBand, TransportMode};
pub use coordinates::{haversine_km, Coordinates};
pub use events::GeoEvent;
pub use optimizer::{GeoOptimizer, RouteResult, RouteStop};
