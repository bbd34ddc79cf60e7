//! Overpass Polygons - query OpenStreetMap polygons through the Overpass API
//!
//! This library builds Overpass QL queries for ways and relations inside a
//! bounding box, fetches them with retries, turns the results into polygons
//! and offers filtering, statistics and GeoJSON export on top.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use config::{OverpassSettings, Settings};
pub use models::{BoundingBox, Coordinate, Polygon, PolygonStatistics, PolygonType, Tags};
pub use services::{OverpassClient, OverpassError, PolygonCategory, PolygonRepository, PolygonService, Repository};
