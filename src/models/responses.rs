use crate::models::domain::PolygonStatistics;
use serde::{Deserialize, Serialize};

/// Polygons returned by the query endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonsResponse {
    pub count: usize,
    pub statistics: PolygonStatistics,
    pub features: geojson::FeatureCollection,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub overpass_available: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Cache occupancy and hit rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub polygons: u64,
    pub responses: u64,
    pub response_hits: u64,
    pub response_misses: u64,
    pub response_hit_rate: f64,
}
