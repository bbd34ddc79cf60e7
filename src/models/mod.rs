// Model exports
pub mod domain;
pub mod overpass;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Coordinate, ModelError, Polygon, PolygonStatistics, PolygonType, Tags};
pub use overpass::{GeometryPoint, OverpassElement, OverpassResponse, RelationMember};
pub use requests::{AreaQuery, AroundQuery, TagSearchRequest};
pub use responses::{CacheStatsResponse, ErrorResponse, HealthResponse, PolygonsResponse};
