// Service exports
pub mod cache;
pub mod overpass;
pub mod polygons;
pub mod repository;

pub use cache::{CacheKey, CacheStats, QueryCache};
pub use overpass::{OverpassClient, OverpassError};
pub use polygons::{PolygonCategory, PolygonService};
pub use repository::{PolygonRepository, Repository, RepositoryError};
