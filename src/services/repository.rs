use crate::core::parser::parse_response;
use crate::core::query::{relations_query, ways_query};
use crate::models::{BoundingBox, OverpassResponse, Polygon, PolygonType, Tags};
use crate::services::cache::{CacheStats, QueryCache};
use crate::services::overpass::{OverpassClient, OverpassError};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by repositories
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(BoundingBox),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Overpass(#[from] OverpassError),
}

/// Common data access interface
#[allow(async_fn_in_trait)]
pub trait Repository<T> {
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Option<T>;

    /// Store an item and hand it back
    async fn save(&self, item: T) -> T;

    /// Returns true when an item was removed
    async fn delete(&self, id: i64) -> bool;
}

fn single_tag(key: &str, value: &str) -> Tags {
    let mut tags = Tags::new();
    tags.insert(key.to_string(), value.to_string());
    tags
}

/// Polygons fetched from Overpass, cached by OSM id
pub struct PolygonRepository {
    client: Arc<OverpassClient>,
    polygons: moka::future::Cache<i64, Polygon>,
    responses: Option<QueryCache>,
}

impl PolygonRepository {
    pub fn new(client: Arc<OverpassClient>, max_polygons: u64) -> Self {
        Self {
            client,
            polygons: moka::future::Cache::new(max_polygons),
            responses: None,
        }
    }

    /// Answer repeated identical queries from `cache`
    pub fn with_response_cache(mut self, cache: QueryCache) -> Self {
        self.responses = Some(cache);
        self
    }

    pub fn client(&self) -> &Arc<OverpassClient> {
        &self.client
    }

    /// Ways inside `bbox` matching `tags` (default `building=yes`)
    pub async fn find_ways(
        &self,
        bbox: &BoundingBox,
        tags: Option<Tags>,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        if !bbox.is_valid() {
            return Err(RepositoryError::InvalidBoundingBox(*bbox));
        }

        let tags = tags.unwrap_or_else(|| single_tag("building", "yes"));
        let query = ways_query(bbox, &tags);
        self.query_and_parse(&query, PolygonType::Way).await
    }

    /// Relations inside `bbox` matching `tags` (default `boundary=administrative`)
    pub async fn find_relations(
        &self,
        bbox: &BoundingBox,
        tags: Option<Tags>,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        if !bbox.is_valid() {
            return Err(RepositoryError::InvalidBoundingBox(*bbox));
        }

        let tags = tags.unwrap_or_else(|| single_tag("boundary", "administrative"));
        let query = relations_query(bbox, &tags);
        self.query_and_parse(&query, PolygonType::Relation).await
    }

    pub async fn find_by_tags(
        &self,
        bbox: &BoundingBox,
        tags: Tags,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.find_ways(bbox, Some(tags)).await
    }

    async fn fetch(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        if let Some(cache) = &self.responses {
            if let Some(response) = cache.get(query).await {
                return Ok(response);
            }
        }

        let response = self.client.query(query).await?;

        if let Some(cache) = &self.responses {
            cache.insert(query, response.clone()).await;
        }

        Ok(response)
    }

    async fn query_and_parse(
        &self,
        query: &str,
        polygon_type: PolygonType,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        let response = self.fetch(query).await?;
        let polygons = parse_response(&response, polygon_type);

        for polygon in &polygons {
            self.polygons.insert(polygon.osm_id, polygon.clone()).await;
        }

        tracing::info!(
            "Parsed {} {} polygons from {} elements",
            polygons.len(),
            polygon_type,
            response.elements.len()
        );

        Ok(polygons)
    }

    /// Drop cached polygons and cached responses
    pub fn clear_cache(&self) {
        self.polygons.invalidate_all();
        if let Some(cache) = &self.responses {
            cache.invalidate_all();
        }
        tracing::debug!("Polygon cache cleared");
    }

    /// Number of cached polygons
    pub async fn cache_size(&self) -> u64 {
        self.polygons.run_pending_tasks().await;
        self.polygons.entry_count()
    }

    pub async fn response_cache_stats(&self) -> Option<CacheStats> {
        match &self.responses {
            Some(cache) => Some(cache.stats().await),
            None => None,
        }
    }
}

impl Repository<Polygon> for PolygonRepository {
    /// Overpass has no "everything" query; use the bbox methods instead
    async fn find_all(&self) -> Result<Vec<Polygon>, RepositoryError> {
        Err(RepositoryError::Unsupported(
            "use find_ways or find_relations with a bounding box",
        ))
    }

    async fn find_by_id(&self, id: i64) -> Option<Polygon> {
        self.polygons.get(&id).await
    }

    async fn save(&self, item: Polygon) -> Polygon {
        self.polygons.insert(item.osm_id, item.clone()).await;
        item
    }

    async fn delete(&self, id: i64) -> bool {
        self.polygons.remove(&id).await.is_some()
    }
}
