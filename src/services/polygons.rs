use crate::core::{calculate_statistics, filter_by_area, filter_by_tag_value};
use crate::models::{BoundingBox, Polygon, PolygonStatistics, Tags};
use crate::services::repository::{PolygonRepository, RepositoryError};

/// Named OSM feature classes with their tag filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonCategory {
    Buildings,
    IndustrialZones,
    WaterAreas,
    Parks,
}

impl PolygonCategory {
    pub fn tag(&self) -> (&'static str, &'static str) {
        match self {
            PolygonCategory::Buildings => ("building", "yes"),
            PolygonCategory::IndustrialZones => ("landuse", "industrial"),
            PolygonCategory::WaterAreas => ("natural", "water"),
            PolygonCategory::Parks => ("leisure", "park"),
        }
    }

    pub fn tags(&self) -> Tags {
        let (key, value) = self.tag();
        let mut tags = Tags::new();
        tags.insert(key.to_string(), value.to_string());
        tags
    }

    /// Resolve the path segment used by the HTTP API
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "buildings" => Some(PolygonCategory::Buildings),
            "industrial" => Some(PolygonCategory::IndustrialZones),
            "water" => Some(PolygonCategory::WaterAreas),
            "parks" => Some(PolygonCategory::Parks),
            _ => None,
        }
    }
}

/// Business operations on polygons
pub struct PolygonService {
    repository: PolygonRepository,
}

impl PolygonService {
    pub fn new(repository: PolygonRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &PolygonRepository {
        &self.repository
    }

    pub async fn get_category(
        &self,
        category: PolygonCategory,
        bbox: &BoundingBox,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_ways(bbox, Some(category.tags())).await
    }

    pub async fn get_buildings(&self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.get_category(PolygonCategory::Buildings, bbox).await
    }

    pub async fn get_industrial_zones(&self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.get_category(PolygonCategory::IndustrialZones, bbox).await
    }

    pub async fn get_water_areas(&self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.get_category(PolygonCategory::WaterAreas, bbox).await
    }

    pub async fn get_parks(&self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.get_category(PolygonCategory::Parks, bbox).await
    }

    pub async fn get_polygons_by_tags(
        &self,
        bbox: &BoundingBox,
        tags: Tags,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_by_tags(bbox, tags).await
    }

    pub async fn get_relations_by_tags(
        &self,
        bbox: &BoundingBox,
        tags: Tags,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_relations(bbox, Some(tags)).await
    }

    pub fn filter_by_area(&self, polygons: Vec<Polygon>, min_area: f64, max_area: Option<f64>) -> Vec<Polygon> {
        filter_by_area(polygons, min_area, max_area)
    }

    pub fn filter_by_tag_value(&self, polygons: Vec<Polygon>, key: &str, value: &str) -> Vec<Polygon> {
        filter_by_tag_value(polygons, key, value)
    }

    pub fn convert_to_geojson(&self, polygons: &[Polygon]) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: polygons.iter().map(Polygon::to_geojson_feature).collect(),
            foreign_members: None,
        }
    }

    pub fn get_statistics(&self, polygons: &[Polygon]) -> PolygonStatistics {
        calculate_statistics(polygons)
    }
}
