use crate::models::domain::{BoundingBox, PolygonType, Tags};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Bounding box query string shared by the category endpoints
///
/// `GET /api/v1/polygons/buildings?south=..&west=..&north=..&east=..`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_area_query"))]
pub struct AreaQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub south: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub west: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub north: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub east: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_area", rename = "minArea", default)]
    pub min_area: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_area", rename = "maxArea", default)]
    pub max_area: Option<f64>,
}

/// Range checks let NaN through, so every float is checked here as well
fn require_finite(fields: &[(&str, Option<f64>)]) -> Result<(), ValidationError> {
    for (name, value) in fields {
        if let Some(value) = value {
            if !value.is_finite() {
                let mut error = ValidationError::new("not_finite");
                error.message = Some(format!("{} must be a finite number", name).into());
                return Err(error);
            }
        }
    }
    Ok(())
}

fn validate_area_query(query: &AreaQuery) -> Result<(), ValidationError> {
    require_finite(&[
        ("south", Some(query.south)),
        ("west", Some(query.west)),
        ("north", Some(query.north)),
        ("east", Some(query.east)),
        ("minArea", query.min_area),
        ("maxArea", query.max_area),
    ])
}

fn validate_around_query(query: &AroundQuery) -> Result<(), ValidationError> {
    require_finite(&[
        ("lat", Some(query.lat)),
        ("lon", Some(query.lon)),
        ("radiusKm", Some(query.radius_km)),
    ])
}

fn validate_tag_search(request: &TagSearchRequest) -> Result<(), ValidationError> {
    require_finite(&[
        ("south", Some(request.south)),
        ("west", Some(request.west)),
        ("north", Some(request.north)),
        ("east", Some(request.east)),
        ("minArea", request.min_area),
        ("maxArea", request.max_area),
    ])?;

    // The tag filter needs both halves
    if request.tag_key.is_some() != request.tag_value.is_some() {
        let mut error = ValidationError::new("incomplete_tag_filter");
        error.message = Some("tagKey and tagValue must be given together".into());
        return Err(error);
    }
    Ok(())
}

impl AreaQuery {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.south, self.west, self.north, self.east)
    }
}

/// Buildings around a point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_around_query"))]
pub struct AroundQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    #[validate(range(min = 0.01, max = 50.0))]
    #[serde(alias = "radius_km", rename = "radiusKm", default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    1.0
}

/// Free-form tag search
///
/// POST /api/v1/polygons/search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_tag_search"))]
pub struct TagSearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub south: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub west: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub north: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub east: f64,
    pub tags: Tags,
    #[serde(alias = "element_type", rename = "elementType", default = "default_element_type")]
    pub element_type: PolygonType,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_area", rename = "minArea", default)]
    pub min_area: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_area", rename = "maxArea", default)]
    pub max_area: Option<f64>,
    #[serde(alias = "tag_key", rename = "tagKey", default)]
    pub tag_key: Option<String>,
    #[serde(alias = "tag_value", rename = "tagValue", default)]
    pub tag_value: Option<String>,
}

fn default_element_type() -> PolygonType {
    PolygonType::Way
}

impl TagSearchRequest {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.south, self.west, self.north, self.east)
    }
}
