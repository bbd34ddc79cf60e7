use geo::{Centroid, GeodesicArea};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building domain values
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Unknown polygon type: {0}")]
    UnknownPolygonType(String),
}

/// OSM tag filter, kept ordered so generated queries are deterministic
pub type Tags = BTreeMap<String, String>;

/// Geographic bounding box in Overpass order (south, west, north, east)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self { lat_min, lon_min, lat_max, lon_max }
    }

    /// Box of roughly `radius_km` around a point
    pub fn around(lat: f64, lon: f64, radius_km: f64) -> Self {
        crate::core::distance::calculate_bounding_box(lat, lon, radius_km)
    }

    /// Format as an Overpass QL bbox: `(lat_min,lon_min,lat_max,lon_max)`
    pub fn to_overpass(&self) -> String {
        format!(
            "({},{},{},{})",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }

    /// Same as [`to_overpass`](Self::to_overpass) without the parentheses,
    /// as used by the `[bbox:...]` global setting
    pub fn to_overpass_setting(&self) -> String {
        format!(
            "{},{},{},{}",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }

    /// Check ordering and coordinate ranges. NaN is never valid.
    pub fn is_valid(&self) -> bool {
        if !(self.lat_min < self.lat_max) || !(self.lon_min < self.lon_max) {
            return false;
        }
        let lat_range = -90.0..=90.0;
        let lon_range = -180.0..=180.0;
        lat_range.contains(&self.lat_min)
            && lat_range.contains(&self.lat_max)
            && lon_range.contains(&self.lon_min)
            && lon_range.contains(&self.lon_max)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_overpass())
    }
}

/// OSM element kinds a polygon can come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonType {
    Way,
    Relation,
    Node,
}

impl PolygonType {
    pub const ALL: [PolygonType; 3] = [PolygonType::Way, PolygonType::Relation, PolygonType::Node];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolygonType::Way => "way",
            PolygonType::Relation => "relation",
            PolygonType::Node => "node",
        }
    }
}

impl fmt::Display for PolygonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolygonType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "way" => Ok(PolygonType::Way),
            "relation" => Ok(PolygonType::Relation),
            "node" => Ok(PolygonType::Node),
            other => Err(ModelError::UnknownPolygonType(other.to_string())),
        }
    }
}

/// A position, stored in GeoJSON order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// OpenStreetMap polygon built from an Overpass element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub osm_id: i64,
    pub polygon_type: PolygonType,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Polygon {
    pub fn new(osm_id: i64, polygon_type: PolygonType, coordinates: Vec<Coordinate>) -> Self {
        Self {
            osm_id,
            polygon_type,
            coordinates,
            tags: Tags::new(),
            properties: Map::new(),
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// At least three points and the ring ends where it starts
    pub fn is_closed(&self) -> bool {
        crate::core::geometry::ring_is_closed(&self.coordinates)
    }

    /// Append the first point if the ring is open
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Some(first) = self.coordinates.first().copied() {
            self.coordinates.push(first);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.coordinates.len() >= 3 && self.is_closed()
    }

    /// Planar shoelace area in square degrees, 0.0 for open rings
    pub fn area(&self) -> f64 {
        if !self.is_closed() {
            return 0.0;
        }
        crate::core::geometry::shoelace_area(&self.coordinates)
    }

    /// Geodesic area in square metres, 0.0 for open rings
    pub fn geodesic_area_m2(&self) -> f64 {
        if !self.is_closed() {
            return 0.0;
        }
        self.to_geo().geodesic_area_unsigned()
    }

    pub fn centroid(&self) -> Option<Coordinate> {
        if self.coordinates.is_empty() {
            return None;
        }
        self.to_geo()
            .centroid()
            .map(|point| Coordinate::new(point.x(), point.y()))
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<(f64, f64)> = self.coordinates.iter().map(|c| (c.lon, c.lat)).collect();
        geo::Polygon::new(geo::LineString::from(exterior), vec![])
    }

    /// Convert into a GeoJSON feature.
    ///
    /// Properties are `osm_id` and `type` followed by the OSM tags and the
    /// extra properties; later keys overwrite earlier ones.
    pub fn to_geojson_feature(&self) -> geojson::Feature {
        let ring: Vec<Vec<f64>> = self.coordinates.iter().map(Coordinate::to_position).collect();
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![ring]));

        let mut properties = Map::new();
        properties.insert("osm_id".to_string(), Value::from(self.osm_id));
        properties.insert("type".to_string(), Value::from(self.polygon_type.as_str()));
        for (key, value) in &self.tags {
            properties.insert(key.clone(), Value::String(value.clone()));
        }
        for (key, value) in &self.properties {
            properties.insert(key.clone(), value.clone());
        }

        geojson::Feature {
            bbox: None,
            geometry: Some(geometry),
            id: Some(geojson::feature::Id::Number(self.osm_id.into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Polygon(id={}, type={}, coords={}, tags={})",
            self.osm_id,
            self.polygon_type,
            self.coordinates.len(),
            self.tags.len()
        )
    }
}

/// Aggregate area figures over a set of polygons
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonStatistics {
    pub count: usize,
    pub avg_area: f64,
    pub min_area: f64,
    pub max_area: f64,
    pub total_area: f64,
}
