use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of an Overpass `[out:json]` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub version: Option<f64>,
    #[serde(default)]
    pub generator: Option<String>,
    /// Set by the server when the query failed at runtime (timeouts, memory)
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

impl OverpassResponse {
    pub fn runtime_error(&self) -> Option<&str> {
        self.remark
            .as_deref()
            .filter(|remark| remark.contains("runtime error"))
    }
}

/// A node, way, relation or `out count` element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Present with `out geom`; entries are null for points clipped away
    #[serde(default)]
    pub geometry: Vec<Option<GeometryPoint>>,
    #[serde(default)]
    pub members: Vec<RelationMember>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMember {
    #[serde(rename = "type")]
    pub member_type: String,
    #[serde(rename = "ref", default)]
    pub reference: i64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub geometry: Vec<Option<GeometryPoint>>,
}
