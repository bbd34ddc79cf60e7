use crate::models::{BoundingBox, PolygonType, Tags};

/// Server-side time limit written into every generated query
pub const QUERY_TIMEOUT_SECS: u64 = 25;

/// Cheap query used to probe whether an endpoint is up
pub const AVAILABILITY_QUERY: &str = "[bbox:0,0,0.1,0.1];node;out count;";

/// Escape a value for use inside a double-quoted Overpass QL string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Build the tag filter part of a query: `["key"="value"]...`
///
/// Keys are emitted in sorted order. An empty map yields an empty string,
/// which matches every element of the requested type.
pub fn build_tag_conditions(tags: &Tags) -> String {
    tags.iter()
        .map(|(key, value)| format!(r#"["{}"="{}"]"#, escape(key), escape(value)))
        .collect()
}

/// Query for all elements of one type matching `tags` inside `bbox`,
/// returned with inline geometry
pub fn element_query(element: PolygonType, bbox: &BoundingBox, tags: &Tags) -> String {
    format!(
        "[out:json][timeout:{}][bbox:{}];\n(\n  {}{};\n);\nout geom;\n",
        QUERY_TIMEOUT_SECS,
        bbox.to_overpass_setting(),
        element.as_str(),
        build_tag_conditions(tags),
    )
}

pub fn ways_query(bbox: &BoundingBox, tags: &Tags) -> String {
    element_query(PolygonType::Way, bbox, tags)
}

pub fn relations_query(bbox: &BoundingBox, tags: &Tags) -> String {
    element_query(PolygonType::Relation, bbox, tags)
}
