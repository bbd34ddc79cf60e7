// Unit tests for Overpass Polygons

use overpass_polygons::core::{
    distance::calculate_bounding_box,
    filters::{filter_by_area, filter_by_tag_value},
    parser::parse_response,
    query::{relations_query, ways_query},
    statistics::calculate_statistics,
};
use overpass_polygons::models::{
    BoundingBox, Coordinate, OverpassResponse, Polygon, PolygonType, Tags,
};

fn square(osm_id: i64, side: f64) -> Polygon {
    let coords = vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side), (0.0, 0.0)];
    Polygon::new(osm_id, PolygonType::Way, coords.into_iter().map(Coordinate::from).collect())
}

fn tagged(mut polygon: Polygon, key: &str, value: &str) -> Polygon {
    polygon.tags.insert(key.to_string(), value.to_string());
    polygon
}

#[test]
fn test_bounding_box_around_point() {
    let bbox = calculate_bounding_box(48.8566, 2.3522, 10.0);

    assert!(bbox.lat_min < 48.8566 && bbox.lat_max > 48.8566);
    assert!(bbox.lon_min < 2.3522 && bbox.lon_max > 2.3522);
    assert!(bbox.is_valid());

    let lat_span = bbox.lat_max - bbox.lat_min;
    assert!((lat_span - 0.18).abs() < 0.02);
}

#[test]
fn test_bounding_box_rejects_nan_radius() {
    let bbox = calculate_bounding_box(48.8566, 2.3522, f64::NAN);
    assert!(!bbox.is_valid());
}

#[test]
fn test_way_query_shape() {
    let bbox = BoundingBox::new(48.8155, 2.2242, 48.9021, 2.4699);
    let mut tags = Tags::new();
    tags.insert("building".to_string(), "yes".to_string());

    let query = ways_query(&bbox, &tags);

    assert!(query.starts_with("[out:json][timeout:25][bbox:48.8155,2.2242,48.9021,2.4699];"));
    assert!(query.contains(r#"way["building"="yes"];"#));
    assert!(query.trim_end().ends_with("out geom;"));
}

#[test]
fn test_relation_query_uses_relation_statement() {
    let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let mut tags = Tags::new();
    tags.insert("boundary".to_string(), "administrative".to_string());
    tags.insert("admin_level".to_string(), "8".to_string());

    let query = relations_query(&bbox, &tags);

    // Conditions follow key order
    assert!(query.contains(r#"relation["admin_level"="8"]["boundary"="administrative"];"#));
}

#[test]
fn test_parse_mixed_response() {
    let response: OverpassResponse = serde_json::from_str(
        r#"{
            "elements": [
                {"type": "way", "id": 1, "tags": {"landuse": "industrial"},
                 "geometry": [{"lat": 0, "lon": 0}, {"lat": 0, "lon": 1}, {"lat": 1, "lon": 1}]},
                {"type": "way", "id": 2, "geometry": []},
                {"type": "relation", "id": 3, "members": []},
                {"type": "node", "id": 4, "lat": 0.5, "lon": 0.5}
            ]
        }"#,
    )
    .unwrap();

    let ways = parse_response(&response, PolygonType::Way);
    assert_eq!(ways.len(), 1);
    assert_eq!(ways[0].osm_id, 1);
    assert!(ways[0].is_closed());
    assert!((ways[0].area() - 0.5).abs() < 1e-12);

    // Relation without outer members has nothing to show
    assert!(parse_response(&response, PolygonType::Relation).is_empty());
}

#[test]
fn test_parse_relation_stitches_outer_ways() {
    let response: OverpassResponse = serde_json::from_str(
        r#"{
            "elements": [
                {"type": "relation", "id": 9, "tags": {"type": "multipolygon", "natural": "water"},
                 "members": [
                    {"type": "way", "ref": 10, "role": "outer",
                     "geometry": [{"lat": 0, "lon": 0}, {"lat": 0, "lon": 2}]},
                    {"type": "way", "ref": 11, "role": "outer",
                     "geometry": [{"lat": 2, "lon": 0}, {"lat": 2, "lon": 2}]},
                    {"type": "way", "ref": 12, "role": "outer",
                     "geometry": [{"lat": 0, "lon": 2}, {"lat": 2, "lon": 2}]},
                    {"type": "way", "ref": 13, "role": "outer",
                     "geometry": [{"lat": 2, "lon": 0}, {"lat": 0, "lon": 0}]},
                    {"type": "way", "ref": 14, "role": "inner",
                     "geometry": [{"lat": 0.5, "lon": 0.5}, {"lat": 0.5, "lon": 1}, {"lat": 1, "lon": 1}, {"lat": 0.5, "lon": 0.5}]}
                 ]}
            ]
        }"#,
    )
    .unwrap();

    let relations = parse_response(&response, PolygonType::Relation);
    assert_eq!(relations.len(), 1);

    let lake = &relations[0];
    assert_eq!(lake.polygon_type, PolygonType::Relation);
    assert!(lake.is_closed());
    assert_eq!(lake.coordinates.len(), 5);
    assert!((lake.area() - 4.0).abs() < 1e-12);
    assert_eq!(lake.tags.get("natural").map(String::as_str), Some("water"));
}

#[test]
fn test_area_filter_window() {
    let polygons = vec![square(1, 1.0), square(2, 2.0), square(3, 3.0)];

    let filtered = filter_by_area(polygons.clone(), 2.0, Some(5.0));
    let ids: Vec<i64> = filtered.iter().map(|p| p.osm_id).collect();
    assert_eq!(ids, vec![2]);

    // Bounds are inclusive
    let filtered = filter_by_area(polygons, 1.0, Some(4.0));
    assert_eq!(filtered.len(), 2);
}

#[test]
fn test_tag_value_filter() {
    let polygons = vec![
        tagged(square(1, 1.0), "name", "Parc Monceau"),
        tagged(square(2, 1.0), "name", "Jardin du Luxembourg"),
        square(3, 1.0),
    ];

    let filtered = filter_by_tag_value(polygons, "name", "Parc Monceau");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].osm_id, 1);
}

#[test]
fn test_statistics_summary() {
    let stats = calculate_statistics(&[square(1, 1.0), square(2, 2.0), square(3, 3.0)]);

    assert_eq!(stats.count, 3);
    assert!((stats.total_area - 14.0).abs() < 1e-12);
    assert!((stats.avg_area - 14.0 / 3.0).abs() < 1e-12);
    assert!((stats.min_area - 1.0).abs() < 1e-12);
    assert!((stats.max_area - 9.0).abs() < 1e-12);
}

#[test]
fn test_statistics_empty() {
    let stats = calculate_statistics(&[]);
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_area, 0.0);
    assert_eq!(stats.avg_area, 0.0);
}

#[test]
fn test_geojson_feature_properties() {
    let polygon = tagged(square(42, 1.0), "leisure", "park");
    let feature = serde_json::to_value(polygon.to_geojson_feature()).unwrap();

    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["geometry"]["type"], "Polygon");
    assert_eq!(feature["geometry"]["coordinates"][0][1], serde_json::json!([1.0, 0.0]));
    assert_eq!(feature["properties"]["osm_id"], 42);
    assert_eq!(feature["properties"]["type"], "way");
    assert_eq!(feature["properties"]["leisure"], "park");
}
