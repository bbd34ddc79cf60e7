use crate::core::geometry::{ring_is_closed, shoelace_area};
use crate::models::{Coordinate, GeometryPoint, OverpassElement, OverpassResponse, Polygon, PolygonType};
use serde_json::Value;

fn to_coordinates(geometry: &[Option<GeometryPoint>]) -> Vec<Coordinate> {
    geometry
        .iter()
        .flatten()
        .map(|point| Coordinate::new(point.lon, point.lat))
        .collect()
}

/// Join way segments that share end points into rings.
///
/// Segments are consumed greedily: a ring grows from its tail with any
/// remaining segment starting or ending at that point (reversed if needed)
/// until it closes or nothing connects.
pub fn stitch_rings(mut segments: Vec<Vec<Coordinate>>) -> Vec<Vec<Coordinate>> {
    let mut rings = Vec::new();

    while !segments.is_empty() {
        let mut ring = segments.remove(0);

        while !ring_is_closed(&ring) {
            let Some(tail) = ring.last().copied() else { break };
            let next = segments
                .iter()
                .position(|s| s.first() == Some(&tail) || s.last() == Some(&tail));

            match next {
                Some(index) => {
                    let mut segment = segments.swap_remove(index);
                    if segment.first() != Some(&tail) {
                        segment.reverse();
                    }
                    ring.extend(segment.into_iter().skip(1));
                }
                None => break,
            }
        }

        rings.push(ring);
    }

    rings
}

/// Outer ring of a multipolygon-style relation, taken from its way members
fn relation_outer_ring(element: &OverpassElement) -> (Vec<Coordinate>, usize) {
    let segments: Vec<Vec<Coordinate>> = element
        .members
        .iter()
        .filter(|m| m.member_type == "way" && (m.role == "outer" || m.role.is_empty()))
        .map(|m| to_coordinates(&m.geometry))
        .filter(|coords| coords.len() >= 2)
        .collect();

    let rings = stitch_rings(segments);
    let ring_count = rings.len();

    let largest = rings
        .into_iter()
        .map(|mut ring| {
            if !ring_is_closed(&ring) {
                if let Some(first) = ring.first().copied() {
                    ring.push(first);
                }
            }
            ring
        })
        .max_by(|a, b| shoelace_area(a).total_cmp(&shoelace_area(b)))
        .unwrap_or_default();

    (largest, ring_count)
}

/// Convert one Overpass element into a polygon.
///
/// Returns `None` when the element carries no usable geometry. Ways and
/// relations are closed before being returned.
pub fn parse_element(element: &OverpassElement, polygon_type: PolygonType) -> Option<Polygon> {
    let mut polygon = match polygon_type {
        PolygonType::Relation => {
            let (ring, ring_count) = relation_outer_ring(element);
            if ring.is_empty() {
                return None;
            }
            let mut polygon = Polygon::new(element.id, polygon_type, ring);
            if ring_count > 1 {
                polygon
                    .properties
                    .insert("outer_rings".to_string(), Value::from(ring_count));
            }
            polygon
        }
        PolygonType::Way | PolygonType::Node => {
            let coordinates = to_coordinates(&element.geometry);
            if coordinates.is_empty() {
                return None;
            }
            Polygon::new(element.id, polygon_type, coordinates)
        }
    };

    polygon.tags = element.tags.clone();

    if matches!(polygon_type, PolygonType::Way | PolygonType::Relation) {
        polygon.close();
    }

    Some(polygon)
}

/// Extract every polygon of the requested type from a response
pub fn parse_response(response: &OverpassResponse, polygon_type: PolygonType) -> Vec<Polygon> {
    response
        .elements
        .iter()
        .filter(|element| element.element_type == polygon_type.as_str())
        .filter_map(|element| {
            let parsed = parse_element(element, polygon_type);
            if parsed.is_none() {
                tracing::debug!("Skipping {} {} without geometry", element.element_type, element.id);
            }
            parsed
        })
        .collect()
}
