use crate::models::Polygon;

/// Keep polygons whose area lies in `[min_area, max_area]`
///
/// Areas are in square degrees. Without `max_area` only the lower bound applies.
pub fn filter_by_area(polygons: Vec<Polygon>, min_area: f64, max_area: Option<f64>) -> Vec<Polygon> {
    polygons
        .into_iter()
        .filter(|polygon| {
            let area = polygon.area();
            area >= min_area && max_area.map_or(true, |max| area <= max)
        })
        .collect()
}

/// Keep polygons tagged exactly `key=value`
pub fn filter_by_tag_value(polygons: Vec<Polygon>, key: &str, value: &str) -> Vec<Polygon> {
    polygons
        .into_iter()
        .filter(|polygon| polygon.tags.get(key).map(String::as_str) == Some(value))
        .collect()
}
