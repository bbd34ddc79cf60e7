use crate::models::{Polygon, PolygonStatistics};

/// Area statistics in square degrees; all zero for an empty slice
pub fn calculate_statistics(polygons: &[Polygon]) -> PolygonStatistics {
    if polygons.is_empty() {
        return PolygonStatistics::default();
    }

    let areas: Vec<f64> = polygons.iter().map(Polygon::area).collect();
    let total_area: f64 = areas.iter().sum();
    let min_area = areas.iter().copied().fold(f64::INFINITY, f64::min);
    let max_area = areas.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    PolygonStatistics {
        count: polygons.len(),
        avg_area: total_area / polygons.len() as f64,
        min_area,
        max_area,
        total_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, PolygonType};

    fn square(id: i64, side: f64) -> Polygon {
        let coords = vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side), (0.0, 0.0)];
        Polygon::new(id, PolygonType::Way, coords.into_iter().map(Coordinate::from).collect())
    }

    #[test]
    fn test_empty_statistics() {
        let stats = calculate_statistics(&[]);
        assert_eq!(stats, PolygonStatistics::default());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.avg_area, 0.0);
    }

    #[test]
    fn test_statistics() {
        let stats = calculate_statistics(&[square(1, 1.0), square(2, 2.0), square(3, 3.0)]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_area, 14.0);
        assert_eq!(stats.min_area, 1.0);
        assert_eq!(stats.max_area, 9.0);
        assert!((stats.avg_area - 14.0 / 3.0).abs() < 1e-12);
    }
}
