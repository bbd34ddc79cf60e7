use crate::models::Coordinate;

/// A ring is closed when it has at least three points and ends where it starts
#[inline]
pub fn ring_is_closed(ring: &[Coordinate]) -> bool {
    ring.len() >= 3 && ring.first() == ring.last()
}

/// Planar area of a closed ring using the shoelace formula
///
/// Coordinates are treated as plain (lon, lat) numbers, so the result is in
/// square degrees. Winding order does not matter.
pub fn shoelace_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let twice_area: f64 = ring
        .windows(2)
        .map(|pair| pair[0].lon * pair[1].lat - pair[1].lon * pair[0].lat)
        .sum();

    twice_area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn test_triangle_area() {
        let triangle = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
        assert!((shoelace_area(&triangle) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rectangle_area_clockwise() {
        let rectangle = ring(&[(0.0, 0.0), (0.0, 2.0), (3.0, 2.0), (3.0, 0.0), (0.0, 0.0)]);
        assert!((shoelace_area(&rectangle) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_ring_closure() {
        assert!(ring_is_closed(&ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)])));
        assert!(!ring_is_closed(&ring(&[(0.0, 0.0), (0.0, 0.0)])));
        assert!(!ring_is_closed(&ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])));
        assert!(!ring_is_closed(&[]));
    }
}
