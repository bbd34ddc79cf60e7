use crate::models::BoundingBox;

/// Kilometres per degree of latitude
const KM_PER_DEGREE: f64 = 111.0;

/// Calculate a bounding box around a center point
///
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude).
/// The result is clamped to valid coordinate ranges so it can be sent to
/// Overpass as-is, even near the poles or the antimeridian.
/// Non-finite input yields a NaN box, which never passes `is_valid`.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    if !(lat.is_finite() && lon.is_finite() && radius_km.is_finite()) {
        return BoundingBox::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    }

    let lat_delta = radius_km / KM_PER_DEGREE;

    // cos(lat) goes to zero at the poles
    let cos_lat = lat.to_radians().cos().abs().max(1e-6);
    let lon_delta = radius_km / (KM_PER_DEGREE * cos_lat);

    BoundingBox {
        lat_min: (lat - lat_delta).max(-90.0),
        lon_min: (lon - lon_delta).max(-180.0),
        lat_max: (lat + lat_delta).min(90.0),
        lon_max: (lon + lon_delta).min(180.0),
    }
}
