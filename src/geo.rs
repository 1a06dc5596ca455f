//! Great-circle distance and bounding-box math for the nearby-place resolver
//!
//! The resolver prunes the venue cache with a rectangular bounding box, then
//! filters the candidates with the true haversine distance. The box always
//! over-approximates the radius disk, so pruning never drops a valid result.

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator)
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Great-circle distance between two points in meters (haversine formula)
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Latitude/longitude rectangle enclosing a radius around a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Build the box enclosing `radius_m` meters around (lat, lng)
    ///
    /// Latitude degrees are a fixed 111km; longitude degrees shrink with
    /// cos(latitude). Near the poles cos(lat) approaches zero, so the
    /// longitude delta is clamped to cover the full range instead of
    /// dividing by zero.
    pub fn around(lat: f64, lng: f64, radius_m: f64) -> Self {
        let lat_delta = radius_m / METERS_PER_DEGREE;

        let cos_lat = lat.to_radians().cos().abs();
        let lng_delta = if cos_lat > 1e-6 {
            radius_m / (METERS_PER_DEGREE * cos_lat)
        } else {
            180.0
        };

        Self {
            min_lat: lat - lat_delta,
            max_lat: lat + lat_delta,
            min_lng: lng - lng_delta,
            max_lng: lng + lng_delta,
        }
    }

    /// Whether a point falls inside the box (inclusive)
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine_distance(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Paris to London, roughly 344 km
        let d = haversine_distance(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d - 344_000.0).abs() < 5_000.0, "got {}", d);
    }

    #[test]
    fn test_haversine_symmetry() {
        let a = haversine_distance(35.0, 139.0, 37.0, 140.0);
        let b = haversine_distance(37.0, 140.0, 35.0, 139.0);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_bbox_contains_radius_disk() {
        // Every point within the radius must fall inside the bounding box,
        // sampled on a ring just inside the radius in all directions.
        let (lat, lng, radius) = (52.52, 13.405, 500.0);
        let bbox = BoundingBox::around(lat, lng, radius);

        for step in 0..36 {
            let bearing = (step as f64) * 10.0_f64.to_radians();
            // Offset ~499m along the bearing using the same flat-earth scale
            let d_lat = (499.0 * bearing.cos()) / 111_000.0;
            let d_lng = (499.0 * bearing.sin()) / (111_000.0 * lat.to_radians().cos());
            let (p_lat, p_lng) = (lat + d_lat, lng + d_lng);

            assert!(
                haversine_distance(lat, lng, p_lat, p_lng) <= radius,
                "sample point left the disk at bearing step {}",
                step
            );
            assert!(bbox.contains(p_lat, p_lng), "bbox missed bearing step {}", step);
        }
    }

    #[test]
    fn test_bbox_excludes_far_points() {
        let bbox = BoundingBox::around(52.52, 13.405, 500.0);
        // ~1.1km north is outside a 500m box
        assert!(!bbox.contains(52.53, 13.405));
    }

    #[test]
    fn test_bbox_near_pole_does_not_blow_up() {
        // cos(lat) ~ 0 near the pole; the longitude delta clamps to the full range
        let bbox = BoundingBox::around(90.0, 0.0, 500.0);
        assert!(bbox.max_lng - bbox.min_lng >= 360.0);
        assert!(bbox.max_lng.is_finite() && bbox.min_lng.is_finite());
    }
}
