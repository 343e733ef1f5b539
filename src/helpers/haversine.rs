const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_coordinates_are_zero_apart() {
        assert_eq!(haversine_distance(28.6139, 77.2090, 28.6139, 77.2090), 0.0);
        assert_eq!(haversine_distance(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn matches_known_city_distances() {
        let paris_london = haversine_distance(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((paris_london - 343.556).abs() < 0.5);

        let delhi_mumbai = haversine_distance(28.6139, 77.2090, 19.0760, 72.8777);
        assert!((delhi_mumbai - 1148.095).abs() < 0.5);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_distance(40.7128, -74.0060, 34.0522, -118.2437);
        let ba = haversine_distance(34.0522, -118.2437, 40.7128, -74.0060);
        assert!((ab - ba).abs() < 1e-9);
    }
}
