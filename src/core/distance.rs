use crate::models::{Coordinates, Profile, User};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points given as `geo` points (x = lon, y = lat)
#[inline]
pub fn point_distance_km(from: geo::Point<f64>, to: geo::Point<f64>) -> f64 {
    haversine_distance(from.y(), from.x(), to.y(), to.x())
}

/// Pick the coordinates a user contributes to scoring
///
/// A visible profile location wins over the user's own; a hidden location is
/// never used even when present.
pub fn resolve_coordinates(user: &User, profile: Option<&Profile>) -> Option<Coordinates> {
    profile
        .and_then(Profile::visible_coordinates)
        .or_else(|| user.visible_coordinates())
}

/// Distance between seeker and candidate, `None` when either side has no usable location
pub fn resolve_distance(
    seeker: &User,
    seeker_profile: Option<&Profile>,
    candidate: &User,
    candidate_profile: Option<&Profile>,
) -> Option<f64> {
    let from = resolve_coordinates(seeker, seeker_profile)?;
    let to = resolve_coordinates(candidate, candidate_profile)?;

    Some(point_distance_km(from.into(), to.into()))
}
