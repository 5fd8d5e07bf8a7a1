//! Proximity ordering for school listings.
//!
//! Distance is planar: coordinates are treated as points on a flat grid of
//! degrees. This is only meaningful over small regions and ignores both
//! meridian convergence and antimeridian wraparound. Listing order is
//! defined in these terms, not by great-circle distance.

use crate::models::{ReferencePoint, School};

/// Flat-plane distance in degrees between a school and the reference point.
pub fn planar_distance(school: &School, reference: ReferencePoint) -> f64 {
    (school.latitude - reference.latitude).hypot(school.longitude - reference.longitude)
}

/// Order schools nearest first.
///
/// Equal distances keep their input order.
pub fn sort_by_distance(schools: Vec<School>, reference: ReferencePoint) -> Vec<School> {
    let mut keyed: Vec<(f64, School)> = schools
        .into_iter()
        .map(|s| (planar_distance(&s, reference), s))
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, s)| s).collect()
}
