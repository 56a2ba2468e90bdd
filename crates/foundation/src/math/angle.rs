use std::f64::consts::TAU;

/// Shift `angle_rad` by whole turns so it lies within half a turn of
/// `reference_rad`.
///
/// Easing from `reference_rad` toward the returned angle always takes the
/// short way round.
pub fn nearest_equivalent_angle(angle_rad: f64, reference_rad: f64) -> f64 {
    let turns = ((reference_rad - angle_rad) / TAU).round();
    angle_rad + turns * TAU
}
