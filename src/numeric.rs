/*

    Declare numeric types used throughout this repo.

    All derivations run in f64 so that values written
    into the text and markup outputs do not pick up
    single precision noise.

    @date: Oct, 2026
*/

use bevy_math::{DQuat, DVec3};
pub type Float = f64;
pub type Vector3 = DVec3;
pub type Quaternion = DQuat;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-8
}

/// Componentwise minimum and maximum of two corners.
pub fn min_max(a: &Vector3, b: &Vector3) -> (Vector3, Vector3) {
    (a.min(*b), a.max(*b))
}

/// Point halfway from `a` to `b`, computed as `a + (b - a) / 2`
/// so it matches placements generated by earlier tooling bit for bit.
pub fn midpoint(a: &Vector3, b: &Vector3) -> Vector3 {
    *a + (*b - *a) / 2.0
}
