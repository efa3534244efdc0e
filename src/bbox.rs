/*

    Bounding volumes shared by the generated artifacts.

    - RenderBounds: local box + radius baked into the
      render object and the archetype.
    - Extents: world space entity and streaming extents
      written into the placement document.

    Both the render object and the archetype take their
    box from the same RenderBounds value so the two
    files cannot drift apart.

    @date: Oct, 2026
*/


use crate::prelude::*;
use crate::errors::{BillboardError, Result};
use crate::interval::{Interval};

// Scale factors of the render object box relative to the plane.
// The box is deliberately lopsided, LOD billboards are drawn
// with their pivot off centre.
pub const AABB_MIN_SCALE: Float = 0.6;
pub const AABB_MAX_SCALE: Float = 1.6;
pub const AABB_DEPTH_SCALE: Float = 1.1;
pub const RADIUS_SCALE: Float = 1.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderBounds {
    pub min: Vector3,
    pub max: Vector3,
    pub radius: Float,
}

impl RenderBounds {
    /// Box for a plane of `width` x `height` that is `depth` thick.
    pub fn from_plane(width: Float, height: Float, depth: Float) -> Self {
        Self {
            min: Vector3::new(
                -width * AABB_MIN_SCALE,
                -depth * AABB_DEPTH_SCALE,
                -height * AABB_MIN_SCALE,
            ),
            max: Vector3::new(
                width * AABB_MAX_SCALE,
                depth * AABB_DEPTH_SCALE,
                height * AABB_MAX_SCALE,
            ),
            radius: width.max(height) * RADIUS_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min: Vector3,
    pub max: Vector3,
}

impl Extents {
    pub fn new_from(xint: &Interval, yint: &Interval, zint: &Interval) -> Result<Self> {
        let extents = Self {
            min: Vector3::new(xint.min, yint.min, zint.min),
            max: Vector3::new(xint.max, yint.max, zint.max),
        };
        if !extents.validate() {
            return Err(BillboardError::InvalidExtents { min: extents.min, max: extents.max });
        }
        Ok(extents)
    }

    /// World space box of a quad given by two opposing corners
    /// in the frame anchored at `anchor`.
    pub fn of_entity(anchor: &Vector3, corner_a: &Vector3, corner_b: &Vector3) -> Result<Self> {
        let xint = Interval::spanning(corner_a.x, corner_b.x).translated(anchor.x);
        let yint = Interval::spanning(corner_a.y, corner_b.y).translated(anchor.y);
        let zint = Interval::spanning(corner_a.z, corner_b.z).translated(anchor.z);
        Self::new_from(&xint, &yint, &zint)
    }

    /// Same box grown by `pad` along every axis
    pub fn padded(&self, pad: Float) -> Result<Self> {
        let [xint, yint, zint] = self.intervals().map(|i| i.padded(pad));
        Self::new_from(&xint, &yint, &zint)
    }

    pub fn intervals(&self) -> [Interval; 3] {
        [
            Interval::new(self.min.x, self.max.x),
            Interval::new(self.min.y, self.max.y),
            Interval::new(self.min.z, self.max.z),
        ]
    }

    pub fn validate(&self) -> bool {
        self.intervals().iter().all(Interval::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn render_bounds_use_asymmetric_scales() {
        let b = RenderBounds::from_plane(10.0, 5.0, 0.05);
        assert_relative_eq!(b.min.x, -6.0);
        assert_relative_eq!(b.min.y, -0.055);
        assert_relative_eq!(b.min.z, -3.0);
        assert_relative_eq!(b.max.x, 16.0);
        assert_relative_eq!(b.max.y, 0.055);
        assert_relative_eq!(b.max.z, 8.0);
        assert_relative_eq!(b.radius, 16.0);
    }

    #[test]
    fn radius_follows_the_longer_side() {
        let b = RenderBounds::from_plane(2.0, 7.0, 0.05);
        assert_relative_eq!(b.radius, 7.0 * 1.6);
    }

    #[test]
    fn entity_extents_are_ordered_for_any_corner_order() {
        let anchor = Vector3::new(100.0, 200.0, 300.0);
        let e = Extents::of_entity(&anchor, &Vector3::new(4.0, -1.0, 3.0), &Vector3::new(-2.0, 5.0, 0.0)).unwrap();
        assert!(e.validate());
        assert_eq!(e.min, Vector3::new(98.0, 199.0, 300.0));
        assert_eq!(e.max, Vector3::new(104.0, 205.0, 303.0));
    }

    #[test]
    fn padding_applies_to_every_axis() {
        let e = Extents::of_entity(&Vector3::ZERO, &Vector3::ZERO, &Vector3::new(10.0, 0.0, 5.0)).unwrap();
        let s = e.padded(1000.0).unwrap();
        assert_eq!(s.min, e.min - Vector3::splat(1000.0));
        assert_eq!(s.max, e.max + Vector3::splat(1000.0));
        assert!(s.validate());
    }

    #[test]
    fn inverted_extents_are_an_error() {
        let e = Extents::of_entity(&Vector3::ZERO, &Vector3::ZERO, &Vector3::new(10.0, 0.0, 5.0)).unwrap();
        // Shrinking by more than half the size flips every axis
        let err = e.padded(-2000.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(e.padded(Float::NAN).is_err());
    }
}
