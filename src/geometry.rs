/*

    Derive the plane of a billboard from its definition.

    Given the two opposing corners and the anchor string
    compute width, height, yaw, the anchor position and a
    rotation about the vertical axis. Everything written
    into the artifacts is computed from DerivedGeometry.

    Axis convention: x/y span the ground, z is up. The
    yaw is measured from +x towards +y.

    @date: Oct, 2026
*/

use crate::prelude::*;
use crate::bbox::{Extents, RenderBounds};
use crate::errors::{BillboardError, Result};
use crate::json_structs::{BillboardDefinition};

/// Rotation about the vertical axis, kept as the (y, w) pair of
/// the quaternion built for it. The other two components are
/// always zero for a pure yaw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YawRotation {
    pub y: Float,
    pub w: Float,
}

impl YawRotation {
    /// Quaternion for a rotation of `angle` radians, reduced to (y, w).
    pub fn from_angle(angle: Float) -> Self {
        Self::from_quaternion(&Quaternion::from_rotation_y(angle))
    }

    /// Keep (y, w) of `q`. Non zero x or z means `q` is not a pure
    /// yaw and that part of the rotation is lost.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        if !approx_zero(q.x) || !approx_zero(q.z) {
            warn!("Discarding non-yaw quaternion components x: {}, z: {}", q.x, q.z);
        }
        Self { y: q.y, w: q.w }
    }

    /// Tuple written into placements. The engine is z-up so the
    /// stored y component becomes the z of the entity rotation.
    pub fn placement_tuple(&self) -> [Float; 4] {
        [0.0, 0.0, self.y, self.w]
    }

    /// Angle this rotation turns by
    pub fn angle(&self) -> Float {
        2.0 * self.y.atan2(self.w)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedGeometry {
    pub width: Float,
    pub height: Float,
    pub yaw: Float,
    pub rotation: YawRotation,
    pub world_position: Vector3,
    pub bottom_left: Vector3,
    pub top_right: Vector3,
}

impl DerivedGeometry {
    /// Local box shared by the render object and the archetype,
    /// `depth` is the billboard's lod offset.
    pub fn render_bounds(&self, depth: Float) -> RenderBounds {
        RenderBounds::from_plane(self.width, self.height, depth)
    }

    pub fn entity_extents(&self) -> Result<Extents> {
        Extents::of_entity(&self.world_position, &self.bottom_left, &self.top_right)
    }

    pub fn streaming_extents(&self, lod: Float) -> Result<Extents> {
        self.entity_extents()?.padded(lod)
    }

    /// Anchor plus quad centre
    pub fn entity_position(&self) -> Vector3 {
        self.world_position + midpoint(&self.bottom_left, &self.top_right)
    }
}

/// Distances and thicknesses must be finite and strictly positive,
/// anything else turns the boxes built from them inside out.
pub fn check_positive(name: &str, field: &'static str, value: Float) -> Result<Float> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BillboardError::InvalidParameter { name: name.to_string(), field, value })
    }
}

pub fn derive_geometry(name: &str, def: &BillboardDefinition) -> Result<DerivedGeometry> {
    let world_position = parse_world_position(name, &def.world_position)?;
    check_positive(name, "lodOffset", def.lod_offset)?;
    check_positive(name, "offset", def.offset)?;

    let delta = def.top_right - def.bottom_left;
    let width = (delta.x * delta.x + delta.y * delta.y).sqrt();
    let height = delta.z.abs();

    // NaN compares false, so it is rejected here too
    if !(width > 0.0) || !(height > 0.0) || approx_zero(width) || approx_zero(height) {
        return Err(BillboardError::DegenerateGeometry {
            name: name.to_string(),
            width,
            height,
        });
    }

    let yaw = delta.y.atan2(delta.x);
    let rotation = YawRotation::from_angle(-yaw);
    debug!("Billboard '{}': width {}, height {}, yaw {}", name, width, height, yaw);

    Ok(DerivedGeometry {
        width,
        height,
        yaw,
        rotation,
        world_position,
        bottom_left: def.bottom_left,
        top_right: def.top_right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn def(bl: [Float; 3], tr: [Float; 3], anchor: &str) -> BillboardDefinition {
        BillboardDefinition::new(Vector3::from_array(bl), Vector3::from_array(tr), anchor)
    }

    #[test]
    fn axis_aligned_plane() {
        let g = derive_geometry("A", &def([0., 0., 0.], [10., 0., 5.], "X:100Y:200Z:300")).unwrap();
        assert_eq!(g.width, 10.0);
        assert_eq!(g.height, 5.0);
        assert_eq!(g.yaw, 0.0);
        assert_eq!(g.world_position, Vector3::new(100.0, 200.0, 300.0));
        assert_relative_eq!(g.rotation.w, 1.0);
        assert_relative_eq!(g.rotation.y, 0.0);
    }

    #[test]
    fn diagonal_plane_width_and_height() {
        let g = derive_geometry("A", &def([1., 1., 4.], [4., 5., -2.], "X:0Y:0Z:0")).unwrap();
        assert_relative_eq!(g.width, 5.0);
        assert_relative_eq!(g.height, 6.0);
        assert_relative_eq!(g.yaw, (4.0 as Float).atan2(3.0));
    }

    // The placement stores a rotation by -yaw, so the yaw is
    // recovered as the negated angle of the (y, w) pair.
    #[test]
    fn yaw_recovered_from_rotation() {
        for (tr, expected) in [
            ([0., 10., 1.], FRAC_PI_2),
            ([10., 10., 1.], FRAC_PI_4),
            ([-10., 0., 1.], PI),
            ([0., -3., 1.], -FRAC_PI_2),
            ([-1., -1., 1.], -3.0 * FRAC_PI_4),
        ] {
            let g = derive_geometry("A", &def([0., 0., 0.], tr, "X:0Y:0Z:0")).unwrap();
            assert_relative_eq!(g.yaw, expected, epsilon = 1e-12);
            assert_relative_eq!(-g.rotation.angle(), expected, epsilon = 1e-12);
            assert_relative_eq!(g.rotation.y, -(expected / 2.0).sin(), epsilon = 1e-12);
            assert_relative_eq!(g.rotation.w, (expected / 2.0).cos(), epsilon = 1e-12);
            let [x, y, _, _] = g.rotation.placement_tuple();
            assert_eq!((x, y), (0.0, 0.0));
        }
    }

    #[test]
    fn yaw_only_quaternion_truncation_keeps_y_and_w() {
        let q = Quaternion::from_rotation_z(0.3) * Quaternion::from_rotation_y(0.5);
        let r = YawRotation::from_quaternion(&q);
        assert_eq!(r.y, q.y);
        assert_eq!(r.w, q.w);
    }

    #[test]
    fn zero_height_is_rejected() {
        let e = derive_geometry("flat", &def([0., 0., 1.], [10., 0., 1.], "X:0Y:0Z:0")).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.to_string().contains("flat"));
    }

    #[test]
    fn zero_width_is_rejected() {
        let e = derive_geometry("thin", &def([2., 3., 0.], [2., 3., 5.], "X:0Y:0Z:0")).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
    }

    #[test]
    fn anchor_is_checked_before_geometry() {
        let e = derive_geometry("A", &def([0., 0., 0.], [0., 0., 0.], "X:1Y:2")).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Input);
    }

    #[test]
    fn entity_position_is_anchor_plus_midpoint() {
        let g = derive_geometry("B", &def([2., -4., 0.], [6., 0., 8.], "X:1Y:2Z:3")).unwrap();
        assert_eq!(g.world_position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(g.entity_position(), Vector3::new(5.0, 0.0, 7.0));
    }

    #[test]
    fn streaming_extents_pad_entity_extents() {
        let g = derive_geometry("A", &def([0., 0., 0.], [10., 0., 5.], "X:100Y:200Z:300")).unwrap();
        let e = g.entity_extents().unwrap();
        let s = g.streaming_extents(1000.0).unwrap();
        assert_eq!(e.min, Vector3::new(100.0, 200.0, 300.0));
        assert_eq!(e.max, Vector3::new(110.0, 200.0, 305.0));
        assert_eq!(s.min, e.min - Vector3::splat(1000.0));
        assert_eq!(s.max, e.max + Vector3::splat(1000.0));
        assert!(e.validate() && s.validate());
    }

    #[test]
    fn negative_lod_offset_is_rejected() {
        let mut d = def([0., 0., 0.], [10., 0., 5.], "X:0Y:0Z:0");
        d.lod_offset = -0.05;
        let e = derive_geometry("sign", &d).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.to_string().contains("lodOffset"));
    }

    #[test]
    fn offset_must_be_finite_and_positive() {
        for value in [0.0, -0.001, Float::NAN, Float::INFINITY] {
            let mut d = def([0., 0., 0.], [10., 0., 5.], "X:0Y:0Z:0");
            d.offset = value;
            let e = derive_geometry("sign", &d).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::Validation, "offset {value}");
        }
    }

    #[test]
    fn negative_pad_cannot_invert_streaming_extents() {
        let g = derive_geometry("A", &def([0., 0., 0.], [10., 0., 5.], "X:0Y:0Z:0")).unwrap();
        assert!(g.streaming_extents(-2000.0).is_err());
        assert_eq!(check_positive("A", "lod", 80.0).unwrap(), 80.0);
    }
}
