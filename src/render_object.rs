/*

    Emit the render object (.odr) of a billboard.

    The render object ties the texture descriptor and the two
    LOD meshes together and carries the local bounds. Skeleton,
    light, bound and joint sections are unused but the format
    requires them, so they are written as null.

    @date: Oct, 2026
*/

use crate::prelude::*;
use crate::bbox::{RenderBounds};

pub const ODR_VERSION: &str = "Version 165 32";

// LOD switch distances. Everything past the high LOD falls back
// to the low mesh, lower tiers are pushed out to the saturation value.
pub const HIGH_LOD_DISTANCE: Float = 80.0;
pub const SATURATED_LOD_DISTANCE: Float = 9998.0;

pub const HIGH_MESH_FILE: &str = "high.mesh";
pub const LOW_MESH_FILE: &str = "low.mesh";
pub const TEXTURE_DESCRIPTOR_FILE: &str = "texture.otx";

/// References inside the render object use the engine's `\` separator
pub fn asset_reference(name: &str, file: &str) -> String {
    format!("{name}\\{file}")
}

pub fn generate_odr(name: &str, bounds: &RenderBounds) -> String {
    let texture = asset_reference(name, TEXTURE_DESCRIPTOR_FILE);
    let high = asset_reference(name, HIGH_MESH_FILE);
    let low = asset_reference(name, LOW_MESH_FILE);
    let (min, max) = (bounds.min, bounds.max);

    format!(
"{ODR_VERSION}
{{
\tShaders
\t{{
\t\tdefault.sps
\t\t{{
\t\t\tDiffuseSampler {texture}
\t\t\tHardAlphaBlend 1.0000000
\t\t\tUseTessellation 0.0000000
\t\t}}
\t}}
\tSkeleton null
\tLodGroup
\t{{
\t\tHigh {high_dist:.1}
\t\t{{
\t\t\t{high} 0
\t\t}}
\t\tMed {saturated:.1}
\t\t{{
\t\t\t{low} 0
\t\t}}
\t\tLow {saturated:.1}
\t\tVlow {saturated:.1}
\t\tAABBMin {} {} {}
\t\tAABBMax {} {} {}
\t\tRadius {}
\t\tCenter 0.0000000 0.0 0.0000000
\t}}
\tLight null
\tBound null
\tJoints null
}}",
        min.x, min.y, min.z,
        max.x, max.y, max.z,
        bounds.radius,
        high_dist = HIGH_LOD_DISTANCE,
        saturated = SATURATED_LOD_DISTANCE,
    )
}
