/*

    Emit the texture descriptor (.otx) that sits next to
    the copied texture image of every billboard.

    @date: Oct, 2026
*/

pub const OTX_VERSION: &str = "Version 13 30";
pub const TEXTURE_IMAGE_FILE: &str = "texture.dds";
pub const PIXEL_FORMAT: &str = "DXT5";
pub const MIP_LEVELS: u32 = 7;

pub fn generate_otx(image_file: &str) -> String {
    format!(
"{OTX_VERSION}
{{
\tImage {image_file}
\tType Regular
\tPixelFormat {PIXEL_FORMAT}
\tLevels {MIP_LEVELS}
\tUsage DIFFUSE
\tUsageFlags NOT_HALF HD_SPLIT
\tExtraFlags 0
}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_for_default_image() {
        assert_eq!(
            generate_otx(TEXTURE_IMAGE_FILE),
            "Version 13 30\n{\n\tImage texture.dds\n\tType Regular\n\tPixelFormat DXT5\n\tLevels 7\n\tUsage DIFFUSE\n\tUsageFlags NOT_HALF HD_SPLIT\n\tExtraFlags 0\n}"
        );
    }
}
