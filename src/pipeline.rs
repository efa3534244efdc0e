/*

    Given the billboard definitions, generate every artifact
    and write them to the output directory.

    The batch runs in three phases:
        1. derive geometry and render all artifacts in memory.
           Input or validation errors abort here, before any
           file exists.
        2. write each billboard's artifact set (in parallel).
           A set that fails is removed again, the other sets
           are completed.
        3. barrier: the manifest is written only once every
           set is on disk.

    @date: Oct, 2026
*/

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::prelude::*;
use crate::archetype::{archetype_document};
use crate::config::{GeneratorConfig};
use crate::errors::{BillboardError, Result, Stage};
use crate::geometry::{check_positive, derive_geometry};
use crate::json_structs::{BillboardDefinition, Billboards};
use crate::manifest::{manifest_document, MANIFEST_FILE};
use crate::markup::{ToElement};
use crate::mesh::{generate_mesh};
use crate::render_object::{generate_odr, HIGH_MESH_FILE, LOW_MESH_FILE, TEXTURE_DESCRIPTOR_FILE};
use crate::texture::{generate_otx, TEXTURE_IMAGE_FILE};
use crate::placement::{placement_document};

/// Everything generated for one billboard, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardArtifacts {
    pub name: String,
    pub render_object: String,
    pub low_mesh: String,
    pub high_mesh: String,
    pub texture_descriptor: String,
    pub archetype: String,
    pub placement: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub billboards: Vec<String>,
    // Per billboard files, the manifest is not counted
    pub files_written: usize,
    pub manifest_path: PathBuf,
}

/// Names end up as file stems and directory names
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative directory")
    } else if name.contains(['/', '\\', '\0']) {
        Some("name contains a path separator")
    } else if name.trim() != name {
        Some("name has leading or trailing whitespace")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(BillboardError::InvalidName { name: name.to_string(), reason: reason.to_string() }),
        None => Ok(()),
    }
}

pub fn build_artifacts(name: &str, def: &BillboardDefinition, config: &GeneratorConfig) -> Result<BillboardArtifacts> {
    validate_name(name)?;
    let geometry = derive_geometry(name, def)?;
    let bounds = geometry.render_bounds(def.lod_offset);
    let lod_field = if config.document_lod.is_some() { "documentLod" } else { "lod" };
    let lod = check_positive(name, lod_field, config.document_lod_for(def.lod))?;

    Ok(BillboardArtifacts {
        name: name.to_string(),
        render_object: generate_odr(name, &bounds),
        low_mesh: generate_mesh(geometry.width, geometry.height, def.lod_offset),
        high_mesh: generate_mesh(geometry.width, geometry.height, def.offset),
        texture_descriptor: generate_otx(TEXTURE_IMAGE_FILE),
        archetype: archetype_document(name, &bounds, lod).to_element().to_xml()?,
        placement: placement_document(name, &geometry, lod)?.to_element().to_xml()?,
    })
}

pub fn run(config: &GeneratorConfig) -> Result<BatchReport> {
    let billboards = parse_definitions(&config.definitions_path)?;
    generate(&billboards, config)
}

pub fn generate(billboards: &Billboards, config: &GeneratorConfig) -> Result<BatchReport> {
    let start = Instant::now();

    if !config.texture_path.is_file() {
        return Err(BillboardError::io(
            None,
            Stage::CopyTexture,
            &config.texture_path,
            io::Error::new(io::ErrorKind::NotFound, "texture asset not found"),
        ));
    }

    if billboards.is_empty() {
        warn!("No billboard definitions, only the manifest will be written");
    }

    let artifacts: Vec<BillboardArtifacts> = {
        let span = tracing::span!(tracing::Level::INFO, "derive");
        let _enter = span.enter();
        billboards
            .iter()
            .map(|(name, def)| build_artifacts(name, def, config))
            .collect::<Result<_>>()?
    };
    info!(">> Rendered artifacts for {} billboards.", billboards.len());

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| BillboardError::io(None, Stage::CreateDirectory, &config.output_dir, e))?;

    let files_written = {
        let span = tracing::span!(tracing::Level::INFO, "write");
        let _enter = span.enter();
        // Every set finishes (or is rolled back) before any error is reported
        let results: Vec<Result<usize>> = artifacts
            .par_iter()
            .map(|a| write_artifacts(a, config))
            .collect();
        results.into_iter().sum::<Result<usize>>()?
    };

    let names = billboards.names();
    let manifest_path = {
        let span = tracing::span!(tracing::Level::INFO, "manifest");
        let _enter = span.enter();
        write_manifest(&names, &config.output_dir)?
    };

    info!("Generated {} billboards ({} files) in {:?}", names.len(), files_written, start.elapsed());
    Ok(BatchReport {
        billboards: names,
        files_written,
        manifest_path,
    })
}

pub fn write_manifest(names: &[String], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(MANIFEST_FILE);
    let xml = manifest_document(names).to_element().to_xml()?;
    fs::write(&path, xml).map_err(|e| BillboardError::io(None, Stage::WriteManifest, &path, e))?;
    info!("Manifest saved to {}", path.display());
    Ok(path)
}

/// Write one billboard's set. On failure the files written so far
/// are removed so no half written set is left behind.
fn write_artifacts(a: &BillboardArtifacts, config: &GeneratorConfig) -> Result<usize> {
    let mut written: Vec<PathBuf> = Vec::new();
    let mesh_dir = config.output_dir.join(&a.name);

    let result = write_set(a, config, &mesh_dir, &mut written);
    if let Err(e) = &result {
        error!("Billboard '{}' failed, removing {} written files: {}", a.name, written.len(), e);
        for path in written.iter().rev() {
            if let Err(err) = fs::remove_file(path) {
                warn!("Could not remove {}: {}", path.display(), err);
            }
        }
        // Only succeeds if the directory is empty
        let _ = fs::remove_dir(&mesh_dir);
    }
    result.map(|()| written.len())
}

fn write_set(a: &BillboardArtifacts, config: &GeneratorConfig, mesh_dir: &Path, written: &mut Vec<PathBuf>) -> Result<()> {
    let name = a.name.as_str();
    let out = &config.output_dir;

    fs::create_dir_all(mesh_dir)
        .map_err(|e| BillboardError::io(Some(name), Stage::CreateDirectory, mesh_dir, e))?;

    let mut write = |path: PathBuf, contents: &str, stage: Stage| -> Result<()> {
        fs::write(&path, contents).map_err(|e| BillboardError::io(Some(name), stage, &path, e))?;
        debug!("Wrote {}", path.display());
        written.push(path);
        Ok(())
    };

    write(out.join(format!("{name}.odr")), &a.render_object, Stage::WriteRenderObject)?;
    write(mesh_dir.join(LOW_MESH_FILE), &a.low_mesh, Stage::WriteMesh)?;
    write(mesh_dir.join(HIGH_MESH_FILE), &a.high_mesh, Stage::WriteMesh)?;
    write(mesh_dir.join(TEXTURE_DESCRIPTOR_FILE), &a.texture_descriptor, Stage::WriteTextureDescriptor)?;
    write(out.join(format!("{name}.ytyp.xml")), &a.archetype, Stage::WriteArchetype)?;
    write(out.join(format!("{name}.ymap.xml")), &a.placement, Stage::WritePlacement)?;

    let texture = mesh_dir.join(TEXTURE_IMAGE_FILE);
    fs::copy(&config.texture_path, &texture)
        .map_err(|e| BillboardError::io(Some(name), Stage::CopyTexture, &texture, e))?;
    written.push(texture);

    info!("Billboard '{}' written to {}", name, out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn sample_definition() -> BillboardDefinition {
        BillboardDefinition::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 5.0), "X:100Y:200Z:300")
    }

    #[test]
    fn rejects_names_that_are_not_file_stems() {
        for name in ["", ".", "..", "a/b", "a\\b", " A", "A ", "\tA"] {
            let e = validate_name(name).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::Input, "name {name:?}");
        }
        assert!(validate_name("billboard_01").is_ok());
    }

    #[test]
    fn artifacts_share_the_same_bounds() {
        let a = build_artifacts("sign", &sample_definition(), &GeneratorConfig::default()).unwrap();
        assert!(a.render_object.contains("AABBMin -6 -0.05500000000000001 -3"));
        assert!(a.archetype.contains(r#"<bbMin x="-6" y="-0.05500000000000001" z="-3"/>"#));
        assert!(a.archetype.contains(r#"<bbMax x="16" y="0.05500000000000001" z="8"/>"#));
        assert!(a.archetype.contains(r#"<bsRadius value="16"/>"#));
    }

    #[test]
    fn meshes_use_lod_offset_and_offset() {
        let a = build_artifacts("sign", &sample_definition(), &GeneratorConfig::default()).unwrap();
        assert!(a.low_mesh.contains("Min -5.5 -0.05 -2.75"));
        assert!(a.high_mesh.contains("Min -5.5 -0.001 -2.75"));
    }

    #[test]
    fn document_lod_override_can_be_disabled() {
        let mut config = GeneratorConfig::default();
        let a = build_artifacts("sign", &sample_definition(), &config).unwrap();
        assert!(a.archetype.contains(r#"<lodDist value="1000"/>"#));

        config.document_lod = None;
        let a = build_artifacts("sign", &sample_definition(), &config).unwrap();
        assert!(a.archetype.contains(r#"<lodDist value="80"/>"#));
        assert!(a.placement.contains(r#"<streamingExtentsMin x="20" y="120" z="220"/>"#));
    }

    #[test]
    fn degenerate_definition_fails_validation() {
        let def = BillboardDefinition::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0), "X:0Y:0Z:0");
        let e = build_artifacts("flat", &def, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
    }

    #[test]
    fn negative_lod_offset_fails_before_bounds_are_built() {
        let mut def = sample_definition();
        def.lod_offset = -0.05;
        let e = build_artifacts("sign", &def, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.to_string().contains("lodOffset"));
    }

    #[test]
    fn negative_lod_without_override_is_a_validation_error() {
        let config = GeneratorConfig { document_lod: None, ..Default::default() };
        let mut def = sample_definition();
        def.lod = -2000.0;
        let e = build_artifacts("sign", &def, &config).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.to_string().contains("'sign'"));

        // The override replaces the billboard's own lod
        assert!(build_artifacts("sign", &def, &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn nan_lod_string_is_rejected() {
        let def: BillboardDefinition = serde_json::from_str(r#"{
            "bottomLeft": [0, 0, 0],
            "topRight": [10, 0, 5],
            "worldPosition": "X:0Y:0Z:0",
            "lod": "NaN"
        }"#).unwrap();
        let config = GeneratorConfig { document_lod: None, ..Default::default() };
        let e = build_artifacts("sign", &def, &config).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.to_string().contains("lod"));
    }

    #[test]
    fn empty_definitions_still_write_a_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let texture = dir.path().join("texture.dds");
        fs::write(&texture, b"DDS ").unwrap();
        let config = GeneratorConfig::new(&dir.path().join("definitions.json"), &texture, &dir.path().join("raw"));

        let report = generate(&Billboards::default(), &config).unwrap();
        assert!(report.billboards.is_empty());
        assert_eq!(report.files_written, 0);
        assert!(report.manifest_path.is_file());
    }
}
