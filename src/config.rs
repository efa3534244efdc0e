/*

    Generator settings.

    The generator runs without flags or environment
    variables. Defaults mirror the tools/ layout of the
    content repository; an optional tools/generator.json
    overrides any of them.

    @date: Oct, 2026
*/

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::prelude::*;
use crate::errors::{BillboardError, Result};

pub const CONFIG_PATH: &str = "tools/generator.json";

// LOD distance written into archetypes and placements
pub const DOCUMENT_LOD: Float = 1000.0;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[derive(SmartDefault)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct GeneratorConfig {
    #[default(PathBuf::from("tools/definitions.json"))]
    pub definitions_path: PathBuf,

    #[default(PathBuf::from("tools/texture.dds"))]
    pub texture_path: PathBuf,

    #[default(PathBuf::from("raw"))]
    pub output_dir: PathBuf,

    // None falls back to each billboard's own lod
    #[default(Some(DOCUMENT_LOD))]
    pub document_lod: Option<Float>,
}

impl GeneratorConfig {
    pub fn new(definitions_path: &Path, texture_path: &Path, output_dir: &Path) -> Self {
        Self {
            definitions_path: definitions_path.to_path_buf(),
            texture_path: texture_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let input_error = |reason: String| BillboardError::Input { path: path.to_path_buf(), reason };
        let file = File::open(path).map_err(|e| input_error(e.to_string()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| input_error(e.to_string()))?;
        debug!("Loaded generator config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Config file if one exists at `path`, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::from_json_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// LOD distance used for the documents of a billboard whose own lod is `billboard_lod`
    pub fn document_lod_for(&self, billboard_lod: Float) -> Float {
        self.document_lod.unwrap_or(billboard_lod)
    }
}
