/*

    Error taxonomy of the generator.

    Every variant carries the billboard name (when one
    is known) and the failing stage so that a batch
    abort tells which definition to fix.

    @date: Oct, 2026
*/

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::numeric::{Float, Vector3};

/// Coarse classification used for reporting and exit handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Validation,
    FileSystem,
}

/// Step of the batch that was running when an I/O error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReadDefinitions,
    CreateDirectory,
    WriteRenderObject,
    WriteMesh,
    CopyTexture,
    WriteTextureDescriptor,
    WriteArchetype,
    WritePlacement,
    WriteManifest,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::ReadDefinitions => "reading definitions",
            Stage::CreateDirectory => "creating directory",
            Stage::WriteRenderObject => "writing render object",
            Stage::WriteMesh => "writing mesh",
            Stage::CopyTexture => "copying texture",
            Stage::WriteTextureDescriptor => "writing texture descriptor",
            Stage::WriteArchetype => "writing archetype",
            Stage::WritePlacement => "writing placement",
            Stage::WriteManifest => "writing manifest",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum BillboardError {
    #[error("invalid definitions file {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    #[error("billboard '{name}': invalid name, {reason}")]
    InvalidName { name: String, reason: String },

    #[error("billboard '{name}': cannot parse world position '{raw}', {reason}")]
    AnchorParse { name: String, raw: String, reason: String },

    #[error("billboard '{name}': degenerate plane (width {width}, height {height})")]
    DegenerateGeometry { name: String, width: Float, height: Float },

    #[error("billboard '{name}': {field} must be finite and positive, found {value}")]
    InvalidParameter { name: String, field: &'static str, value: Float },

    #[error("invalid extents, found max < min ({min} .. {max})")]
    InvalidExtents { min: Vector3, max: Vector3 },

    #[error("{}{stage} failed at {path}: {source}", billboard_prefix(.name))]
    FileSystem {
        name: Option<String>,
        stage: Stage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("markup error: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("markup error: {0}")]
    MarkupIo(#[from] io::Error),

    #[error("malformed markup: {0}")]
    MarkupStructure(String),
}

fn billboard_prefix(name: &Option<String>) -> String {
    match name {
        Some(n) => format!("billboard '{n}': "),
        None => String::new(),
    }
}

impl BillboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillboardError::Input { .. }
            | BillboardError::InvalidName { .. }
            | BillboardError::AnchorParse { .. } => ErrorKind::Input,
            BillboardError::DegenerateGeometry { .. }
            | BillboardError::InvalidParameter { .. }
            | BillboardError::InvalidExtents { .. } => ErrorKind::Validation,
            BillboardError::FileSystem { .. }
            | BillboardError::Markup(_)
            | BillboardError::MarkupIo(_) => ErrorKind::FileSystem,
            BillboardError::MarkupStructure(_) => ErrorKind::Input,
        }
    }

    pub(crate) fn io(name: Option<&str>, stage: Stage, path: impl Into<PathBuf>, source: io::Error) -> Self {
        BillboardError::FileSystem {
            name: name.map(str::to_owned),
            stage,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BillboardError>;
