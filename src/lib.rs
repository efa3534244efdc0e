pub mod numeric;
pub mod interval;
pub mod bbox;
pub mod errors;
pub mod config;
pub mod json_structs;
pub mod json_parser;
pub mod geometry;
pub mod mesh;
pub mod render_object;
pub mod texture;
pub mod markup;
pub mod archetype;
pub mod placement;
pub mod manifest;
pub mod pipeline;

pub mod prelude;
