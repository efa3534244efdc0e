/*

    Generate billboard assets (render objects, meshes,
    texture descriptors, archetypes, placements and the
    manifest) from tools/definitions.json.

    @date: Oct, 2026

*/

use std::path::Path;
use tracing::{info, error, debug};
use tracing_subscriber;

use billboard_gen::config::{GeneratorConfig, CONFIG_PATH};
use billboard_gen::pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    let config = GeneratorConfig::load_or_default(Path::new(CONFIG_PATH))?;
    debug!("Generator config: {:#?}", config);

    info!("Loading billboards from {}...", config.definitions_path.display());
    let report = pipeline::run(&config).map_err(|e| {
        error!("Billboard generation failed ({:?}): {}", e.kind(), e);
        Box::<dyn std::error::Error>::from(e)
    })?;

    info!("Finished execution, {} billboards written to {}.", report.billboards.len(), config.output_dir.display());
    Ok(())
}
