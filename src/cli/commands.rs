//! CLI command handlers

use std::path::{Path, PathBuf};

use log::info;

use crate::cleanup::clear_staging;
use crate::error::Result;
use crate::mix::{render_clip, ClipSources, MixConfig, UniformBedPicker};

/// Assemble one clip and print where it landed
#[allow(clippy::too_many_arguments)]
pub fn mix(
    narration: PathBuf,
    intro: PathBuf,
    outro: PathBuf,
    bed: Option<PathBuf>,
    title: &str,
    output_dir: &Path,
    asset_dir: &Path,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            info!("using mix config from {}", path.display());
            MixConfig::from_json_file(path)?
        }
        None => MixConfig::default(),
    };

    let sources = ClipSources {
        narration,
        intro,
        outro,
        bed,
    };
    let beds = UniformBedPicker::bundled(asset_dir);

    let final_path = render_clip(&sources, title, output_dir, &config, &beds)?;
    println!("Final audio file: '{}'", final_path.display());
    Ok(())
}

/// Clear leftover intermediate files
pub fn clean(staging_dir: &Path) -> Result<()> {
    let removed = clear_staging(staging_dir)?;
    println!(
        "Removed {} staged files from '{}'",
        removed,
        staging_dir.display()
    );
    Ok(())
}
