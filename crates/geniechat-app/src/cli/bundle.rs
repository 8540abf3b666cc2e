//! Deploy-bundle assembly.
//!
//! Produces an output directory containing the built artifact, an
//! optional companion entry-point script, and a `manifest.txt` naming
//! the artifact. A stale output directory is removed first.

use anyhow::{Context, bail};
use tracing::info;

use std::fs;
use std::path::Path;

pub fn run_bundle(artifact: &Path, entry: Option<&Path>, out_dir: &Path) -> anyhow::Result<()> {
    if !artifact.is_file() {
        bail!("artifact {} does not exist", artifact.display());
    }

    if out_dir.exists() {
        info!("removing stale bundle directory {}", out_dir.display());
        fs::remove_dir_all(out_dir)
            .with_context(|| format!("failed to remove {}", out_dir.display()))?;
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let artifact_name = artifact
        .file_name()
        .and_then(|name| name.to_str())
        .context("artifact path has no file name")?;
    fs::copy(artifact, out_dir.join(artifact_name))
        .with_context(|| format!("failed to copy {}", artifact.display()))?;
    info!("copied {} into {}", artifact.display(), out_dir.display());

    match entry {
        Some(entry) if entry.is_file() => {
            let entry_name = entry
                .file_name()
                .and_then(|name| name.to_str())
                .context("entry-point path has no file name")?;
            fs::copy(entry, out_dir.join(entry_name))
                .with_context(|| format!("failed to copy {}", entry.display()))?;
            info!("copied {} into {}", entry.display(), out_dir.display());
        }
        Some(entry) => {
            info!("{} does not exist, skipping copy", entry.display());
        }
        None => {}
    }

    fs::write(out_dir.join("manifest.txt"), format!("{artifact_name}\n"))
        .context("failed to write manifest.txt")?;

    println!("Bundle written to {}", out_dir.display());
    Ok(())
}
