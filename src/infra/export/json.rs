use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::entities::outline::OutlineNode;

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes the finished forest. The file only appears once fully written.
pub fn write_forest(path: &Path, roots: &[OutlineNode], pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir: {}", parent.display()))?;
    }

    let body = if pretty {
        serde_json::to_string_pretty(roots)
    } else {
        serde_json::to_string(roots)
    }
    .context("failed to serialize outline forest")?;

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, body)
        .with_context(|| format!("failed to write output: {}", temp_path.display()))?;
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err)
            .with_context(|| format!("failed to move output into place: {}", path.display()));
    }
    Ok(())
}

pub fn read_forest(path: &Path) -> Result<Vec<OutlineNode>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read forest: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse forest json: {}", path.display()))
}
