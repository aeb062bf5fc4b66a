//! Output path resolution under the run's output root.
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Keep only the normal components of `path`, so the result is always relative.
fn relative_components(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// `<output_dir>/<entry path>.txt`
pub fn text_output_path(output_dir: &Path, entry_path: &str) -> PathBuf {
    output_dir.join(relative_components(Path::new(&format!("{}.txt", entry_path))))
}

/// `<output_dir>/<image_id>#<rank>.jpg`
pub fn crop_output_path(output_dir: &Path, image_id: &str, rank: usize) -> PathBuf {
    output_dir.join(relative_components(Path::new(&format!(
        "{}#{}.jpg",
        image_id, rank
    ))))
}

/// `<output_dir>/<entry path>.overlay.jpg`
pub fn overlay_output_path(output_dir: &Path, entry_path: &str) -> PathBuf {
    output_dir.join(relative_components(Path::new(&format!(
        "{}.overlay.jpg",
        entry_path
    ))))
}

/// Create the parent directory of `path` if it is missing.
///
/// Safe to call from several workers at once for the same ancestors.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
