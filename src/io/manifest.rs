//! Manifest parsing: one image per line, either `path` or `id<TAB>path`.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based line number in the manifest
    pub line: usize,
    /// Identifier used in crop names; defaults to the full path, extension included
    pub id: String,
    /// Path as written in the manifest, relative to the base image directory
    pub path: String,
}

impl ManifestEntry {
    /// Parse one manifest line. Blank lines yield `None`.
    pub fn parse(line_no: usize, line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let (id, path) = match line.split_once('\t') {
            Some((id, path)) if !id.is_empty() => (id.to_string(), path.to_string()),
            Some((_, path)) => (default_id(path), path.to_string()),
            None => (default_id(line), line.to_string()),
        };

        Some(Self {
            line: line_no,
            id,
            path,
        })
    }

    /// Location of the image on disk, joined onto `base_dir` when given.
    pub fn resolve(&self, base_dir: Option<&Path>) -> PathBuf {
        match base_dir {
            Some(base) => base.join(&self.path),
            None => PathBuf::from(&self.path),
        }
    }
}

fn default_id(path: &str) -> String {
    path.to_string()
}

pub fn parse_manifest(contents: &str) -> Vec<ManifestEntry> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(i, line)| ManifestEntry::parse(i + 1, line))
        .collect()
}

pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_manifest(&contents);

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for entry in &entries {
        if let Some(line) = first_seen.insert(&entry.id, entry.line) {
            warn!(
                "Manifest line {} reuses id {:?} from line {}; their crops will overwrite each other",
                entry.line, entry.id, line
            );
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_is_its_own_id() {
        let e = ManifestEntry::parse(1, "dogs/001.jpg").unwrap();
        assert_eq!(e.id, "dogs/001.jpg");
        assert_eq!(e.path, "dogs/001.jpg");
    }

    #[test]
    fn paths_differing_only_by_extension_get_distinct_ids() {
        let entries = parse_manifest("a.png\na.bmp\n");
        assert_eq!(entries[0].id, "a.png");
        assert_eq!(entries[1].id, "a.bmp");
    }

    #[test]
    fn tab_separated_id_and_path() {
        let e = ManifestEntry::parse(3, "img42\tset/a.png\r").unwrap();
        assert_eq!(e.line, 3);
        assert_eq!(e.id, "img42");
        assert_eq!(e.path, "set/a.png");
    }

    #[test]
    fn skips_blank_lines_and_keeps_line_numbers() {
        let entries = parse_manifest("a.jpg\n\n  \nb.jpg\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].line, 4);
    }

    #[test]
    fn resolve_joins_base_dir() {
        let e = ManifestEntry::parse(1, "x/y.jpg").unwrap();
        assert_eq!(e.resolve(Some(Path::new("/data"))), PathBuf::from("/data/x/y.jpg"));
        assert_eq!(e.resolve(None), PathBuf::from("x/y.jpg"));
    }

    #[test]
    fn missing_manifest_is_manifest_error() {
        let err = read_manifest(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }
}
