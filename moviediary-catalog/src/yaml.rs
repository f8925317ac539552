//! YAML loading for curated seed data.
//!
//! A seed file holds a YAML sequence of [`NewMovie`] records. A seed
//! directory holds any number of such files, loaded in file-name order.

use crate::types::NewMovie;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// Load a single seed file.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewMovie>, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_seed(&contents).map_err(|e| SeedError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse seed YAML from a string. An empty document yields no movies.
pub fn parse_seed(contents: &str) -> Result<Vec<NewMovie>, serde_yml::Error> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(contents)
}

/// Load every `.yaml`/`.yml` file in a directory.
///
/// A missing directory is not an error and yields no movies.
pub fn load_seed_dir(dir: &Path) -> Result<Vec<NewMovie>, SeedError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(SeedError::NotADirectory(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| SeedError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut all = Vec::new();
    for entry in entries {
        all.extend(load_seed_file(&entry.path())?);
    }
    Ok(all)
}

/// Load seed data from either a file or a directory of files.
pub fn load_seed(path: &Path) -> Result<Vec<NewMovie>, SeedError> {
    if path.is_dir() {
        load_seed_dir(path)
    } else {
        load_seed_file(path)
    }
}
