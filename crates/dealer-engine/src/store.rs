//! JSON profile persistence: discovery, loading, and atomic saves.

use crate::profile::HandProfile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Draft profiles carry this suffix and are skipped by discovery.
const DRAFT_SUFFIX: &str = "_TEST.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read profile {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse profile {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("failed to write profile {path:?}: {source}")]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Load a profile from a JSON file. Unknown keys are ignored; missing
/// optional keys take their documented defaults.
pub fn load_profile(path: impl AsRef<Path>) -> Result<HandProfile, StoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
        source,
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        source,
        path: path.to_path_buf(),
    })
}

/// Save a profile atomically: write to a temp file in the same directory,
/// then rename over the target.
pub fn save_profile(path: impl AsRef<Path>, profile: &HandProfile) -> Result<(), StoreError> {
    let path = path.as_ref();
    let write_err = |source| StoreError::Write {
        source,
        path: path.to_path_buf(),
    };

    let json = serde_json::to_string_pretty(profile).map_err(|source| StoreError::Parse {
        source,
        path: path.to_path_buf(),
    })?;

    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    fs::write(&tmp, json.as_bytes()).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)
}

/// All non-draft profile files (`*.json`, excluding `*_TEST.json`) in a
/// directory, sorted by file name.
pub fn discover_profiles(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, StoreError> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| StoreError::Read {
        source,
        path: dir.to_path_buf(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Read {
            source,
            path: dir.to_path_buf(),
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".json") && !name.ends_with(DRAFT_SUFFIX) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
