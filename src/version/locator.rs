//! Discovery of the locally installed SDK version
//!
//! The installed version is encoded in the name of a marker file, e.g.
//! `Assets/GoogleMobileAds/GoogleMobileAds_version-9.5.0_manifest.txt`.
//! Alternatively a JSON record `{"version": "9.5.0"}` can be read directly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::version::error::LocateError;

/// Extension of marker files
const MARKER_EXTENSION: &str = ".txt";

/// Where the installed version is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Marker file named `<prefix><version><suffix>.txt` inside `directory`
    Manifest {
        directory: PathBuf,
        prefix: String,
        suffix: String,
    },
    /// JSON record holding the version
    Sidecar(PathBuf),
}

impl VersionSource {
    pub fn locate(&self) -> Result<String, LocateError> {
        match self {
            VersionSource::Manifest {
                directory,
                prefix,
                suffix,
            } => locate(directory, prefix, suffix),
            VersionSource::Sidecar(path) => locate_sidecar(path),
        }
    }
}

/// Find the installed version from a marker file in `directory`.
///
/// Only files matching `*<suffix>.txt` are considered. When more than one
/// marker matches, the first one in directory-listing order wins; that order
/// is platform dependent.
pub fn locate(directory: &Path, prefix: &str, suffix: &str) -> Result<String, LocateError> {
    if !directory.is_dir() {
        return Err(LocateError::MissingDirectory(directory.to_path_buf()));
    }

    let io_error = |source| LocateError::Io {
        path: directory.to_path_buf(),
        source,
    };

    let glob_tail = format!("{suffix}{MARKER_EXTENSION}");

    for entry in fs::read_dir(directory).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };

        if !file_name.ends_with(&glob_tail) || !entry.path().is_file() {
            continue;
        }

        debug!("Checking file: {}", file_name);
        if let Some(version) = version_from_file_name(file_name, prefix, suffix) {
            info!("Found installed version {} in {}", version, file_name);
            return Ok(version);
        }
    }

    debug!("No marker file in {}", directory.display());
    Err(LocateError::NotFound(directory.to_path_buf()))
}

/// Extract the version token between `prefix` and `suffix` of a marker file name.
///
/// Returns `None` if the name does not follow the convention or the token is empty.
pub fn version_from_file_name(file_name: &str, prefix: &str, suffix: &str) -> Option<String> {
    let stem = file_name.strip_suffix(MARKER_EXTENSION)?;
    let version = stem.strip_prefix(prefix)?.strip_suffix(suffix)?;
    (!version.is_empty()).then(|| version.to_string())
}

#[derive(Debug, Deserialize)]
struct VersionRecord {
    version: String,
}

/// Read the installed version from a JSON record.
pub fn locate_sidecar(path: &Path) -> Result<String, LocateError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LocateError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(LocateError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let record: VersionRecord =
        serde_json::from_str(&content).map_err(|e| LocateError::InvalidSidecar {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let version = record.version.trim();
    if version.is_empty() {
        return Err(LocateError::InvalidSidecar {
            path: path.to_path_buf(),
            reason: "version is empty".to_string(),
        });
    }

    info!("Found installed version {} in {}", version, path.display());
    Ok(version.to_string())
}
