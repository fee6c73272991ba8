use crate::error::MigrationDiscoveryError;
use crate::model::Migration;
use crate::version::Version;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads `<version>_<description>.sql` files from `dir`.
///
/// Versions may be fractional (`1.1_add_index.sql`). Underscores in the
/// description become spaces. Scripts are returned untouched, sorted by
/// version.
pub fn discover_migrations(dir: impl AsRef<Path>) -> Result<Vec<Migration>, MigrationDiscoveryError> {
    let dir = dir.as_ref();
    let dir_display = dir.display().to_string();

    let entries = fs::read_dir(dir).map_err(|e| MigrationDiscoveryError::Io {
        path: dir_display.clone(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MigrationDiscoveryError::Io {
            path: dir_display.clone(),
            message: e.to_string(),
        })?;

        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(MigrationDiscoveryError::EmptyMigrationsDir { dir: dir_display });
    }

    let mut candidates: Vec<(Version, String, String, PathBuf)> = Vec::with_capacity(files.len());
    for path in files {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| MigrationDiscoveryError::Io {
                path: path.display().to_string(),
                message: "missing filename".to_string(),
            })?;

        let (version, description) = parse_filename(&filename)?;
        candidates.push((version, description, filename, path));
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(&b.2)));

    let mut seen: HashMap<Version, String> = HashMap::new();
    let mut out = Vec::with_capacity(candidates.len());

    for (version, description, filename, path) in candidates {
        if let Some(first) = seen.insert(version, filename.clone()) {
            return Err(MigrationDiscoveryError::DuplicateVersion {
                version,
                first,
                second: filename,
            });
        }

        let script = fs::read_to_string(&path).map_err(|e| MigrationDiscoveryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        out.push(Migration::new(version, description, script));
    }

    Ok(out)
}

fn parse_filename(filename: &str) -> Result<(Version, String), MigrationDiscoveryError> {
    let invalid = |reason: &str| MigrationDiscoveryError::InvalidFilename {
        filename: filename.to_string(),
        reason: reason.to_string(),
    };

    let base = filename
        .strip_suffix(".sql")
        .ok_or_else(|| invalid("file extension must be .sql"))?;

    let (version_str, name) = base
        .split_once('_')
        .ok_or_else(|| invalid("expected format <version>_<description>.sql"))?;

    if name.is_empty() {
        return Err(invalid("description segment must not be empty"));
    }

    if version_str.starts_with('-') {
        return Err(invalid("version must not be negative"));
    }

    let version: Version = version_str
        .parse()
        .map_err(|e: crate::version::VersionParseError| invalid(&e.reason))?;

    Ok((version, name.replace('_', " ")))
}
