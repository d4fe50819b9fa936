// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem discovery collaborators: feature directory listing and
//! generic bundle scanning.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::{BundleStatus, ResolvedBundle};
use crate::container::ContainerIdentity;
use crate::{Error, Result, FEATURES_DIR};

#[cfg(test)]
#[path = "./discovery_test.rs"]
mod discovery_test;

/// Supplies candidate feature install directories for a home.
pub trait FeaturePathSource: Send + Sync {
    /// Candidate feature directories under `home`, in a stable order.
    ///
    /// An empty list means the home carries no features at all; the
    /// selector turns that into a `NoFeatures` failure.
    fn feature_dirs(&self, home: &Path) -> Result<Vec<PathBuf>>;
}

/// Discovers bundles in a single directory.
pub trait BundleScanner: Send + Sync {
    /// All bundles found directly in `directory`.
    ///
    /// Returned bundles are parented to the scanned directory's identity;
    /// containers that delegate here rebind them afterwards.
    fn discover(&self, directory: &Path) -> Result<Vec<ResolvedBundle>>;
}

/// Default [`FeaturePathSource`] listing `<home>/features/*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFeaturePaths;

impl FeaturePathSource for FsFeaturePaths {
    fn feature_dirs(&self, home: &Path) -> Result<Vec<PathBuf>> {
        let features = home.join(FEATURES_DIR);
        if !features.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&features).map_err(|e| Error::ReadFailed {
            path: features.clone(),
            error: e,
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::ReadFailed {
                path: features.clone(),
                error: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

/// Default [`BundleScanner`] over the `<id>_<version>` naming convention.
///
/// Each subdirectory, or `*.jar` file, whose name (minus the extension)
/// splits at the last underscore into a non-empty id and version
/// contributes one `Ok` bundle. Anything else is skipped. Bundle ids
/// containing underscores followed by non-version text need a custom
/// scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl BundleScanner for DirectoryScanner {
    fn discover(&self, directory: &Path) -> Result<Vec<ResolvedBundle>> {
        let parent = ContainerIdentity::Directory {
            path: directory.display().to_string(),
        };

        let entries = fs::read_dir(directory).map_err(|e| Error::ReadFailed {
            path: directory.to_path_buf(),
            error: e,
        })?;

        let mut bundles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::ReadFailed {
                path: directory.to_path_buf(),
                error: e,
            })?;
            let path = entry.path();
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                tracing::debug!(path = %path.display(), "skipping entry with non-utf8 name");
                continue;
            };

            let candidate = if path.is_dir() {
                name
            } else if let Some(stem) = name.strip_suffix(".jar") {
                stem
            } else {
                tracing::debug!(%name, "skipping non-bundle entry");
                continue;
            };

            let Some((id, version)) = split_bundle_name(candidate) else {
                tracing::debug!(%name, "skipping entry without <id>_<version> name");
                continue;
            };

            let location = dunce::canonicalize(&path).unwrap_or(path);
            bundles.push(ResolvedBundle::new(
                id,
                version,
                location,
                parent.clone(),
                BundleStatus::Ok,
            ));
        }

        bundles.sort_by(|a, b| (a.id(), a.version()).cmp(&(b.id(), b.version())));
        Ok(bundles)
    }
}

/// Split a bundle entry name at the last underscore.
fn split_bundle_name(name: &str) -> Option<(&str, &str)> {
    let (id, version) = name.rsplit_once('_')?;
    if id.is_empty() || version.is_empty() {
        return None;
    }
    Some((id, version))
}
