// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Selection of one feature install directory from a candidate list.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::{Error, FEATURES_DIR, Result};

#[cfg(test)]
#[path = "./select_test.rs"]
mod select_test;

/// Ordering of feature directory names used to pick the "most recent"
/// version when none is requested.
///
/// This is raw ordinal string comparison on the `<id>_<version>` directory
/// name, a naming convention rather than semantic versioning. Multi-digit
/// segments are misordered: `foo_1.9.0` sorts after `foo_1.10.0`. Swapping
/// this function for a semantic comparison changes the selection rule
/// without touching resolver logic.
pub fn compare_feature_dir_names(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Select the feature install directory for `id` from `candidates`.
///
/// With a requested version only the directory named exactly
/// `<id>_<version>` matches. Without one, the candidate with the greatest
/// name per [`compare_feature_dir_names`] among those prefixed `<id>_`
/// wins. `home` is only used for error context.
pub fn select_feature_dir(
    candidates: &[PathBuf],
    home: &Path,
    id: &str,
    version: Option<&str>,
) -> Result<PathBuf> {
    if candidates.is_empty() {
        return Err(Error::NoFeatures {
            path: home.join(FEATURES_DIR),
        });
    }

    if let Some(version) = version {
        let wanted = format!("{id}_{version}");
        return candidates
            .iter()
            .find(|path| dir_name(path) == Some(wanted.as_str()))
            .cloned()
            .ok_or_else(|| Error::FeatureNotFound {
                id: id.to_string(),
                version: Some(version.to_string()),
            });
    }

    let prefix = format!("{id}_");
    candidates
        .iter()
        .filter(|path| dir_name(path).is_some_and(|name| name.starts_with(&prefix)))
        .max_by(|a, b| {
            compare_feature_dir_names(
                dir_name(a).unwrap_or_default(),
                dir_name(b).unwrap_or_default(),
            )
        })
        .cloned()
        .ok_or_else(|| Error::FeatureNotFound {
            id: id.to_string(),
            version: None,
        })
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}
