// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Resolved bundle values produced by container resolution.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::container::ContainerIdentity;

#[cfg(test)]
#[path = "./bundle_test.rs"]
mod bundle_test;

/// Per-bundle resolution status.
///
/// A bundle carrying an `Error` status still appears in resolution output;
/// the status records what is wrong with it without failing the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BundleStatus {
    Ok,
    Error { message: String },
}

/// Identity of a bundle independent of where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BundleKey {
    pub id: String,
    pub version: String,
}

/// A bundle resolved from a container.
///
/// Bundles are immutable: the parent identity is fixed at construction, and
/// adopting a bundle into another container means building a new value with
/// [`ResolvedBundle::rebound_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBundle {
    id: String,
    version: String,
    location: PathBuf,
    parent: ContainerIdentity,
    status: BundleStatus,
}

impl ResolvedBundle {
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
        location: impl Into<PathBuf>,
        parent: ContainerIdentity,
        status: BundleStatus,
    ) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            location: location.into(),
            parent,
            status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// On-disk location of the bundle, a directory or a jar file.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Identity of the container this bundle was resolved for.
    pub fn parent(&self) -> &ContainerIdentity {
        &self.parent
    }

    pub fn status(&self) -> &BundleStatus {
        &self.status
    }

    pub fn key(&self) -> BundleKey {
        BundleKey {
            id: self.id.clone(),
            version: self.version.clone(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, BundleStatus::Ok)
    }

    /// A copy of this bundle parented to `parent` instead.
    pub fn rebound_to(&self, parent: ContainerIdentity) -> Self {
        Self {
            parent,
            ..self.clone()
        }
    }
}
