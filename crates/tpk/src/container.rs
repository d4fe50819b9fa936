// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! The bundle container contract shared by all resolver kinds.

use std::fmt;

use serde::Serialize;

use crate::bundle::ResolvedBundle;
use crate::cancel::CancelToken;
use crate::environment::TargetEnvironment;
use crate::Result;

#[cfg(test)]
#[path = "./container_test.rs"]
mod container_test;

/// Value identity of a bundle container.
///
/// Identity is content-based: two containers describe the same source iff
/// their identities are equal. Feature identity is the (home, id, version)
/// triple with the optional version compared null-safely, so an unversioned
/// container is never identical to a pinned one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContainerIdentity {
    /// A plain directory of bundles.
    Directory { path: String },

    /// The bundles of one feature under an install home.
    Feature {
        home: String,
        feature_id: String,
        feature_version: Option<String>,
    },
}

impl fmt::Display for ContainerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerIdentity::Directory { path } => write!(f, "directory {path}"),
            ContainerIdentity::Feature {
                home,
                feature_id,
                feature_version,
            } => match feature_version {
                Some(version) => write!(f, "feature {feature_id} {version} at {home}"),
                None => write!(f, "feature {feature_id} at {home}"),
            },
        }
    }
}

/// A source of resolved bundles for a target definition.
///
/// Containers are immutable after construction and hold no state across
/// calls; resolving the same instance repeatedly or concurrently is safe.
pub trait BundleContainer: Send + Sync {
    /// Short container kind for display (`"feature"`, `"directory"`).
    fn kind(&self) -> &'static str;

    /// This container's value identity.
    fn identity(&self) -> ContainerIdentity;

    /// The container location: the raw template, or the expanded form
    /// when `resolve` is set. Expansion may fail `InvalidLocation`.
    fn location(&self, resolve: bool) -> Result<String>;

    /// Resolve the bundles of this container for `environment`.
    ///
    /// A cancelled token yields an empty successful result. Every returned
    /// bundle is parented to this container's identity.
    fn resolve_bundles(
        &self,
        environment: &TargetEnvironment,
        cancel: &CancelToken,
    ) -> Result<Vec<ResolvedBundle>>;

    /// Whether `other` describes the same content as this container.
    fn is_content_equal(&self, other: &dyn BundleContainer) -> bool {
        self.identity() == other.identity()
    }
}
