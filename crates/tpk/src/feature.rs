// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! The feature bundle container: resolves the bundles of one feature
//! under an install home.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bundle::{BundleKey, ResolvedBundle};
use crate::cancel::CancelToken;
use crate::container::{BundleContainer, ContainerIdentity};
use crate::descriptor::FeatureDescriptor;
use crate::environment::TargetEnvironment;
use crate::select::select_feature_dir;
use crate::services::Services;
use crate::{Error, Result, FEATURE_DESCRIPTOR, PLUGINS_DIR};

#[cfg(test)]
#[path = "./feature_test.rs"]
mod feature_test;

/// Resolves the bundles belonging to one feature.
///
/// The container holds the raw home template and the feature reference; an
/// absent version means "most recent", selected by directory name (see
/// [`crate::select`]). Instances are immutable and safe to resolve
/// repeatedly or from multiple threads.
pub struct FeatureContainer {
    home: String,
    feature_id: String,
    feature_version: Option<String>,
    services: Arc<Services>,
}

impl FeatureContainer {
    pub fn new(
        home: impl Into<String>,
        feature_id: impl Into<String>,
        feature_version: Option<String>,
        services: Arc<Services>,
    ) -> Self {
        Self {
            home: home.into(),
            feature_id: feature_id.into(),
            feature_version,
            services,
        }
    }

    pub fn feature_id(&self) -> &str {
        &self.feature_id
    }

    pub fn feature_version(&self) -> Option<&str> {
        self.feature_version.as_deref()
    }

    fn expanded_home(&self) -> Result<PathBuf> {
        self.services
            .expander()
            .expand(&self.home)
            .map(PathBuf::from)
    }

    fn locate_feature_dir(&self, home: &Path) -> Result<PathBuf> {
        let candidates = self.services.feature_paths().feature_dirs(home)?;
        select_feature_dir(
            &candidates,
            home,
            &self.feature_id,
            self.feature_version.as_deref(),
        )
    }

    /// Parse the descriptor in `feature_dir` and check it against this
    /// container's reference.
    fn load_descriptor(&self, feature_dir: &Path) -> Result<FeatureDescriptor> {
        let path = feature_dir.join(FEATURE_DESCRIPTOR);
        if !path.is_file() {
            return Err(Error::InvalidDescriptor {
                path,
                reason: "descriptor file is missing".into(),
            });
        }

        let descriptor = self.services.descriptor_parser().parse(&path)?;
        if descriptor.id != self.feature_id {
            return Err(Error::InvalidDescriptor {
                path,
                reason: format!(
                    "descriptor id '{}' does not match feature '{}'",
                    descriptor.id, self.feature_id
                ),
            });
        }
        if let Some(requested) = &self.feature_version {
            if &descriptor.version != requested {
                return Err(Error::InvalidDescriptor {
                    path,
                    reason: format!(
                        "descriptor version '{}' does not match requested version '{requested}'",
                        descriptor.version
                    ),
                });
            }
        }
        Ok(descriptor)
    }

    /// The plugins directory sibling to the features directory, resolved
    /// from the selected feature directory (`<home>/plugins` for the
    /// standard layout).
    fn plugins_dir(&self, feature_dir: &Path, home: &Path) -> Result<PathBuf> {
        let install_root = feature_dir
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| home.to_path_buf());
        let plugins = install_root.join(PLUGINS_DIR);
        if !plugins.is_dir() {
            return Err(Error::PluginsDirMissing {
                feature_id: self.feature_id.clone(),
                path: plugins,
            });
        }
        Ok(plugins)
    }
}

impl BundleContainer for FeatureContainer {
    fn kind(&self) -> &'static str {
        "feature"
    }

    fn identity(&self) -> ContainerIdentity {
        ContainerIdentity::Feature {
            home: self.home.clone(),
            feature_id: self.feature_id.clone(),
            feature_version: self.feature_version.clone(),
        }
    }

    fn location(&self, resolve: bool) -> Result<String> {
        if resolve {
            self.services.expander().expand(&self.home)
        } else {
            Ok(self.home.clone())
        }
    }

    fn resolve_bundles(
        &self,
        environment: &TargetEnvironment,
        cancel: &CancelToken,
    ) -> Result<Vec<ResolvedBundle>> {
        if cancel.is_cancelled() {
            return Ok(Vec::new());
        }

        let home = self.expanded_home()?;
        tracing::debug!(
            home = %home.display(),
            feature = %self.feature_id,
            "resolving feature bundles"
        );

        let feature_dir = self.locate_feature_dir(&home)?;
        tracing::debug!(dir = %feature_dir.display(), "selected feature directory");

        let descriptor = self.load_descriptor(&feature_dir)?;
        if cancel.is_cancelled() {
            return Ok(Vec::new());
        }

        let plugins_dir = self.plugins_dir(&feature_dir, &home)?;
        let discovered = self.services.bundle_scanner().discover(&plugins_dir)?;
        if cancel.is_cancelled() {
            // Cancellation discards partial work.
            return Ok(Vec::new());
        }

        let platform = self.services.platform();
        let wanted: HashSet<BundleKey> = descriptor
            .plugins
            .iter()
            .filter(|entry| environment.matches_entry(entry, platform))
            .map(|entry| BundleKey {
                id: entry.id.clone(),
                version: entry.version.clone(),
            })
            .collect();

        let identity = self.identity();
        let bundles: Vec<ResolvedBundle> = discovered
            .iter()
            .filter(|bundle| wanted.contains(&bundle.key()))
            .map(|bundle| bundle.rebound_to(identity.clone()))
            .collect();

        tracing::debug!(
            discovered = discovered.len(),
            matching = wanted.len(),
            resolved = bundles.len(),
            "filtered feature bundles"
        );
        Ok(bundles)
    }
}
