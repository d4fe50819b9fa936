// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Plain directory-backed bundle container.

use std::path::PathBuf;
use std::sync::Arc;

use crate::bundle::ResolvedBundle;
use crate::cancel::CancelToken;
use crate::container::{BundleContainer, ContainerIdentity};
use crate::environment::TargetEnvironment;
use crate::services::Services;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./directory_test.rs"]
mod directory_test;

/// Resolves every bundle found directly in one directory.
///
/// Unlike [`crate::feature::FeatureContainer`] this applies no environment
/// filtering; the directory contents are returned as-is.
pub struct DirectoryContainer {
    path: String,
    services: Arc<Services>,
}

impl DirectoryContainer {
    pub fn new(path: impl Into<String>, services: Arc<Services>) -> Self {
        Self {
            path: path.into(),
            services,
        }
    }

    fn expanded_path(&self) -> Result<PathBuf> {
        self.services
            .expander()
            .expand(&self.path)
            .map(PathBuf::from)
    }
}

impl BundleContainer for DirectoryContainer {
    fn kind(&self) -> &'static str {
        "directory"
    }

    fn identity(&self) -> ContainerIdentity {
        ContainerIdentity::Directory {
            path: self.path.clone(),
        }
    }

    fn location(&self, resolve: bool) -> Result<String> {
        if resolve {
            self.services.expander().expand(&self.path)
        } else {
            Ok(self.path.clone())
        }
    }

    fn resolve_bundles(
        &self,
        _environment: &TargetEnvironment,
        cancel: &CancelToken,
    ) -> Result<Vec<ResolvedBundle>> {
        if cancel.is_cancelled() {
            return Ok(Vec::new());
        }

        let path = self.expanded_path()?;
        if !path.is_dir() {
            return Err(Error::DirectoryNotFound { path });
        }

        let discovered = self.services.bundle_scanner().discover(&path)?;
        if cancel.is_cancelled() {
            return Ok(Vec::new());
        }

        let identity = self.identity();
        tracing::debug!(
            path = %path.display(),
            count = discovered.len(),
            "resolved directory bundles"
        );
        Ok(discovered
            .iter()
            .map(|bundle| bundle.rebound_to(identity.clone()))
            .collect())
    }
}
