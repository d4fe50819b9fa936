// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Target definitions: an ordered set of bundle containers resolved as
//! one unit.

use std::fmt;

use crate::bundle::ResolvedBundle;
use crate::cancel::CancelToken;
use crate::container::{BundleContainer, ContainerIdentity};
use crate::environment::TargetEnvironment;
use crate::Error;

#[cfg(test)]
#[path = "./target_test.rs"]
mod target_test;

/// A failure of one container within a target resolution.
#[derive(Debug)]
pub struct ContainerError {
    pub container: ContainerIdentity,
    pub error: Error,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.container, self.error)
    }
}

/// The outcome of resolving a target definition.
///
/// Bundles from succeeding containers are collected alongside the errors
/// of failing ones; one broken container does not hide the rest.
#[derive(Debug, Default)]
pub struct TargetResolution {
    pub bundles: Vec<ResolvedBundle>,
    pub errors: Vec<ContainerError>,
}

impl TargetResolution {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An ordered collection of bundle containers, deduplicated by content
/// equality.
#[derive(Default)]
pub struct TargetDefinition {
    containers: Vec<Box<dyn BundleContainer>>,
}

impl TargetDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container, refusing one content-equal to a container already
    /// present. Returns whether the container was added.
    pub fn add_container(&mut self, container: Box<dyn BundleContainer>) -> bool {
        if self
            .containers
            .iter()
            .any(|existing| existing.is_content_equal(container.as_ref()))
        {
            tracing::debug!(identity = %container.identity(), "ignoring duplicate container");
            return false;
        }
        self.containers.push(container);
        true
    }

    pub fn containers(&self) -> &[Box<dyn BundleContainer>] {
        &self.containers
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Resolve every container for `environment`.
    ///
    /// The token is re-checked between containers; once cancellation is
    /// observed the whole resolution is discarded and an empty outcome
    /// returned, matching the per-container contract.
    pub fn resolve(
        &self,
        environment: &TargetEnvironment,
        cancel: &CancelToken,
    ) -> TargetResolution {
        let mut resolution = TargetResolution::default();
        for container in &self.containers {
            if cancel.is_cancelled() {
                return TargetResolution::default();
            }
            match container.resolve_bundles(environment, cancel) {
                Ok(bundles) => resolution.bundles.extend(bundles),
                Err(error) => {
                    let identity = container.identity();
                    tracing::debug!(container = %identity, %error, "container failed to resolve");
                    resolution.errors.push(ContainerError {
                        container: identity,
                        error,
                    });
                }
            }
        }
        resolution
    }
}
