// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Collaborator wiring for bundle containers.

use crate::descriptor::{DescriptorParser, XmlDescriptorParser};
use crate::discovery::{BundleScanner, DirectoryScanner, FeaturePathSource, FsFeaturePaths};
use crate::environment::RunningPlatform;
use crate::substitution::{ShellExpander, VariableExpander};

/// The collaborators a container resolves through.
///
/// Containers receive a shared `Arc<Services>` at construction instead of
/// reaching into process-wide state. [`Services::default`] wires the
/// shipped implementations; tests swap in doubles through the `with_*`
/// builders.
pub struct Services {
    expander: Box<dyn VariableExpander>,
    feature_paths: Box<dyn FeaturePathSource>,
    descriptor_parser: Box<dyn DescriptorParser>,
    bundle_scanner: Box<dyn BundleScanner>,
    platform: RunningPlatform,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            expander: Box::new(ShellExpander),
            feature_paths: Box::new(FsFeaturePaths),
            descriptor_parser: Box::new(XmlDescriptorParser),
            bundle_scanner: Box::new(DirectoryScanner),
            platform: RunningPlatform::current(),
        }
    }
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expander(mut self, expander: impl VariableExpander + 'static) -> Self {
        self.expander = Box::new(expander);
        self
    }

    pub fn with_feature_paths(mut self, paths: impl FeaturePathSource + 'static) -> Self {
        self.feature_paths = Box::new(paths);
        self
    }

    pub fn with_descriptor_parser(mut self, parser: impl DescriptorParser + 'static) -> Self {
        self.descriptor_parser = Box::new(parser);
        self
    }

    pub fn with_bundle_scanner(mut self, scanner: impl BundleScanner + 'static) -> Self {
        self.bundle_scanner = Box::new(scanner);
        self
    }

    /// Override the running platform used as the matcher fallback.
    pub fn with_platform(mut self, platform: RunningPlatform) -> Self {
        self.platform = platform;
        self
    }

    pub fn expander(&self) -> &dyn VariableExpander {
        self.expander.as_ref()
    }

    pub fn feature_paths(&self) -> &dyn FeaturePathSource {
        self.feature_paths.as_ref()
    }

    pub fn descriptor_parser(&self) -> &dyn DescriptorParser {
        self.descriptor_parser.as_ref()
    }

    pub fn bundle_scanner(&self) -> &dyn BundleScanner {
        self.bundle_scanner.as_ref()
    }

    pub fn platform(&self) -> &RunningPlatform {
        &self.platform
    }
}
