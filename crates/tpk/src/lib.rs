// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! tpk - Target Platform Kit
//!
//! This crate resolves the installable bundles of a target platform from
//! bundle containers on disk.
//!
//! # Overview
//!
//! A target platform is described by bundle containers. A feature
//! container references a feature (an id and optional version) under an
//! install home laid out as `<home>/features/<id>_<version>/feature.xml`
//! plus `<home>/plugins/`; resolving it selects the feature directory,
//! parses the descriptor, filters its plugin entries against the target
//! environment (architecture, operating system, windowing system,
//! locale, with running-platform fallback), and yields the matching
//! bundles from the plugins directory. A directory container yields
//! everything in one directory. A target definition aggregates
//! containers and resolves them as a unit.
//!
//! Filesystem access, descriptor parsing, and variable expansion go
//! through the collaborator traits wired in [`Services`]; resolution is
//! cooperatively cancellable through [`CancelToken`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tpk::{BundleContainer, CancelToken, FeatureContainer, Services, TargetEnvironment};
//!
//! # fn main() -> tpk::Result<()> {
//! let services = Arc::new(Services::default());
//! let feature = FeatureContainer::new("~/sdk", "org.example.rcp", None, services);
//! let bundles =
//!     feature.resolve_bundles(&TargetEnvironment::unspecified(), &CancelToken::new())?;
//! for bundle in &bundles {
//!     println!("{} {}", bundle.id(), bundle.version());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cancel;
pub mod container;
pub mod descriptor;
pub mod directory;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod feature;
pub mod select;
pub mod services;
pub mod substitution;
pub mod target;

pub use bundle::{BundleKey, BundleStatus, ResolvedBundle};
pub use cancel::CancelToken;
pub use container::{BundleContainer, ContainerIdentity};
pub use descriptor::{DescriptorParser, FeatureDescriptor, PluginEntry, XmlDescriptorParser};
pub use directory::DirectoryContainer;
pub use discovery::{BundleScanner, DirectoryScanner, FeaturePathSource, FsFeaturePaths};
pub use environment::{RunningPlatform, TargetEnvironment};
pub use error::{Error, Result};
pub use feature::FeatureContainer;
pub use select::{compare_feature_dir_names, select_feature_dir};
pub use services::Services;
pub use substitution::{ShellExpander, VariableExpander};
pub use target::{ContainerError, TargetDefinition, TargetResolution};

/// Well-known filename of the feature descriptor.
pub const FEATURE_DESCRIPTOR: &str = "feature.xml";

/// Well-known directory of feature installs under a home.
pub const FEATURES_DIR: &str = "features";

/// Well-known directory of installable bundles under a home.
pub const PLUGINS_DIR: &str = "plugins";
