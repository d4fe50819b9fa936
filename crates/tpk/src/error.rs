// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for tpk operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with tpk Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving bundle containers.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// No feature directories under the install home
    #[error("No features found at {path:?}")]
    #[diagnostic(
        code(tpk::no_features),
        help("Check that the home location points at an install root with a 'features' directory")
    )]
    NoFeatures { path: PathBuf },

    /// No feature directory matches the requested id/version
    #[error("Unable to locate feature {id}{}", version_suffix(.version))]
    #[diagnostic(
        code(tpk::feature_not_found),
        help("Feature directories are named '<id>_<version>'")
    )]
    FeatureNotFound {
        id: String,
        version: Option<String>,
    },

    /// Sibling plugins directory of the feature is absent
    #[error("The plugins directory for feature {feature_id} does not exist: {path:?}")]
    #[diagnostic(code(tpk::plugins_dir_missing))]
    PluginsDirMissing { feature_id: String, path: PathBuf },

    /// Directory container path is not a directory
    #[error("Bundle directory does not exist: {path:?}")]
    #[diagnostic(code(tpk::directory_not_found))]
    DirectoryNotFound { path: PathBuf },

    /// Location template could not be expanded
    #[error("Invalid location '{template}': {reason}")]
    #[diagnostic(
        code(tpk::invalid_location),
        help("Variables in the location must resolve in the current environment")
    )]
    InvalidLocation { template: String, reason: String },

    /// Feature descriptor missing, unparsable, or contradicting the container
    #[error("Invalid feature descriptor {path:?}: {reason}")]
    #[diagnostic(code(tpk::invalid_descriptor))]
    InvalidDescriptor { path: PathBuf, reason: String },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(tpk::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(tpk::io_error))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error belongs to the not-found class (missing feature
    /// directories, no version match, missing plugins directory).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NoFeatures { .. }
                | Error::FeatureNotFound { .. }
                | Error::PluginsDirMissing { .. }
                | Error::DirectoryNotFound { .. }
        )
    }
}

fn version_suffix(version: &Option<String>) -> String {
    match version {
        Some(v) => format!(" {v}"),
        None => String::new(),
    }
}
