// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Variable substitution for location templates.

use crate::{Error, Result};

#[cfg(test)]
#[path = "./substitution_test.rs"]
mod substitution_test;

/// Expands substitution variables in a location template.
///
/// Container homes are stored as templates so a target definition can move
/// between machines; every template is expanded to a concrete path before
/// any filesystem access.
pub trait VariableExpander: Send + Sync {
    /// Expand `template` to a concrete location string.
    fn expand(&self, template: &str) -> Result<String>;
}

/// Default expander supporting `~`, `$VAR`, and `${VAR}` from the process
/// environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExpander;

impl VariableExpander for ShellExpander {
    fn expand(&self, template: &str) -> Result<String> {
        shellexpand::full(template)
            .map(|expanded| expanded.into_owned())
            .map_err(|e| Error::InvalidLocation {
                template: template.to_string(),
                reason: e.to_string(),
            })
    }
}
