// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Feature descriptor model and the `feature.xml` parser.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./descriptor_test.rs"]
mod descriptor_test;

/// Parsed contents of a feature descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDescriptor {
    /// Feature symbolic name.
    pub id: String,

    /// Feature version string.
    pub version: String,

    /// Optional human-readable name.
    pub label: Option<String>,

    /// Optional provider name.
    pub provider: Option<String>,

    /// Plugin entries in descriptor order.
    pub plugins: Vec<PluginEntry>,
}

/// One plugin listed by a feature descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginEntry {
    /// Plugin symbolic name.
    pub id: String,

    /// Plugin version string.
    pub version: String,

    /// Operating system constraint, unconstrained when absent.
    pub os: Option<String>,

    /// Windowing system constraint, unconstrained when absent.
    pub ws: Option<String>,

    /// Architecture constraint, unconstrained when absent.
    pub arch: Option<String>,

    /// Locale constraint, unconstrained when absent.
    pub nl: Option<String>,
}

/// Parses feature descriptor files.
///
/// The descriptor layout belongs to the parser implementation; the engine
/// only consumes the resulting [`FeatureDescriptor`].
pub trait DescriptorParser: Send + Sync {
    /// Parse the descriptor at `path`.
    fn parse(&self, path: &Path) -> Result<FeatureDescriptor>;
}

/// Default parser for the `feature.xml` descriptor format.
///
/// Reads `id`, `version`, `label`, and `provider-name` from the root
/// `<feature>` element and the plugin list from its direct `<plugin>`
/// children. Elements nested deeper (such as `<requires><import/>`) and
/// unknown attributes are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDescriptorParser;

impl DescriptorParser for XmlDescriptorParser {
    fn parse(&self, path: &Path) -> Result<FeatureDescriptor> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;

        parse_feature_xml(&content).map_err(|reason| Error::InvalidDescriptor {
            path: path.to_path_buf(),
            reason,
        })
    }
}

fn parse_feature_xml(content: &str) -> std::result::Result<FeatureDescriptor, String> {
    let mut reader = Reader::from_str(content);
    let mut depth = 0usize;
    let mut feature: Option<FeatureDescriptor> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                handle_element(&element, depth, &mut feature)?;
                depth += 1;
            }
            Ok(Event::Empty(element)) => handle_element(&element, depth, &mut feature)?,
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            // Text, comments, declarations and processing instructions
            // carry nothing the descriptor model needs.
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    feature.ok_or_else(|| "missing <feature> root element".to_string())
}

fn handle_element(
    element: &BytesStart<'_>,
    depth: usize,
    feature: &mut Option<FeatureDescriptor>,
) -> std::result::Result<(), String> {
    match (depth, element.name().as_ref()) {
        (0, b"feature") => *feature = Some(read_feature(element)?),
        (1, b"plugin") => {
            let entry = read_plugin(element)?;
            if let Some(feature) = feature {
                feature.plugins.push(entry);
            }
        }
        _ => {}
    }
    Ok(())
}

fn read_feature(element: &BytesStart<'_>) -> std::result::Result<FeatureDescriptor, String> {
    let mut id = None;
    let mut version = None;
    let mut label = None;
    let mut provider = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        match attr.key.as_ref() {
            b"id" => id = Some(value.into_owned()),
            b"version" => version = Some(value.into_owned()),
            b"label" => label = Some(value.into_owned()),
            b"provider-name" => provider = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(FeatureDescriptor {
        id: id.ok_or("feature element has no id")?,
        version: version.ok_or("feature element has no version")?,
        label,
        provider,
        plugins: Vec::new(),
    })
}

fn read_plugin(element: &BytesStart<'_>) -> std::result::Result<PluginEntry, String> {
    let mut id = None;
    let mut version = None;
    let mut os = None;
    let mut ws = None;
    let mut arch = None;
    let mut nl = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        match attr.key.as_ref() {
            b"id" => id = Some(value.into_owned()),
            b"version" => version = Some(value.into_owned()),
            b"os" => os = Some(value.into_owned()),
            b"ws" => ws = Some(value.into_owned()),
            b"arch" => arch = Some(value.into_owned()),
            b"nl" => nl = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(PluginEntry {
        id: id.ok_or("plugin entry has no id")?,
        version: version.ok_or("plugin entry has no version")?,
        os,
        ws,
        arch,
        nl,
    })
}
