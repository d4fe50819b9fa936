// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `tpk features` command.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use miette::Result;
use tpk::{
    DescriptorParser, FeaturePathSource, FsFeaturePaths, ShellExpander, VariableExpander,
    XmlDescriptorParser, FEATURE_DESCRIPTOR,
};

/// List the features installed under a home
#[derive(Debug, Args)]
pub struct CmdFeatures {
    /// Install home containing a 'features' directory (may use ~ and $VARS)
    home: String,

    /// Output format: table, yaml, json
    #[clap(long, default_value = "table")]
    format: String,
}

struct FeatureListing {
    directory: String,
    descriptor: Result<tpk::FeatureDescriptor, tpk::Error>,
}

impl CmdFeatures {
    pub async fn run(&mut self) -> Result<i32> {
        let home = PathBuf::from(ShellExpander.expand(&self.home)?);
        let dirs = FsFeaturePaths.feature_dirs(&home)?;

        let parser = XmlDescriptorParser;
        let listings: Vec<FeatureListing> = dirs
            .iter()
            .map(|dir| FeatureListing {
                directory: dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| dir.display().to_string()),
                descriptor: parser.parse(&dir.join(FEATURE_DESCRIPTOR)),
            })
            .collect();

        match self.format.as_str() {
            "yaml" => self.show_yaml(&listings)?,
            "json" => self.show_json(&listings)?,
            _ => self.show_table(&listings),
        }

        Ok(0)
    }

    fn show_table(&self, listings: &[FeatureListing]) {
        println!("{}", "Installed Features:".bold());
        println!();

        if listings.is_empty() {
            println!("  {}", "(no features)".dimmed());
        }

        for (i, listing) in listings.iter().enumerate() {
            match &listing.descriptor {
                Ok(descriptor) => {
                    println!(
                        "  {}. {} {}",
                        i + 1,
                        descriptor.id.cyan(),
                        descriptor.version.green()
                    );
                    if let Some(label) = &descriptor.label {
                        println!("     {}", label.dimmed());
                    }
                    println!(
                        "     {}",
                        format!("{} plugin(s)", descriptor.plugins.len()).dimmed()
                    );
                }
                Err(error) => {
                    println!("  {}. {} {}", i + 1, listing.directory.cyan(), "[invalid]".red());
                    println!("     {}", error.to_string().dimmed());
                }
            }
        }

        println!();
        println!("Total: {} feature(s)", listings.len());
    }

    fn report(&self, listings: &[FeatureListing]) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = listings
            .iter()
            .map(|listing| match &listing.descriptor {
                Ok(descriptor) => serde_json::json!({
                    "directory": listing.directory,
                    "id": descriptor.id,
                    "version": descriptor.version,
                    "label": descriptor.label,
                    "provider": descriptor.provider,
                    "plugins": descriptor.plugins.len(),
                }),
                Err(error) => serde_json::json!({
                    "directory": listing.directory,
                    "error": error.to_string(),
                }),
            })
            .collect();
        serde_json::json!({ "features": entries })
    }

    fn show_yaml(&self, listings: &[FeatureListing]) -> Result<()> {
        let yaml = serde_yaml::to_string(&self.report(listings))
            .map_err(|e| miette::miette!("Failed to render yaml: {e}"))?;
        print!("{yaml}");
        Ok(())
    }

    fn show_json(&self, listings: &[FeatureListing]) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.report(listings))
            .map_err(|e| miette::miette!("Failed to render json: {e}"))?;
        println!("{json}");
        Ok(())
    }
}
