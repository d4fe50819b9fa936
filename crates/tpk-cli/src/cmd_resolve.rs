// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `tpk resolve` command.

use std::sync::Arc;

use clap::Args;
use colored::Colorize;
use miette::Result;
use tpk::{
    BundleStatus, CancelToken, DirectoryContainer, FeatureContainer, Services, TargetDefinition,
    TargetEnvironment, TargetResolution,
};

#[cfg(test)]
#[path = "./cmd_resolve_test.rs"]
mod cmd_resolve_test;

/// Resolve bundles for a target environment
#[derive(Debug, Args)]
pub struct CmdResolve {
    /// Install home containing 'features' and 'plugins' (may use ~ and $VARS)
    home: String,

    /// Feature to resolve, as <id> or <id>/<version> (repeatable)
    #[clap(short = 'f', long = "feature")]
    features: Vec<String>,

    /// Additional bundle directory to include as-is (repeatable)
    #[clap(short = 'd', long = "directory")]
    directories: Vec<String>,

    /// Target architecture (defaults to the running platform on demand)
    #[clap(long)]
    arch: Option<String>,

    /// Target operating system
    #[clap(long)]
    os: Option<String>,

    /// Target windowing system
    #[clap(long)]
    ws: Option<String>,

    /// Target locale
    #[clap(long)]
    nl: Option<String>,

    /// Output format: table, yaml, json
    #[clap(long, default_value = "table")]
    format: String,
}

/// Errors building a target from command-line arguments.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
enum ArgError {
    #[error("Invalid feature reference '{value}'")]
    #[diagnostic(
        code(tpk_cli::invalid_feature_ref),
        help("Write features as <id> or <id>/<version>, e.g. org.example.rcp/1.0.0")
    )]
    InvalidFeatureRef { value: String },

    #[error("Nothing to resolve")]
    #[diagnostic(
        code(tpk_cli::empty_target),
        help("Pass at least one --feature or --directory")
    )]
    EmptyTarget,
}

impl CmdResolve {
    pub async fn run(&mut self) -> Result<i32> {
        if self.features.is_empty() && self.directories.is_empty() {
            return Err(ArgError::EmptyTarget.into());
        }

        let services = Arc::new(Services::default());
        let mut target = TargetDefinition::new();
        for reference in &self.features {
            let (id, version) = parse_feature_ref(reference)?;
            let container = FeatureContainer::new(self.home.clone(), id, version, services.clone());
            if !target.add_container(Box::new(container)) {
                tracing::warn!(%reference, "ignoring duplicate feature");
            }
        }
        for directory in &self.directories {
            let container = DirectoryContainer::new(directory.clone(), services.clone());
            if !target.add_container(Box::new(container)) {
                tracing::warn!(%directory, "ignoring duplicate directory");
            }
        }

        let environment = TargetEnvironment {
            arch: self.arch.clone(),
            os: self.os.clone(),
            ws: self.ws.clone(),
            nl: self.nl.clone(),
        };

        // Resolution is synchronous filesystem work: run it on a blocking
        // thread and let Ctrl-C trip the token cooperatively.
        let cancel = CancelToken::new();
        let signal_token = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal_token.cancel();
            }
        });

        let resolution =
            tokio::task::spawn_blocking(move || target.resolve(&environment, &cancel))
                .await
                .map_err(|e| miette::miette!("Resolution task failed: {e}"))?;

        match self.format.as_str() {
            "yaml" => self.show_yaml(&resolution)?,
            "json" => self.show_json(&resolution)?,
            _ => self.show_table(&resolution),
        }

        Ok(if resolution.is_ok() { 0 } else { 1 })
    }

    fn show_table(&self, resolution: &TargetResolution) {
        println!("{}", "Resolved Bundles:".bold());
        println!();

        if resolution.bundles.is_empty() {
            println!("  {}", "(no bundles)".dimmed());
        } else {
            for (i, bundle) in resolution.bundles.iter().enumerate() {
                let status = match bundle.status() {
                    BundleStatus::Ok => "ok".green(),
                    BundleStatus::Error { .. } => "error".red(),
                };
                println!(
                    "  {}. {} {} [{}]",
                    i + 1,
                    bundle.id().cyan(),
                    bundle.version(),
                    status
                );
                println!("     {}", bundle.location().display().to_string().dimmed());
                if let BundleStatus::Error { message } = bundle.status() {
                    println!("     {}", message.red());
                }
            }
        }

        println!();
        println!("Total: {} bundle(s)", resolution.bundles.len());

        if !resolution.errors.is_empty() {
            println!();
            println!("{}", "Errors:".bold().red());
            println!();
            for error in &resolution.errors {
                println!("  - {error}");
            }
        }
    }

    fn report(&self, resolution: &TargetResolution) -> serde_json::Value {
        serde_json::json!({
            "bundles": resolution.bundles,
            "errors": resolution
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        })
    }

    fn show_yaml(&self, resolution: &TargetResolution) -> Result<()> {
        let yaml = serde_yaml::to_string(&self.report(resolution))
            .map_err(|e| miette::miette!("Failed to render yaml: {e}"))?;
        print!("{yaml}");
        Ok(())
    }

    fn show_json(&self, resolution: &TargetResolution) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.report(resolution))
            .map_err(|e| miette::miette!("Failed to render json: {e}"))?;
        println!("{json}");
        Ok(())
    }
}

/// Split a `<id>` or `<id>/<version>` feature reference.
fn parse_feature_ref(value: &str) -> Result<(String, Option<String>), ArgError> {
    let (id, version) = match value.split_once('/') {
        None => (value, None),
        Some((id, version)) => (id, Some(version)),
    };
    if id.is_empty() || version.is_some_and(|v| v.is_empty() || v.contains('/')) {
        return Err(ArgError::InvalidFeatureRef {
            value: value.to_string(),
        });
    }
    Ok((id.to_string(), version.map(String::from)))
}
