// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `tpk platform` command.

use clap::Args;
use colored::Colorize;
use miette::Result;
use tpk::RunningPlatform;

/// Show the detected running platform
#[derive(Debug, Args)]
pub struct CmdPlatform {
    /// Output format: table, yaml, json
    #[clap(long, default_value = "table")]
    format: String,
}

impl CmdPlatform {
    pub async fn run(&mut self) -> Result<i32> {
        let platform = RunningPlatform::current();

        match self.format.as_str() {
            "yaml" => {
                let yaml = serde_yaml::to_string(&platform)
                    .map_err(|e| miette::miette!("Failed to render yaml: {e}"))?;
                print!("{yaml}");
            }
            "json" => {
                let json = serde_json::to_string_pretty(&platform)
                    .map_err(|e| miette::miette!("Failed to render json: {e}"))?;
                println!("{json}");
            }
            _ => {
                println!("{}", "Running Platform:".bold());
                println!();
                println!("  arch: {}", platform.arch.cyan());
                println!("  os:   {}", platform.os.cyan());
                println!("  ws:   {}", platform.ws.cyan());
                println!("  nl:   {}", platform.nl.cyan());
            }
        }

        Ok(0)
    }
}
