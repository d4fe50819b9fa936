// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! tpk - Target Platform Kit CLI

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_features;
mod cmd_platform;
mod cmd_resolve;

use cmd_features::CmdFeatures;
use cmd_platform::CmdPlatform;
use cmd_resolve::CmdResolve;

#[derive(Parser)]
#[clap(
    name = "tpk",
    about = "Target Platform Kit",
    version,
    long_about = "Resolve the installable bundles of a target platform from features on disk"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve bundles for a target environment
    Resolve(CmdResolve),

    /// List the features installed under a home
    Features(CmdFeatures),

    /// Show the detected running platform
    Platform(CmdPlatform),
}

impl Opt {
    async fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .init();

        // Dispatch to command
        match self.cmd {
            Command::Resolve(mut cmd) => cmd.run().await,
            Command::Features(mut cmd) => cmd.run().await,
            Command::Platform(mut cmd) => cmd.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run().await?;
    std::process::exit(code);
}
