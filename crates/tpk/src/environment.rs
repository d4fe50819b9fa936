// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Target environment model and the per-axis constraint matcher.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::descriptor::PluginEntry;

#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;

/// Host platform values, detected once per process.
static CURRENT_PLATFORM: Lazy<RunningPlatform> = Lazy::new(RunningPlatform::detect);

/// The platform a resolution targets.
///
/// Each axis is optional; an unspecified axis falls back to the running
/// platform when a plugin entry constrains it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetEnvironment {
    /// Target processor architecture (e.g. `x86_64`, `aarch64`).
    pub arch: Option<String>,

    /// Target operating system (e.g. `linux`, `windows`, `macos`).
    pub os: Option<String>,

    /// Target windowing system (e.g. `gtk`, `win32`, `cocoa`).
    pub ws: Option<String>,

    /// Target locale (e.g. `en_US`).
    pub nl: Option<String>,
}

impl TargetEnvironment {
    /// An environment with every axis unspecified.
    pub fn unspecified() -> Self {
        Self::default()
    }

    /// Whether a plugin entry passes all four axes against this
    /// environment, with `running` supplying the fallback values.
    pub fn matches_entry(&self, entry: &PluginEntry, running: &RunningPlatform) -> bool {
        axis_matches(self.arch.as_deref(), entry.arch.as_deref(), &running.arch)
            && axis_matches(self.os.as_deref(), entry.os.as_deref(), &running.os)
            && axis_matches(self.ws.as_deref(), entry.ws.as_deref(), &running.ws)
            && axis_matches(self.nl.as_deref(), entry.nl.as_deref(), &running.nl)
    }
}

/// Concrete environment values of the host, used as matcher fallback when
/// the target leaves an axis unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningPlatform {
    pub arch: String,
    pub os: String,
    pub ws: String,
    pub nl: String,
}

impl RunningPlatform {
    /// The detected host platform (cached for the process lifetime).
    pub fn current() -> Self {
        CURRENT_PLATFORM.clone()
    }

    fn detect() -> Self {
        let os = std::env::consts::OS.to_string();
        let ws = default_ws(&os).to_string();
        Self {
            arch: std::env::consts::ARCH.to_string(),
            os,
            ws,
            nl: detect_nl(),
        }
    }
}

/// Conventional windowing system for an operating system value.
pub fn default_ws(os: &str) -> &'static str {
    match os {
        "windows" => "win32",
        "macos" => "cocoa",
        _ => "gtk",
    }
}

/// Locale of the current process from `LC_ALL`/`LANG`, with encoding and
/// modifier suffixes stripped (`en_US.UTF-8` becomes `en_US`).
fn detect_nl() -> String {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .ok()
        .map(|raw| normalize_nl(&raw))
        .filter(|nl| !nl.is_empty() && nl != "C" && nl != "POSIX")
        .unwrap_or_else(|| "en_US".to_string())
}

fn normalize_nl(raw: &str) -> String {
    let stripped = raw.split(['.', '@']).next().unwrap_or(raw);
    stripped.trim().to_string()
}

/// Whether one environment axis of a plugin entry is satisfied.
///
/// `entry` is the constraint from the descriptor, `target` the requested
/// value, `running` the host value used when the target is unspecified:
/// - no constraint always matches,
/// - a constraint against an unspecified target matches the running value,
/// - otherwise the target value must equal the constraint exactly
///   (case-sensitive, no aliasing).
pub fn axis_matches(target: Option<&str>, entry: Option<&str>, running: &str) -> bool {
    match (target, entry) {
        (_, None) => true,
        (None, Some(entry)) => entry == running,
        (Some(target), Some(entry)) => target == entry,
    }
}
