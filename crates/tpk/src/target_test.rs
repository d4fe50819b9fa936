// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::directory::DirectoryContainer;
use crate::feature::FeatureContainer;
use crate::services::Services;

fn services() -> Arc<Services> {
    Arc::new(Services::new())
}

fn directory(path: &str) -> Box<DirectoryContainer> {
    Box::new(DirectoryContainer::new(path, services()))
}

#[rstest]
fn test_add_container_refuses_content_equal_duplicates() {
    let mut target = TargetDefinition::new();

    assert!(target.add_container(directory("/opt/sdk/plugins")));
    assert!(!target.add_container(directory("/opt/sdk/plugins")));
    assert!(target.add_container(directory("/opt/other/plugins")));
    assert_eq!(target.containers().len(), 2);
}

#[rstest]
fn test_containers_of_different_kinds_coexist() {
    let mut target = TargetDefinition::new();

    assert!(target.add_container(directory("/opt/sdk")));
    assert!(target.add_container(Box::new(FeatureContainer::new(
        "/opt/sdk",
        "org.example.rcp",
        None,
        services(),
    ))));
    assert_eq!(target.containers().len(), 2);
}

#[rstest]
fn test_resolve_collects_bundles_and_errors() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("org.example.core_1.2.0")).unwrap();
    let missing = root.path().join("no-such-dir");

    let mut target = TargetDefinition::new();
    target.add_container(directory(&root.path().display().to_string()));
    target.add_container(directory(&missing.display().to_string()));

    let resolution = target.resolve(&TargetEnvironment::unspecified(), &CancelToken::new());

    // One broken container does not hide the healthy one.
    assert!(!resolution.is_ok());
    assert_eq!(resolution.bundles.len(), 1);
    assert_eq!(resolution.bundles[0].id(), "org.example.core");
    assert_eq!(resolution.errors.len(), 1);
    assert!(matches!(
        resolution.errors[0].error,
        Error::DirectoryNotFound { .. }
    ));
}

#[rstest]
fn test_resolve_without_failures_is_ok() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("org.example.core_1.2.0")).unwrap();

    let mut target = TargetDefinition::new();
    target.add_container(directory(&root.path().display().to_string()));

    let resolution = target.resolve(&TargetEnvironment::unspecified(), &CancelToken::new());

    assert!(resolution.is_ok());
    assert_eq!(resolution.bundles.len(), 1);
}

#[rstest]
fn test_cancelled_resolution_is_empty_and_ok() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("org.example.core_1.2.0")).unwrap();

    let mut target = TargetDefinition::new();
    target.add_container(directory(&root.path().display().to_string()));

    let cancel = CancelToken::new();
    cancel.cancel();
    let resolution = target.resolve(&TargetEnvironment::unspecified(), &cancel);

    assert!(resolution.is_ok());
    assert!(resolution.bundles.is_empty());
}

#[rstest]
fn test_container_error_display_names_the_container() {
    let mut target = TargetDefinition::new();
    target.add_container(directory("/opt/missing/plugins"));

    let resolution = target.resolve(&TargetEnvironment::unspecified(), &CancelToken::new());
    let rendered = resolution.errors[0].to_string();

    assert!(rendered.contains("directory /opt/missing/plugins"));
    assert!(rendered.contains("does not exist"));
}
