// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

#[rstest]
fn test_scanner_reads_directories_and_jars() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("org.example.core_1.2.0")).unwrap();
    fs::write(root.path().join("org.example.ui_2.0.0.jar"), "jar").unwrap();

    let bundles = DirectoryScanner
        .discover(root.path())
        .expect("Should scan the directory");

    assert_eq!(bundles.len(), 2);
    assert_eq!(bundles[0].id(), "org.example.core");
    assert_eq!(bundles[0].version(), "1.2.0");
    assert_eq!(bundles[1].id(), "org.example.ui");
    assert_eq!(bundles[1].version(), "2.0.0");
    assert!(bundles.iter().all(|b| b.is_ok()));
}

#[rstest]
fn test_scanner_skips_entries_without_bundle_names() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("org.example.core_1.2.0")).unwrap();
    fs::create_dir(root.path().join("no-version-here")).unwrap();
    fs::write(root.path().join("README.txt"), "not a bundle").unwrap();
    fs::write(root.path().join("_1.0.0.jar"), "no id").unwrap();

    let bundles = DirectoryScanner
        .discover(root.path())
        .expect("Should scan the directory");

    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].id(), "org.example.core");
}

#[rstest]
fn test_scanner_sorts_by_id_then_version() {
    let root = TempDir::new().unwrap();
    for name in ["b_2.0.0", "a_1.1.0", "b_1.0.0", "a_1.0.0"] {
        fs::create_dir(root.path().join(name)).unwrap();
    }

    let bundles = DirectoryScanner
        .discover(root.path())
        .expect("Should scan the directory");
    let seen: Vec<_> = bundles
        .iter()
        .map(|b| format!("{}_{}", b.id(), b.version()))
        .collect();

    assert_eq!(seen, vec!["a_1.0.0", "a_1.1.0", "b_1.0.0", "b_2.0.0"]);
}

#[rstest]
fn test_scanner_parents_bundles_to_the_scanned_directory() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("org.example.core_1.2.0")).unwrap();

    let bundles = DirectoryScanner
        .discover(root.path())
        .expect("Should scan the directory");

    let expected = ContainerIdentity::Directory {
        path: root.path().display().to_string(),
    };
    assert_eq!(bundles[0].parent(), &expected);
    assert_eq!(
        bundles[0].location().file_name().unwrap(),
        "org.example.core_1.2.0"
    );
}

#[rstest]
fn test_scanner_fails_on_missing_directory() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("no-such-dir");

    let result = DirectoryScanner.discover(&missing);
    match result {
        Err(Error::ReadFailed { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected ReadFailed, got: {:?}", other),
    }
}

#[rstest]
fn test_bundle_names_split_at_the_last_underscore() {
    assert_eq!(
        split_bundle_name("org.example.core_1.2.0"),
        Some(("org.example.core", "1.2.0"))
    );
    assert_eq!(
        split_bundle_name("snake_case_id_1.0.0"),
        Some(("snake_case_id", "1.0.0"))
    );
    assert_eq!(split_bundle_name("noversion"), None);
    assert_eq!(split_bundle_name("trailing_"), None);
    assert_eq!(split_bundle_name("_1.0.0"), None);
}

#[rstest]
fn test_feature_paths_lists_directories_sorted() {
    let home = TempDir::new().unwrap();
    let features = home.path().join("features");
    fs::create_dir(&features).unwrap();
    fs::create_dir(features.join("org.b.feature_1.0.0")).unwrap();
    fs::create_dir(features.join("org.a.feature_1.0.0")).unwrap();
    fs::write(features.join("stray.txt"), "not a feature").unwrap();

    let dirs = FsFeaturePaths
        .feature_dirs(home.path())
        .expect("Should list feature directories");

    assert_eq!(dirs.len(), 2);
    assert_eq!(dirs[0].file_name().unwrap(), "org.a.feature_1.0.0");
    assert_eq!(dirs[1].file_name().unwrap(), "org.b.feature_1.0.0");
}

#[rstest]
fn test_feature_paths_yield_empty_without_features_dir() {
    let home = TempDir::new().unwrap();

    let dirs = FsFeaturePaths
        .feature_dirs(home.path())
        .expect("Should succeed with no features directory");
    assert!(dirs.is_empty());
}
