// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn write_descriptor(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(crate::FEATURE_DESCRIPTOR);
    std::fs::write(&path, content).expect("Failed to write descriptor");
    path
}

#[rstest]
fn test_parse_full_descriptor() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(
        &tmp,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feature
      id="org.example.rcp"
      version="3.5.0"
      label="Example RCP"
      provider-name="Example Corp">

   <description url="https://example.org">
      Rich client platform feature.
   </description>

   <plugin
         id="org.example.core"
         version="3.5.0"
         unpack="false"/>

   <plugin
         id="org.example.ui.win32"
         os="win32"
         ws="win32"
         arch="x86_64"
         version="3.5.0"
         fragment="true"/>
</feature>
"#,
    );

    let descriptor = XmlDescriptorParser
        .parse(&path)
        .expect("Should parse descriptor");

    assert_eq!(descriptor.id, "org.example.rcp");
    assert_eq!(descriptor.version, "3.5.0");
    assert_eq!(descriptor.label.as_deref(), Some("Example RCP"));
    assert_eq!(descriptor.provider.as_deref(), Some("Example Corp"));
    assert_eq!(descriptor.plugins.len(), 2);

    assert_eq!(descriptor.plugins[0].id, "org.example.core");
    assert_eq!(descriptor.plugins[0].os, None);

    assert_eq!(descriptor.plugins[1].id, "org.example.ui.win32");
    assert_eq!(descriptor.plugins[1].os.as_deref(), Some("win32"));
    assert_eq!(descriptor.plugins[1].ws.as_deref(), Some("win32"));
    assert_eq!(descriptor.plugins[1].arch.as_deref(), Some("x86_64"));
    assert_eq!(descriptor.plugins[1].nl, None);
}

#[rstest]
fn test_plugin_order_is_preserved() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(
        &tmp,
        r#"<feature id="f" version="1.0.0">
   <plugin id="b" version="1.0.0"/>
   <plugin id="a" version="1.0.0"/>
   <plugin id="c" version="1.0.0"/>
</feature>
"#,
    );

    let descriptor = XmlDescriptorParser
        .parse(&path)
        .expect("Should parse descriptor");
    let ids: Vec<&str> = descriptor.plugins.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[rstest]
fn test_nested_elements_are_not_plugins() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(
        &tmp,
        r#"<feature id="f" version="1.0.0">
   <requires>
      <import plugin="org.example.other" version="1.0.0"/>
      <plugin id="org.example.nested" version="9.9.9"/>
   </requires>
   <plugin id="org.example.real" version="1.0.0"/>
</feature>
"#,
    );

    let descriptor = XmlDescriptorParser
        .parse(&path)
        .expect("Should parse descriptor");

    // Only direct children of <feature> count.
    assert_eq!(descriptor.plugins.len(), 1);
    assert_eq!(descriptor.plugins[0].id, "org.example.real");
}

#[rstest]
fn test_feature_without_version_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(&tmp, r#"<feature id="f"></feature>"#);

    let result = XmlDescriptorParser.parse(&path);
    match result {
        Err(Error::InvalidDescriptor { reason, .. }) => {
            assert!(reason.contains("version"), "unexpected reason: {reason}");
        }
        other => panic!("Expected InvalidDescriptor, got: {:?}", other),
    }
}

#[rstest]
fn test_plugin_without_id_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(
        &tmp,
        r#"<feature id="f" version="1.0.0">
   <plugin version="1.0.0"/>
</feature>
"#,
    );

    let result = XmlDescriptorParser.parse(&path);
    assert!(matches!(result, Err(Error::InvalidDescriptor { .. })));
}

#[rstest]
fn test_malformed_xml_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(&tmp, r#"<feature id="f" version="1.0.0"><plugin"#);

    let result = XmlDescriptorParser.parse(&path);
    assert!(matches!(result, Err(Error::InvalidDescriptor { .. })));
}

#[rstest]
fn test_wrong_root_element_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(&tmp, r#"<fragment id="f" version="1.0.0"></fragment>"#);

    let result = XmlDescriptorParser.parse(&path);
    match result {
        Err(Error::InvalidDescriptor { reason, .. }) => {
            assert!(reason.contains("feature"), "unexpected reason: {reason}");
        }
        other => panic!("Expected InvalidDescriptor, got: {:?}", other),
    }
}

#[rstest]
fn test_missing_file_is_read_failure() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(crate::FEATURE_DESCRIPTOR);

    let result = XmlDescriptorParser.parse(&path);
    assert!(matches!(result, Err(Error::ReadFailed { .. })));
}

#[rstest]
fn test_escaped_attribute_values() {
    let tmp = TempDir::new().unwrap();
    let path = write_descriptor(
        &tmp,
        r#"<feature id="f" version="1.0.0" label="Tools &amp; Platform">
   <plugin id="p" version="1.0.0"/>
</feature>
"#,
    );

    let descriptor = XmlDescriptorParser
        .parse(&path)
        .expect("Should parse descriptor");
    assert_eq!(descriptor.label.as_deref(), Some("Tools & Platform"));
}
