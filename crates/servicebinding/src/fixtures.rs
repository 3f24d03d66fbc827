// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Binding directory layouts shared by the unit tests.

use std::path::{Path, PathBuf};

use crate::METADATA_FILENAME;

/// Write `content` followed by a line break, creating parent directories.
pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create binding directory");
    }
    std::fs::write(path, format!("{content}\n")).expect("Failed to write property file");
}

/// Write a binding directory `name` containing the given files.
pub fn write_binding(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let binding = root.join(name);
    std::fs::create_dir_all(&binding).expect("Failed to create binding directory");
    for (file, content) in files {
        write(&binding.join(file), content);
    }
    binding
}

/// A metadata binding whose domains are spliced from a container file and
/// which has no `type` property.
pub fn data_xsuaa_binding(root: &Path) -> PathBuf {
    write_binding(
        root,
        "data-xsuaa-binding",
        &[
            (
                METADATA_FILENAME,
                r#"{
    "metaDataProperties": [
        {"name": "instance_guid", "format": "text"},
        {"name": "instance_name", "format": "text"},
        {"name": "label", "format": "text"},
        {"name": "plan", "format": "text"},
        {"name": "tags", "format": "json"}
    ],
    "credentialProperties": [
        {"name": "domains", "format": "json", "container": true},
        {"name": "clientid", "format": "text"},
        {"name": "clientsecret", "format": "text"}
    ]
}"#,
            ),
            ("instance_guid", "data-xsuaa-instance-guid"),
            ("instance_name", "data-xsuaa-instance-name"),
            ("label", "xsuaa"),
            ("plan", "application"),
            ("tags", r#"["data-xsuaa-tag-1", "data-xsuaa-tag-2"]"#),
            ("domains", r#"{"domains": ["data-xsuaa-domain-1", "data-xsuaa-domain-2"]}"#),
            ("clientid", "data-xsuaa-clientid"),
            ("clientsecret", "data-xsuaa-clientsecret"),
        ],
    )
}

/// A metadata binding whose credentials all come from one container file.
pub fn secret_key_xsuaa_binding(root: &Path) -> PathBuf {
    write_binding(
        root,
        "secret-key-xsuaa-binding",
        &[
            (
                METADATA_FILENAME,
                r#"{
    "metaDataProperties": [
        {"name": "type", "format": "text"},
        {"name": "instance_guid", "format": "text"},
        {"name": "instance_name", "format": "text"},
        {"name": "plan", "sourceName": "service-plan", "format": "text"},
        {"name": "tags", "format": "json"}
    ],
    "credentialProperties": [
        {"name": "credentials", "sourceName": "secret-key", "format": "json", "container": true}
    ]
}"#,
            ),
            ("type", "xsuaa"),
            ("instance_guid", "secret-key-xsuaa-instance-guid"),
            ("instance_name", "secret-key-xsuaa-instance-name"),
            ("service-plan", "lite"),
            ("tags", r#"["secret-key-xsuaa-tag-1", "secret-key-xsuaa-tag-2"]"#),
            (
                "secret-key",
                r#"{
    "clientid": "secret-key-xsuaa-clientid",
    "clientsecret": "secret-key-xsuaa-clientsecret",
    "url": "https://secret-key-xsuaa-domain-1.com",
    "zone_uuid": "secret-key-xsuaa-zone-uuid",
    "domain": "secret-key-xsuaa-domain-1",
    "domains": ["secret-key-xsuaa-domain-1"]
}"#,
            ),
        ],
    )
}

/// A binding that only follows the servicebinding.io naming conventions.
pub fn servicebinding_io_binding(root: &Path) -> PathBuf {
    write_binding(
        root,
        "servicebinding-io-binding",
        &[
            ("type", "xsuaa"),
            ("provider", "sap"),
            ("host", "https://some.host"),
            ("port", "443"),
            ("uri", "https://some.host:443/endpoint"),
            ("username", "some-username"),
            ("password", "some-password"),
            ("certificates", r#"["some-certificate-1", "some-certificate-2"]"#),
            ("private-key", "some-private-key"),
        ],
    )
}
