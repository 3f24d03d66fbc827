// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Data types for `.metadata` binding descriptors.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[cfg(test)]
#[path = "./metadata_test.rs"]
mod metadata_test;

/// Encoding of a single property file.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyFormat {
    /// The file content is used verbatim.
    #[default]
    #[serde(alias = "TEXT")]
    Text,

    /// The file content is a JSON value.
    #[serde(alias = "JSON")]
    Json,

    /// Any format this crate does not understand. Such properties are skipped.
    #[serde(other)]
    Unknown,
}

/// Describes one property of a binding and the file it is read from.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BindingProperty {
    /// Key of the property in the parsed binding.
    pub name: String,

    /// File holding the value, relative to the binding directory.
    /// Defaults to `name`.
    #[serde(default)]
    pub source_name: Option<String>,

    #[serde(default)]
    pub format: PropertyFormat,

    /// Only meaningful for [`PropertyFormat::Json`]: the keys of the decoded
    /// object are spliced into the parent mapping instead of being nested
    /// under `name`.
    #[serde(default)]
    pub container: bool,
}

impl BindingProperty {
    pub fn new<S: Into<String>>(name: S, format: PropertyFormat) -> Self {
        Self {
            name: name.into(),
            source_name: None,
            format,
            container: false,
        }
    }

    pub fn with_source_name<S: Into<String>>(mut self, source_name: S) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    pub fn as_container(mut self) -> Self {
        self.container = true;
        self
    }

    /// The name of the file holding this property's value.
    pub fn source_file(&self) -> &str {
        self.source_name.as_deref().unwrap_or(&self.name)
    }
}

/// Parsed content of a `.metadata` file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BindingMetadata {
    /// Properties placed at the root of the binding.
    #[serde(
        rename = "metaDataProperties",
        default,
        deserialize_with = "deserialize_properties"
    )]
    pub metadata_properties: Vec<BindingProperty>,

    /// Properties placed in the credentials of the binding.
    #[serde(
        rename = "credentialProperties",
        default,
        deserialize_with = "deserialize_properties"
    )]
    pub credential_properties: Vec<BindingProperty>,
}

impl BindingMetadata {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a descriptor from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;

        Self::from_json(&json).map_err(|e| crate::Error::InvalidMetadata {
            path: path.to_path_buf(),
            error: e,
        })
    }
}

/// Deserialize a property list, dropping entries that are not valid
/// property descriptors instead of rejecting the whole file.
fn deserialize_properties<'de, D>(deserializer: D) -> Result<Vec<BindingProperty>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    let properties = entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(property) => Some(property),
            Err(err) => {
                tracing::debug!("Ignoring invalid property descriptor {entry}: {err}");
                None
            }
        })
        .collect();
    Ok(properties)
}
