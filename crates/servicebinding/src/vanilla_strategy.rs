// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Parsing of bindings that strictly follow the servicebinding.io
//! specification (version 1.0.0), without a `.metadata` descriptor.
//!
//! Every regular file in the binding directory is a property named after the
//! file. Well-known names are placed according to [`DEFAULT_PROPERTY_SETTERS`],
//! everything else is treated as a credential.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::decode::read_property_file;
use crate::setter::{PropertySetter, DEFAULT_FALLBACK_PROPERTY_SETTER, DEFAULT_PROPERTY_SETTERS};
use crate::{ServiceBinding, CREDENTIALS_KEY, METADATA_FILENAME, SERVICE_NAME_KEY};

#[cfg(test)]
#[path = "./vanilla_strategy_test.rs"]
mod vanilla_strategy_test;

/// Parses bindings by file name convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanillaParsingStrategy {
    property_setters: Vec<(String, PropertySetter)>,
    fallback_property_setter: PropertySetter,
}

impl Default for VanillaParsingStrategy {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROPERTY_SETTERS.iter().copied(),
            DEFAULT_FALLBACK_PROPERTY_SETTER,
        )
    }
}

impl VanillaParsingStrategy {
    /// Create a strategy with a custom setter table.
    ///
    /// Property names are matched case-insensitively; the first matching
    /// entry wins. Unmatched properties use `fallback_property_setter`.
    pub fn new<I, S>(property_setters: I, fallback_property_setter: PropertySetter) -> Self
    where
        I: IntoIterator<Item = (S, PropertySetter)>,
        S: Into<String>,
    {
        Self {
            property_setters: property_setters
                .into_iter()
                .map(|(name, setter)| (name.into(), setter))
                .collect(),
            fallback_property_setter,
        }
    }

    /// Parse the binding directory at `binding_path`.
    ///
    /// Returns `Ok(None)` if the directory has a `.metadata` file, holds no
    /// non-empty files, or yields no credentials. Errors reading the
    /// directory or one of its files are returned.
    pub fn parse(
        &self,
        binding_name: &str,
        binding_path: &Path,
    ) -> crate::Result<Option<ServiceBinding>> {
        tracing::debug!("Trying to read service binding from {binding_path:?}.");
        if binding_path.join(METADATA_FILENAME).exists() {
            tracing::debug!(
                "Skipping {binding_path:?}: The directory contains a '{METADATA_FILENAME}' file."
            );
            return Ok(None);
        }

        let property_files = list_property_files(binding_path)?;
        if property_files.is_empty() {
            tracing::debug!("Skipping {binding_path:?}: The directory is empty.");
            return Ok(None);
        }

        let mut raw_binding = Map::new();
        for property_file in property_files {
            let Some(property_name) = property_file.file_name().and_then(|name| name.to_str())
            else {
                tracing::debug!("Ignoring property file with a non UTF-8 name {property_file:?}.");
                continue;
            };

            let content = read_property_file(&property_file)?;
            if content.is_empty() {
                tracing::debug!("Ignoring empty property file {property_file:?}.");
                continue;
            }

            self.property_setter(property_name).set_property(
                &mut raw_binding,
                property_name,
                Value::String(content),
            )?;
        }

        if !raw_binding.contains_key(CREDENTIALS_KEY) {
            tracing::debug!("Skipping {binding_path:?}: No credentials property found.");
            return Ok(None);
        }

        if !raw_binding.contains_key(SERVICE_NAME_KEY) {
            // servicebinding.io says a binding SHOULD have a type
            tracing::warn!(
                "The service binding at '{binding_name}' does not contain a {SERVICE_NAME_KEY} property."
            );
        }

        let binding = ServiceBinding::builder()
            .copy(raw_binding)
            .with_name(binding_name)
            .with_service_name_key(SERVICE_NAME_KEY)
            .with_credentials_key(CREDENTIALS_KEY)
            .build()?;
        tracing::debug!("Successfully read service binding from {binding_path:?}.");
        Ok(Some(binding))
    }

    fn property_setter(&self, property_name: &str) -> PropertySetter {
        self.property_setters
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property_name))
            .map(|(_, setter)| *setter)
            .unwrap_or(self.fallback_property_setter)
    }
}

/// Regular files directly inside `binding_path`, sorted by name.
fn list_property_files(binding_path: &Path) -> crate::Result<Vec<PathBuf>> {
    let read_failed = |error| crate::Error::ReadFailed {
        path: binding_path.to_path_buf(),
        error,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(binding_path).map_err(read_failed)? {
        let path = entry.map_err(read_failed)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
