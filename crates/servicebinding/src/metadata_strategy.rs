// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Parsing of bindings described by a `.metadata` file.
//!
//! The descriptor lists every property of the binding together with the
//! file it is read from and its format, split into top-level properties and
//! credentials. Files that are not listed are ignored.

use std::path::Path;

use serde_json::{Map, Value};

use crate::decode::{add_property, read_property};
use crate::metadata::{BindingMetadata, BindingProperty};
use crate::{
    Error, ServiceBinding, CREDENTIALS_KEY, METADATA_FILENAME, SERVICE_NAME_KEY, SERVICE_PLAN_KEY,
    TAGS_KEY,
};

#[cfg(test)]
#[path = "./metadata_strategy_test.rs"]
mod metadata_strategy_test;

/// Number of random keys tried before giving up.
const MAX_KEY_ATTEMPTS: usize = 100;

/// Parses bindings that come with a `.metadata` descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataParsingStrategy;

impl MetadataParsingStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Parse the binding directory at `binding_path`.
    ///
    /// Returns `Ok(None)` if there is no readable descriptor or if none of
    /// the declared credential properties could be decoded.
    pub fn parse(
        &self,
        binding_name: &str,
        binding_path: &Path,
    ) -> crate::Result<Option<ServiceBinding>> {
        tracing::debug!("Trying to read service binding from {binding_path:?}.");
        let Some(metadata) = try_parse_metadata(binding_path) else {
            return Ok(None);
        };

        let mut raw_binding = Map::new();
        add_properties(&mut raw_binding, binding_path, &metadata.metadata_properties);

        let mut raw_credentials = Map::new();
        add_properties(&mut raw_credentials, binding_path, &metadata.credential_properties);
        if raw_credentials.is_empty() {
            tracing::debug!("Skipping {binding_path:?}: No credentials property found.");
            return Ok(None);
        }

        let credentials_key = if raw_binding.contains_key(CREDENTIALS_KEY) {
            generate_new_key(&raw_binding, || uuid::Uuid::new_v4().to_string())?
        } else {
            CREDENTIALS_KEY.to_string()
        };
        raw_binding.insert(credentials_key.clone(), Value::Object(raw_credentials));

        let has_service_name = matches!(raw_binding.get(SERVICE_NAME_KEY), Some(Value::String(_)));
        let mut builder = ServiceBinding::builder()
            .copy(raw_binding)
            .with_name(binding_name)
            .with_tags_key(TAGS_KEY)
            .with_service_plan_key(SERVICE_PLAN_KEY)
            .with_credentials_key(credentials_key);
        if has_service_name {
            builder = builder.with_service_name_key(SERVICE_NAME_KEY);
        } else {
            // servicebinding.io says a binding SHOULD have a type
            tracing::warn!(
                "The service binding at '{binding_name}' does not contain a {SERVICE_NAME_KEY} property."
            );
        }

        let binding = builder.build()?;
        tracing::debug!("Successfully read service binding from {binding_path:?}.");
        Ok(Some(binding))
    }
}

fn try_parse_metadata(binding_path: &Path) -> Option<BindingMetadata> {
    let metadata_path = binding_path.join(METADATA_FILENAME);
    if !metadata_path.is_file() {
        tracing::debug!(
            "Skipping {binding_path:?}: The directory does not contain a '{METADATA_FILENAME}' file."
        );
        return None;
    }

    match BindingMetadata::load(&metadata_path) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            tracing::debug!(
                "Skipping {binding_path:?}: Unable to parse the '{METADATA_FILENAME}' file: {err}"
            );
            None
        }
    }
}

fn add_properties(
    properties: &mut Map<String, Value>,
    binding_path: &Path,
    descriptors: &[BindingProperty],
) {
    for property in descriptors {
        if let Some(raw) = read_property(binding_path, property) {
            add_property(properties, property, &raw);
        }
    }
}

/// Find a key that is not used in `map`.
fn generate_new_key<F>(map: &Map<String, Value>, mut generate: F) -> crate::Result<String>
where
    F: FnMut() -> String,
{
    for _ in 0..MAX_KEY_ATTEMPTS {
        let key = generate();
        if !map.contains_key(&key) {
            return Ok(key);
        }
    }

    Err(Error::KeyGenerationExhausted {
        attempts: MAX_KEY_ATTEMPTS,
    })
}
