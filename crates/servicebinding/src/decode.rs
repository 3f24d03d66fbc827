// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Decoding of property files into typed values.
//!
//! Property files are flat text files, so they carry no type information.
//! To recover numbers, booleans, lists and objects the raw content is wrapped
//! into a JSON document (`{"content": <raw>}`) and the JSON parser decides
//! what `content` is. Bare words that are not valid JSON on their own, such
//! as a client id, are taken as strings.

use std::path::{Component, Path};

use serde_json::{Map, Value};

use crate::metadata::{BindingProperty, PropertyFormat};

#[cfg(test)]
#[path = "./decode_test.rs"]
mod decode_test;

const CONTENT_KEY: &str = "content";

/// Read a property file as UTF-8 text.
///
/// Lines are re-joined with `\n`, so `\r\n` line endings are normalized and
/// a trailing line break is not part of the value.
pub fn read_property_file(path: &Path) -> crate::Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
        path: path.to_path_buf(),
        error: e,
    })?;
    Ok(content.lines().collect::<Vec<_>>().join("\n"))
}

/// Read the source file of `property` from `binding_path`.
///
/// Returns `None` if the source name leaves the binding directory, or if the
/// file does not exist, is not a regular file, or cannot be read.
pub fn read_property(binding_path: &Path, property: &BindingProperty) -> Option<String> {
    let source_file = Path::new(property.source_file());
    if !is_local_path(source_file) {
        tracing::debug!(
            "Ignoring property '{}': {source_file:?} is outside of the binding directory.",
            property.name
        );
        return None;
    }

    let path = binding_path.join(source_file);
    if !path.is_file() {
        tracing::debug!(
            "Ignoring property '{}': {path:?} is not a file.",
            property.name
        );
        return None;
    }

    match read_property_file(&path) {
        Ok(content) => Some(content),
        Err(err) => {
            tracing::debug!("Ignoring property '{}': {err}", property.name);
            None
        }
    }
}

/// True if `path` is relative and never steps up to a parent directory.
fn is_local_path(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Infer the JSON value of a raw property.
///
/// Returns `None` if the content is empty, or opens a JSON object, list or
/// string that does not parse.
pub fn parse_json_content(raw: &str) -> Option<Value> {
    let wrapped = format!("{{\"{CONTENT_KEY}\": {raw}}}");
    if let Ok(mut document) = serde_json::from_str::<Map<String, Value>>(&wrapped) {
        return document.remove(CONTENT_KEY);
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(['{', '[', '"']) {
        return None;
    }
    Some(Value::String(trimmed.to_string()))
}

/// Decode `raw` according to `property` and add the result to `properties`.
///
/// Non-container values are stored under the property name, replacing any
/// earlier value. Container values must be JSON objects; their keys are
/// copied into `properties` one by one. Values that cannot be decoded are
/// dropped and leave `properties` untouched.
pub fn add_property(properties: &mut Map<String, Value>, property: &BindingProperty, raw: &str) {
    match property.format {
        PropertyFormat::Text => {
            properties.insert(property.name.clone(), Value::String(raw.to_string()));
        }
        PropertyFormat::Json => {
            let Some(value) = parse_json_content(raw) else {
                tracing::debug!(
                    "Ignoring property '{}': the content is not valid JSON.",
                    property.name
                );
                return;
            };

            if !property.container {
                properties.insert(property.name.clone(), value);
                return;
            }

            match value {
                Value::Object(content) => properties.extend(content),
                _ => tracing::debug!(
                    "Ignoring container property '{}': the content is not a JSON object.",
                    property.name
                ),
            }
        }
        PropertyFormat::Unknown => {
            tracing::debug!(
                "Ignoring property '{}': the format is not supported.",
                property.name
            );
        }
    }
}
