// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The immutable service binding value and its builder.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, CREDENTIALS_KEY};

#[cfg(test)]
#[path = "./binding_test.rs"]
mod binding_test;

static EMPTY_CREDENTIALS: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// A parsed service binding.
///
/// A binding is a mapping from property names to JSON values together with
/// a set of designated keys that give access to the well-known views
/// (service name, plan, tags and credentials). It always carries a non-empty
/// credentials mapping and is never modified after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceBinding {
    /// Name of the binding, usually the name of its directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    /// All properties of the binding, including the credentials.
    properties: Map<String, Value>,

    #[serde(skip)]
    service_name_key: Option<String>,

    #[serde(skip)]
    service_plan_key: Option<String>,

    #[serde(skip)]
    tags_key: Option<String>,

    #[serde(skip)]
    credentials_key: String,
}

impl ServiceBinding {
    /// Start building a new binding.
    pub fn builder() -> ServiceBindingBuilder {
        ServiceBindingBuilder::default()
    }

    /// The name of the binding, which is not necessarily one of its properties.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All property names, including the credentials key.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Look up an arbitrary property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// The service type, if the binding designates a string-valued one.
    pub fn service_name(&self) -> Option<&str> {
        self.designated_str(self.service_name_key.as_deref())
    }

    /// The service plan, if the binding designates a string-valued one.
    pub fn service_plan(&self) -> Option<&str> {
        self.designated_str(self.service_plan_key.as_deref())
    }

    /// The string entries of the designated tags list.
    pub fn tags(&self) -> Vec<&str> {
        self.tags_key
            .as_deref()
            .and_then(|key| self.properties.get(key))
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The credentials of the binding.
    pub fn credentials(&self) -> &Map<String, Value> {
        self.properties
            .get(&self.credentials_key)
            .and_then(Value::as_object)
            .unwrap_or(&EMPTY_CREDENTIALS)
    }

    /// The key the credentials are stored under.
    ///
    /// This is `credentials` unless a regular property already used that name.
    pub fn credentials_key(&self) -> &str {
        &self.credentials_key
    }

    /// A copy of the binding with every credential value replaced by `mask`.
    pub fn redacted(&self, mask: &str) -> ServiceBinding {
        let mut binding = self.clone();
        if let Some(Value::Object(credentials)) =
            binding.properties.get_mut(&binding.credentials_key)
        {
            for value in credentials.values_mut() {
                *value = Value::String(mask.to_string());
            }
        }
        binding
    }

    fn designated_str(&self, key: Option<&str>) -> Option<&str> {
        key.and_then(|key| self.properties.get(key))
            .and_then(Value::as_str)
    }
}

/// Assembles a [`ServiceBinding`] from a raw property mapping.
#[derive(Debug, Clone, Default)]
pub struct ServiceBindingBuilder {
    properties: Map<String, Value>,
    name: Option<String>,
    service_name_key: Option<String>,
    service_plan_key: Option<String>,
    tags_key: Option<String>,
    credentials_key: Option<String>,
}

impl ServiceBindingBuilder {
    /// Use the given raw mapping as the binding properties.
    pub fn copy(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_service_name_key<S: Into<String>>(mut self, key: S) -> Self {
        self.service_name_key = Some(key.into());
        self
    }

    pub fn with_service_plan_key<S: Into<String>>(mut self, key: S) -> Self {
        self.service_plan_key = Some(key.into());
        self
    }

    pub fn with_tags_key<S: Into<String>>(mut self, key: S) -> Self {
        self.tags_key = Some(key.into());
        self
    }

    /// Defaults to [`CREDENTIALS_KEY`].
    pub fn with_credentials_key<S: Into<String>>(mut self, key: S) -> Self {
        self.credentials_key = Some(key.into());
        self
    }

    /// Freeze the binding.
    ///
    /// Fails if the credentials key does not hold a non-empty JSON object.
    pub fn build(self) -> crate::Result<ServiceBinding> {
        let credentials_key = self
            .credentials_key
            .unwrap_or_else(|| CREDENTIALS_KEY.to_string());

        match self.properties.get(&credentials_key) {
            Some(Value::Object(credentials)) if !credentials.is_empty() => {}
            Some(Value::Object(_)) | None => {
                return Err(Error::MissingCredentials { name: self.name });
            }
            Some(_) => return Err(Error::InvalidCredentials { key: credentials_key }),
        }

        Ok(ServiceBinding {
            name: self.name,
            properties: self.properties,
            service_name_key: self.service_name_key,
            service_plan_key: self.service_plan_key,
            tags_key: self.tags_key,
            credentials_key,
        })
    }
}
