// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Rules that place vanilla property values into a raw binding.

use serde_json::{Map, Value};

use crate::decode::parse_json_content;
use crate::{Error, CREDENTIALS_KEY, SERVICE_NAME_KEY};

#[cfg(test)]
#[path = "./setter_test.rs"]
mod setter_test;

/// Properties with a well-known meaning in the servicebinding.io layout.
/// Names are compared case-insensitively.
pub const DEFAULT_PROPERTY_SETTERS: &[(&str, PropertySetter)] = &[
    (SERVICE_NAME_KEY, PropertySetter::TO_ROOT),
    ("provider", PropertySetter::TO_ROOT),
    ("host", PropertySetter::TO_CREDENTIALS),
    ("port", PropertySetter::TO_CREDENTIALS.as_json()),
    ("uri", PropertySetter::TO_CREDENTIALS),
    ("username", PropertySetter::TO_CREDENTIALS),
    ("password", PropertySetter::TO_CREDENTIALS),
    ("certificates", PropertySetter::TO_CREDENTIALS.as_list()),
    ("private-key", PropertySetter::TO_CREDENTIALS),
];

/// Rule applied to every property without an entry in the setter table.
pub const DEFAULT_FALLBACK_PROPERTY_SETTER: PropertySetter = PropertySetter::TO_CREDENTIALS.as_json();

/// Where a property ends up in the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterTarget {
    /// Top level of the binding.
    Root,
    /// Inside the credentials mapping.
    Credentials,
}

/// How a value is converted before it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCoercion {
    Verbatim,
    /// Require a list, parsing strings as JSON arrays.
    AsList,
    /// Infer the JSON type of string values.
    AsJson,
}

/// A placement rule for a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySetter {
    pub target: SetterTarget,
    pub coercion: ValueCoercion,
}

impl PropertySetter {
    pub const TO_ROOT: Self = Self {
        target: SetterTarget::Root,
        coercion: ValueCoercion::Verbatim,
    };

    pub const TO_CREDENTIALS: Self = Self {
        target: SetterTarget::Credentials,
        coercion: ValueCoercion::Verbatim,
    };

    pub const fn as_list(self) -> Self {
        Self {
            coercion: ValueCoercion::AsList,
            ..self
        }
    }

    pub const fn as_json(self) -> Self {
        Self {
            coercion: ValueCoercion::AsJson,
            ..self
        }
    }

    /// Coerce `value` and store it as `name` in `binding`.
    ///
    /// The credentials mapping is created on first use. Errors mean the
    /// value or the binding has a shape this rule cannot handle.
    pub fn set_property(
        &self,
        binding: &mut Map<String, Value>,
        name: &str,
        value: Value,
    ) -> crate::Result<()> {
        let value = match self.coercion {
            ValueCoercion::Verbatim => value,
            ValueCoercion::AsList => coerce_list(name, value)?,
            ValueCoercion::AsJson => coerce_json(name, value)?,
        };

        match self.target {
            SetterTarget::Root => {
                binding.insert(name.to_string(), value);
            }
            SetterTarget::Credentials => {
                let credentials = binding
                    .entry(CREDENTIALS_KEY)
                    .or_insert_with(|| Value::Object(Map::new()));
                let Value::Object(credentials) = credentials else {
                    return Err(Error::InvalidCredentials {
                        key: CREDENTIALS_KEY.to_string(),
                    });
                };
                credentials.insert(name.to_string(), value);
            }
        }
        Ok(())
    }
}

fn coerce_list(name: &str, value: Value) -> crate::Result<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::String(raw) => serde_json::from_str::<Vec<Value>>(&raw)
            .map(Value::Array)
            .map_err(|err| Error::ValueCoercion {
                name: name.to_string(),
                message: format!("the value is not a JSON array: {err}"),
            }),
        other => Err(Error::ValueCoercion {
            name: name.to_string(),
            message: format!("{other} cannot be converted to a list"),
        }),
    }
}

fn coerce_json(name: &str, value: Value) -> crate::Result<Value> {
    let Value::String(raw) = value else {
        return Ok(value);
    };
    parse_json_content(&raw).ok_or_else(|| Error::ValueCoercion {
        name: name.to_string(),
        message: format!("'{raw}' cannot be converted into a valid JSON value"),
    })
}
