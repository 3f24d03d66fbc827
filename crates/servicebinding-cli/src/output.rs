// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Rendering of bindings for display.

use serde_json::{json, Value};
use servicebinding::ServiceBinding;

#[cfg(test)]
#[path = "./output_test.rs"]
mod output_test;

/// Shown in place of credential values that are not revealed.
pub const MASK: &str = "********";

/// The summary of a binding printed by `sbio list`.
pub fn summary(binding: &ServiceBinding) -> Value {
    json!({
        "name": binding.name(),
        "type": binding.service_name(),
        "plan": binding.service_plan(),
        "tags": binding.tags(),
        "credentials": binding.credentials().keys().collect::<Vec<_>>(),
    })
}

/// The binding as it is displayed, with credential values masked unless
/// `reveal` is set.
pub fn shown(binding: ServiceBinding, reveal: bool) -> ServiceBinding {
    if reveal {
        binding
    } else {
        binding.redacted(MASK)
    }
}

/// A single line representation of a property value.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
