// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for service binding operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
#[path = "./error_test.rs"]
mod error_test;

/// Convenience Result type with servicebinding Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading service bindings.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Failed to list or read a binding directory
    #[error("Failed to read {path:?}")]
    #[diagnostic(code(servicebinding::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Invalid JSON in a .metadata file
    #[error("Invalid .metadata file {path:?}: {error}")]
    #[diagnostic(
        code(servicebinding::invalid_metadata),
        help("The descriptor must be a JSON object with 'metaDataProperties' and 'credentialProperties' lists")
    )]
    InvalidMetadata {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    /// A binding was built without credentials
    #[error("Service binding {name:?} has no credentials")]
    #[diagnostic(
        code(servicebinding::missing_credentials),
        help("Every service binding must carry a non-empty credentials mapping")
    )]
    MissingCredentials { name: Option<String> },

    /// The credentials key holds something other than a mapping
    #[error("The '{key}' property must be a JSON object")]
    #[diagnostic(code(servicebinding::invalid_credentials))]
    InvalidCredentials { key: String },

    /// A property value could not be coerced into the shape its rule requires
    #[error("Property '{name}' cannot be converted: {message}")]
    #[diagnostic(code(servicebinding::value_coercion))]
    ValueCoercion { name: String, message: String },

    /// No unused random key could be generated
    #[error("Unable to generate a new random key after {attempts} attempts")]
    #[diagnostic(code(servicebinding::key_generation_exhausted))]
    KeyGenerationExhausted { attempts: usize },

    /// Unrecoverable failure while accessing a binding directory
    #[error("Failed to access service binding at {path:?}")]
    #[diagnostic(
        code(servicebinding::access_failed),
        help("This indicates a broken binding layout or an internal error, enable debug logging for details")
    )]
    AccessFailed {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// True for errors caused by the filesystem rather than by the binding
    /// contents or an internal invariant.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::ReadFailed { .. })
    }
}
