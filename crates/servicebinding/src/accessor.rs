// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Discovery of service bindings below the service binding root directory.
//!
//! The root directory is expected to look like this:
//!
//! ```text
//! $SERVICE_BINDING_ROOT
//! ├── <binding-name-1>
//! │   ├── .metadata        (optional)
//! │   ├── <property-1>
//! │   └── <property-n>
//! └── <binding-name-2>
//!     └── <property-1>
//! ```
//!
//! Every subdirectory is parsed with the configured strategies in order and
//! the first strategy producing a binding wins. Missing or unreadable
//! directories yield no bindings rather than an error.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{default_strategies, Error, ParsingStrategy, ServiceBinding, SERVICE_BINDING_ROOT_KEY};

#[cfg(test)]
#[path = "./accessor_test.rs"]
mod accessor_test;

/// Something that can provide the service bindings of the application.
pub trait ServiceBindingAccessor {
    /// All bindings that could be read.
    ///
    /// Only unrecoverable errors are returned; bindings that cannot be
    /// found or parsed are left out of the result.
    fn get_service_bindings(&self) -> crate::Result<Vec<ServiceBinding>>;
}

/// Looks up a configuration value by key.
pub type EnvironmentReader = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads `key` from the process environment.
pub fn default_environment_reader(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads servicebinding.io bindings from the filesystem.
pub struct ServiceBindingIoAccessor {
    parsing_strategies: Vec<ParsingStrategy>,
    environment_reader: EnvironmentReader,
}

impl fmt::Debug for ServiceBindingIoAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBindingIoAccessor")
            .field("parsing_strategies", &self.parsing_strategies)
            .finish_non_exhaustive()
    }
}

impl Default for ServiceBindingIoAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceBindingIoAccessor {
    /// Create an accessor using the default strategies and the process
    /// environment.
    pub fn new() -> Self {
        Self::with_strategies(default_strategies(), default_environment_reader)
    }

    /// Create an accessor with custom strategies and configuration lookup.
    pub fn with_strategies<F>(parsing_strategies: Vec<ParsingStrategy>, environment_reader: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            parsing_strategies,
            environment_reader: Box::new(environment_reader),
        }
    }

    /// Create an accessor with the default strategies that reads bindings
    /// from `root` regardless of the environment.
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into().to_string_lossy().into_owned();
        Self::with_strategies(default_strategies(), move |key| {
            (key == SERVICE_BINDING_ROOT_KEY).then(|| root.clone())
        })
    }

    pub fn parsing_strategies(&self) -> &[ParsingStrategy] {
        &self.parsing_strategies
    }

    /// The configured root directory, if it is set and is a directory.
    pub fn root_directory(&self) -> Option<PathBuf> {
        tracing::debug!(
            "Trying to determine service binding root directory using the '{SERVICE_BINDING_ROOT_KEY}' environment variable."
        );
        let root = match (self.environment_reader)(SERVICE_BINDING_ROOT_KEY) {
            Some(root) if !root.is_empty() => root,
            _ => {
                tracing::debug!("Environment variable '{SERVICE_BINDING_ROOT_KEY}' is not defined.");
                return None;
            }
        };

        let root_directory = PathBuf::from(&root);
        if !root_directory.is_dir() {
            tracing::debug!(
                "Environment variable '{SERVICE_BINDING_ROOT_KEY}' ('{root}') does not point to a valid directory."
            );
            return None;
        }
        Some(root_directory)
    }

    /// Apply the strategies to one binding directory, first match wins.
    fn parse_service_binding(&self, binding_path: &Path) -> crate::Result<Option<ServiceBinding>> {
        let binding_name = binding_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        for strategy in &self.parsing_strategies {
            match strategy.parse(&binding_name, binding_path) {
                Ok(Some(binding)) => return Ok(Some(binding)),
                Ok(None) => {}
                Err(err) if err.is_io() => {
                    tracing::warn!(
                        "Skipping {binding_path:?} for the {} strategy: {err}",
                        strategy.kind()
                    );
                }
                Err(err) => {
                    return Err(Error::AccessFailed {
                        path: binding_path.to_path_buf(),
                        source: Box::new(err),
                    });
                }
            }
        }
        Ok(None)
    }
}

impl ServiceBindingAccessor for ServiceBindingIoAccessor {
    fn get_service_bindings(&self) -> crate::Result<Vec<ServiceBinding>> {
        let Some(root_directory) = self.root_directory() else {
            return Ok(Vec::new());
        };

        tracing::debug!("Reading service bindings from {root_directory:?}.");
        let binding_paths = match list_binding_directories(&root_directory) {
            Ok(paths) => paths,
            Err(err) => {
                tracing::debug!("Unable to list {root_directory:?}: {err}");
                return Ok(Vec::new());
            }
        };

        let mut bindings = Vec::new();
        for binding_path in binding_paths {
            if let Some(binding) = self.parse_service_binding(&binding_path)? {
                bindings.push(binding);
            }
        }
        Ok(bindings)
    }
}

/// Immediate subdirectories of `root`, sorted by name.
fn list_binding_directories(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut directories = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            directories.push(path);
        }
    }
    directories.sort();
    Ok(directories)
}
