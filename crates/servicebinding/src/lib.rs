// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! servicebinding - servicebinding.io Service Binding Reader
//!
//! This crate discovers service bindings that a platform operator mounted onto
//! the filesystem (see <https://servicebinding.io/spec/core/1.0.0/>) and turns
//! each of them into an immutable [`ServiceBinding`].
//!
//! # Overview
//!
//! The root directory is taken from `SERVICE_BINDING_ROOT`. Every immediate
//! subdirectory is a binding candidate, named after the directory. Each
//! candidate is handed to an ordered chain of parsing strategies and the first
//! strategy that produces a binding wins:
//!
//! 1. [`MetadataParsingStrategy`] reads an explicit `.metadata` descriptor.
//! 2. [`VanillaParsingStrategy`] infers the layout from well-known file names.
//!
//! Candidates that no strategy accepts are skipped; enable `debug` logging
//! to see why.
//!
//! # Example
//!
//! ```text
//! $SERVICE_BINDING_ROOT/
//!   my-xsuaa-binding/
//!     .metadata
//!     clientid
//!     clientsecret
//!     plan
//!   my-postgres/
//!     type
//!     host
//!     port
//!     username
//!     password
//! ```
//!
//! ```no_run
//! use servicebinding::{ServiceBindingAccessor, ServiceBindingIoAccessor};
//!
//! let accessor = ServiceBindingIoAccessor::new();
//! for binding in accessor.get_service_bindings()? {
//!     println!("{:?} -> {:?}", binding.name(), binding.service_name());
//! }
//! # Ok::<(), servicebinding::Error>(())
//! ```

pub mod accessor;
pub mod binding;
pub mod decode;
pub mod error;
pub mod metadata;
pub mod metadata_strategy;
pub mod setter;
pub mod strategy;
pub mod vanilla_strategy;

#[cfg(test)]
mod fixtures;

pub use accessor::{
    default_environment_reader, EnvironmentReader, ServiceBindingAccessor, ServiceBindingIoAccessor,
};
pub use binding::{ServiceBinding, ServiceBindingBuilder};
pub use error::{Error, Result};
pub use metadata::{BindingMetadata, BindingProperty, PropertyFormat};
pub use metadata_strategy::MetadataParsingStrategy;
pub use setter::{PropertySetter, SetterTarget, ValueCoercion};
pub use strategy::{default_strategies, ParsingStrategy};
pub use vanilla_strategy::VanillaParsingStrategy;

/// Well-known configuration key naming the service binding root directory.
pub const SERVICE_BINDING_ROOT_KEY: &str = "SERVICE_BINDING_ROOT";

/// Well-known filename of the binding descriptor.
pub const METADATA_FILENAME: &str = ".metadata";

/// Reserved key under which the credentials of a binding are stored.
pub const CREDENTIALS_KEY: &str = "credentials";

/// Key holding the service type of a binding.
pub const SERVICE_NAME_KEY: &str = "type";

/// Key holding the service plan of a binding.
pub const SERVICE_PLAN_KEY: &str = "plan";

/// Key holding the tags of a binding.
pub const TAGS_KEY: &str = "tags";
