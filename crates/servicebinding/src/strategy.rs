// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The set of strategies that can turn a directory into a binding.

use std::path::Path;

use once_cell::sync::Lazy;

use crate::{MetadataParsingStrategy, ServiceBinding, VanillaParsingStrategy};

#[cfg(test)]
#[path = "./strategy_test.rs"]
mod strategy_test;

/// Strategies applied when none are configured, in order of precedence.
///
/// The metadata strategy goes first so that a directory with an explicit
/// descriptor is never parsed by convention.
pub static DEFAULT_PARSING_STRATEGIES: Lazy<Vec<ParsingStrategy>> = Lazy::new(|| {
    vec![
        ParsingStrategy::Metadata(MetadataParsingStrategy::new()),
        ParsingStrategy::Vanilla(VanillaParsingStrategy::default()),
    ]
});

/// A copy of [`DEFAULT_PARSING_STRATEGIES`].
pub fn default_strategies() -> Vec<ParsingStrategy> {
    DEFAULT_PARSING_STRATEGIES.clone()
}

/// One way of parsing a binding directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingStrategy {
    Metadata(MetadataParsingStrategy),
    Vanilla(VanillaParsingStrategy),
}

impl ParsingStrategy {
    /// Parse the binding directory at `binding_path` as `binding_name`.
    ///
    /// `Ok(None)` means the strategy does not apply to this directory.
    pub fn parse(
        &self,
        binding_name: &str,
        binding_path: &Path,
    ) -> crate::Result<Option<ServiceBinding>> {
        match self {
            Self::Metadata(strategy) => strategy.parse(binding_name, binding_path),
            Self::Vanilla(strategy) => strategy.parse(binding_name, binding_path),
        }
    }

    /// Short name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Metadata(_) => "metadata",
            Self::Vanilla(_) => "vanilla",
        }
    }
}

impl From<MetadataParsingStrategy> for ParsingStrategy {
    fn from(strategy: MetadataParsingStrategy) -> Self {
        Self::Metadata(strategy)
    }
}

impl From<VanillaParsingStrategy> for ParsingStrategy {
    fn from(strategy: VanillaParsingStrategy) -> Self {
        Self::Vanilla(strategy)
    }
}
