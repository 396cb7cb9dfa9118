//! Explicit table of subcommands, built once at startup.

use async_trait::async_trait;
use cartithyia_config::MediaConfig;

use crate::commands::{frame::FrameFeature, merge::MergeFeature};
use crate::error::CliResult;

/// Shared state handed to every subcommand.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) config: MediaConfig,
}

/// A subcommand selectable by the first CLI argument.
#[async_trait]
pub(crate) trait Feature: Send + Sync {
    /// Name matched against the first argument.
    fn name(&self) -> &'static str;

    /// One-line description shown in usage listings.
    fn about(&self) -> &'static str;

    /// Parse `args` (everything after the subcommand name) and run.
    async fn execute(&self, ctx: &AppContext, args: Vec<String>) -> CliResult<()>;
}

/// Registered subcommands in registration order.
pub(crate) struct FeatureRegistry {
    features: Vec<Box<dyn Feature>>,
}

impl FeatureRegistry {
    pub(crate) const fn empty() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Registry holding every subcommand the binary ships.
    pub(crate) fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(FrameFeature));
        registry.register(Box::new(MergeFeature));
        registry
    }

    /// Add a feature; a later registration with the same name replaces the earlier one.
    pub(crate) fn register(&mut self, feature: Box<dyn Feature>) {
        if let Some(slot) = self
            .features
            .iter_mut()
            .find(|existing| existing.name() == feature.name())
        {
            *slot = feature;
        } else {
            self.features.push(feature);
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&dyn Feature> {
        self.features
            .iter()
            .find(|feature| feature.name() == name)
            .map(AsRef::as_ref)
    }

    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.features.iter().map(|feature| feature.name()).collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(AsRef::as_ref)
    }
}
