//! Variation resolution: pick the most specific eligible definition

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, trace};

use super::context::VariationContext;
use super::definition::{Specificity, Variation, VariationDefinition};
use super::error::VariationError;
use super::registry::VariationRegistry;

/// Which candidate wins among equally specific matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The earliest registered definition wins
    #[default]
    FirstRegistered,
    /// The latest registered definition wins, so later layers override earlier ones
    LastRegistered,
}

/// Configuration options for variation resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tie-break policy
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// Matches contexts against a read-only set of registered variations
///
/// Cloning is cheap and clones share the registry, so one resolver can be
/// handed to every request.
#[derive(Debug, Clone, Default)]
pub struct VariationResolver {
    registry: Arc<VariationRegistry>,
    config: ResolverConfig,
}

impl VariationResolver {
    pub fn new(registry: VariationRegistry) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    pub fn with_config(registry: VariationRegistry, config: ResolverConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    pub fn registry(&self) -> &VariationRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the variation applicable to `context`.
    ///
    /// Definitions with a pinned axis that disagrees with the context are
    /// excluded. Among the rest the highest exact-match count wins; ties go
    /// to registration order according to the configured [`TieBreak`].
    pub fn resolve(&self, context: &VariationContext) -> Result<Variation, VariationError> {
        let mut best: Option<(usize, Specificity)> = None;

        for (index, definition) in self.registry.iter() {
            let Some(specificity) = definition.pins.score(context) else {
                trace!(index, name = ?definition.name, "variation excluded");
                continue;
            };
            trace!(index, name = ?definition.name, exact = specificity.exact, "variation eligible");

            if best.map_or(true, |(_, current)| self.beats(specificity, current)) {
                best = Some((index, specificity));
            }
        }

        match best.and_then(|(index, specificity)| {
            self.registry
                .get(index)
                .map(|definition| to_variation(index, definition, specificity))
        }) {
            Some(variation) => {
                debug!(
                    %context,
                    index = variation.index,
                    name = ?variation.name,
                    exact = variation.specificity.exact,
                    "variation resolved"
                );
                Ok(variation)
            }
            None => {
                debug!(%context, "no matching variation");
                Err(VariationError::no_match(context))
            }
        }
    }

    /// All eligible variations, best first
    pub fn candidates(&self, context: &VariationContext) -> Vec<Variation> {
        let mut eligible: Vec<Variation> = self
            .registry
            .iter()
            .filter_map(|(index, definition)| {
                definition
                    .pins
                    .score(context)
                    .map(|specificity| to_variation(index, definition, specificity))
            })
            .collect();

        match self.config.tie_break {
            TieBreak::FirstRegistered => eligible.sort_by(|a, b| {
                b.specificity
                    .cmp(&a.specificity)
                    .then(a.index.cmp(&b.index))
            }),
            TieBreak::LastRegistered => eligible.sort_by(|a, b| {
                b.specificity
                    .cmp(&a.specificity)
                    .then(b.index.cmp(&a.index))
            }),
        }
        eligible
    }

    fn beats(&self, candidate: Specificity, current: Specificity) -> bool {
        match self.config.tie_break {
            TieBreak::FirstRegistered => candidate > current,
            TieBreak::LastRegistered => candidate >= current,
        }
    }
}

fn to_variation(index: usize, definition: &VariationDefinition, specificity: Specificity) -> Variation {
    Variation {
        name: definition.name.clone(),
        payload: definition.payload.clone(),
        specificity,
        index,
    }
}
