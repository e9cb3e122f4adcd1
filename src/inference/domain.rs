//! Business domain detection from generated cube names.

use tracing::info;

use std::slice;

use super::patterns::matches_any;
use crate::config::{DomainProfile, DomainSettings};
use crate::model::CubeDefinition;

/// Returned when no profile reaches the threshold.
pub const GENERIC_DOMAIN: &str = "generic";

/// Infers a business domain from the set of cube names.
#[derive(Debug, Clone, Default)]
pub struct DomainDetector {
    settings: DomainSettings,
}

impl DomainDetector {
    pub fn new(settings: DomainSettings) -> Self {
        Self { settings }
    }

    /// First profile (in configured order) whose vocabulary reaches the
    /// match threshold, else [`GENERIC_DOMAIN`].
    pub fn detect<'a, I>(&self, cubes: I) -> String
    where
        I: IntoIterator<Item = &'a CubeDefinition>,
    {
        let names: Vec<String> = cubes.into_iter().map(|c| c.name.clone()).collect();
        self.detect_names(&names)
    }

    /// Same as [`DomainDetector::detect`] over bare names.
    pub fn detect_names(&self, cube_names: &[String]) -> String {
        for profile in &self.settings.profiles {
            if profile.name == GENERIC_DOMAIN {
                continue;
            }

            if self.score(profile, cube_names) >= self.settings.match_threshold {
                info!(domain = %profile.name, "detected domain");
                return profile.name.clone();
            }
        }

        GENERIC_DOMAIN.to_string()
    }

    /// Vocabulary entries of `profile` found inside any cube name.
    pub fn score(&self, profile: &DomainProfile, cube_names: &[String]) -> usize {
        profile
            .fact_tables
            .iter()
            .chain(profile.dimension_tables.iter())
            .filter(|entry| {
                cube_names
                    .iter()
                    .any(|name| matches_any(name, slice::from_ref(*entry)))
            })
            .count()
    }
}
