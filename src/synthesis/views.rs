//! Cross-cube view composition.
//!
//! Runs once every cube exists. Each view builder only looks at the cube
//! list and its own settings, and slices like "first 3 qualifying cubes"
//! follow input order, so the cube list must arrive in a stable order.

use tracing::info;

use crate::config::{
    BusinessMetricsViewSettings, DimensionCatalogViewSettings, FactAnalysisViewSettings,
    ViewSettings,
};
use crate::inference::matches_any;
use crate::model::{
    GeneratedCube, IncludeSelector, TableRole, ValueKind, ViewCube, ViewDefinition, ViewPrefix,
};

use super::measures::{COUNT_DISTINCT_MEASURE, COUNT_MEASURE};

/// Groups generated cubes into named views.
#[derive(Debug, Clone, Default)]
pub struct ViewComposer {
    settings: ViewSettings,
}

impl ViewComposer {
    pub fn new(settings: ViewSettings) -> Self {
        Self { settings }
    }

    /// All views that have at least one qualifying cube, in the order
    /// business metrics, fact analysis, dimension catalog.
    pub fn compose(&self, cubes: &[GeneratedCube]) -> Vec<ViewDefinition> {
        let views: Vec<ViewDefinition> = [
            self.business_metrics(cubes),
            self.fact_analysis(cubes),
            self.dimension_catalog(cubes),
        ]
        .into_iter()
        .flatten()
        .collect();

        for view in &views {
            info!(view = %view.name, cubes = view.cubes.len(), "composed view");
        }
        views
    }

    /// Cubes with financial measures, many measures, or an allow-listed
    /// name; everything exposed with the cube-name prefix.
    pub fn business_metrics(&self, cubes: &[GeneratedCube]) -> Option<ViewDefinition> {
        let cfg: &BusinessMetricsViewSettings = &self.settings.business_metrics;

        let selected: Vec<ViewCube> = cubes
            .iter()
            .filter(|c| {
                let measures = &c.cube.measures;
                measures
                    .iter()
                    .any(|m| matches_any(&m.name, &cfg.financial_keywords))
                    || measures.len() > cfg.min_measures
                    || cfg.always_include.iter().any(|name| name == c.name())
            })
            .take(cfg.max_cubes)
            .map(|c| prefixed_all(c.name()))
            .collect();

        non_empty(&cfg.name, &cfg.description, selected)
    }

    /// Every fact cube with its measures and time dimensions, plus the
    /// descriptive members of each joined cube.
    pub fn fact_analysis(&self, cubes: &[GeneratedCube]) -> Option<ViewDefinition> {
        let cfg: &FactAnalysisViewSettings = &self.settings.fact_analysis;
        let mut entries = Vec::new();

        for generated in cubes.iter().filter(|c| c.role() == TableRole::Fact) {
            let cube = &generated.cube;

            let mut members: Vec<String> = Vec::new();
            for name in [COUNT_MEASURE, COUNT_DISTINCT_MEASURE] {
                if cube.measure(name).is_some() {
                    members.push(name.to_string());
                }
            }
            for measure in &cube.measures {
                if !members.contains(&measure.name) {
                    members.push(measure.name.clone());
                }
            }
            for dim in cube.dimensions.iter().filter(|d| d.kind == ValueKind::Time) {
                if !members.contains(&dim.name) {
                    members.push(dim.name.clone());
                }
            }

            entries.push(ViewCube {
                join_path: cube.name.clone(),
                includes: IncludeSelector::Members(members),
                prefix: None,
            });

            if cfg.include_joins {
                for join in &cube.joins {
                    entries.push(ViewCube {
                        join_path: format!("{}.{}", cube.name, join.name),
                        includes: IncludeSelector::Members(cfg.join_includes.clone()),
                        prefix: Some(ViewPrefix::Alias(join.name.clone())),
                    });
                }
            }
        }

        non_empty(&cfg.name, &cfg.description, entries)
    }

    /// Standalone dimension cubes, skipping names owned by a fact.
    pub fn dimension_catalog(&self, cubes: &[GeneratedCube]) -> Option<ViewDefinition> {
        let cfg: &DimensionCatalogViewSettings = &self.settings.dimension_catalog;

        let selected: Vec<ViewCube> = cubes
            .iter()
            .filter(|c| c.role() == TableRole::Dimension)
            .filter(|c| !matches_any(c.name(), &cfg.excluded_patterns))
            .take(cfg.max_cubes)
            .map(|c| prefixed_all(c.name()))
            .collect();

        non_empty(&cfg.name, &cfg.description, selected)
    }
}

fn prefixed_all(cube: &str) -> ViewCube {
    ViewCube {
        join_path: cube.to_string(),
        includes: IncludeSelector::All,
        prefix: Some(ViewPrefix::CubeName),
    }
}

fn non_empty(name: &str, description: &str, cubes: Vec<ViewCube>) -> Option<ViewDefinition> {
    if cubes.is_empty() {
        return None;
    }
    Some(ViewDefinition {
        name: name.to_string(),
        description: description.to_string(),
        cubes,
    })
}
