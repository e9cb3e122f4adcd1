//! End-to-end generation from table metadata to cubes and views.
//!
//! ```text
//! SchemaDescriptor → Classify → Measures / Dimensions / Segments / Joins
//!                  → Pre-aggregations (facts) → GeneratedCube
//! all cubes (barrier) → Domain → Views → Validation
//! ```
//!
//! Every table is processed on its own. A table that fails is recorded in
//! [`GenerationOutput::failures`] and the rest carry on.
//!
//! # Example
//!
//! ```ignore
//! use cubesmith::config::Settings;
//! use cubesmith::generate::{Generator, TableInput};
//!
//! let generator = Generator::new(&Settings::default())?;
//! let output = generator.generate(&[TableInput::new(orders)]);
//! for cube in &output.cubes {
//!     println!("{} ({})", cube.name(), cube.role());
//! }
//! ```

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Settings, SettingsError};
use crate::inference::{sanitize_name, ColumnTypeMapper, DomainDetector, TableClassifier};
use crate::metadata::{DescriptorError, SampleRow, SchemaDescriptor, SchemaSource, SourceError};
use crate::model::{CubeDefinition, CubeMetadata, GeneratedCube, TableRole, ViewDefinition};
use crate::synthesis::{
    DescriptionProvider, DescriptionRequest, Describer, DimensionSynthesizer, JoinResolver,
    MeasureSynthesizer, PreAggregationPlanner, SegmentSynthesizer, ViewComposer,
};
use crate::validation::{ModelValidator, ValidationError};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Cube name '{cube}' from table '{table}' is already taken by table '{existing}'")]
    DuplicateCube {
        cube: String,
        table: String,
        existing: String,
    },
}

pub type GenerateResult<T> = Result<T, GenerateError>;

// ============================================================================
// Input / Result Types
// ============================================================================

/// One table to generate a cube from.
#[derive(Debug, Clone)]
pub struct TableInput {
    pub descriptor: SchemaDescriptor,
    /// Representative rows, only ever shown to the description provider.
    pub samples: Vec<SampleRow>,
}

impl TableInput {
    pub fn new(descriptor: SchemaDescriptor) -> Self {
        Self {
            descriptor,
            samples: Vec::new(),
        }
    }

    pub fn with_samples(mut self, samples: Vec<SampleRow>) -> Self {
        self.samples = samples;
        self
    }
}

/// Validation problems for one artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub artifact: String,
    #[serde(serialize_with = "as_messages")]
    pub errors: Vec<ValidationError>,
}

fn as_messages<S: Serializer>(errors: &[ValidationError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// A table that produced no cube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFailure {
    pub table: String,
    pub reason: String,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub tables: usize,
    pub cubes: usize,
    pub views: usize,
    /// Cube count per role name.
    pub roles: BTreeMap<String, usize>,
    pub failures: usize,
    /// Total validation errors across cubes and views.
    pub validation_errors: usize,
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    /// In input order.
    pub cubes: Vec<GeneratedCube>,
    pub views: Vec<ViewDefinition>,
    pub domain: String,
    pub cube_issues: Vec<ValidationIssue>,
    pub view_issues: Vec<ValidationIssue>,
    pub failures: Vec<TableFailure>,
    pub stats: GenerationStats,
}

impl GenerationOutput {
    /// Cube definitions without their classification metadata.
    pub fn cube_definitions(&self) -> impl Iterator<Item = &CubeDefinition> {
        self.cubes.iter().map(|c| &c.cube)
    }

    pub fn cube(&self, name: &str) -> Option<&GeneratedCube> {
        self.cubes.iter().find(|c| c.name() == name)
    }

    pub fn view(&self, name: &str) -> Option<&ViewDefinition> {
        self.views.iter().find(|v| v.name == name)
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.cube_issues.is_empty() && self.view_issues.is_empty()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Runs the full pipeline with components built from one [`Settings`].
#[derive(Debug, Clone)]
pub struct Generator {
    describer: Describer,
    classifier: TableClassifier,
    measures: MeasureSynthesizer,
    dimensions: DimensionSynthesizer,
    segments: SegmentSynthesizer,
    joins: JoinResolver,
    pre_aggregations: PreAggregationPlanner,
    domains: DomainDetector,
    views: ViewComposer,
    validator: ModelValidator,
}

impl Generator {
    /// Generator using template descriptions.
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        Self::build(settings, Describer::templates())
    }

    /// Generator using `provider` for descriptions, with template fallback.
    pub fn with_provider(
        settings: &Settings,
        provider: Arc<dyn DescriptionProvider>,
    ) -> Result<Self, SettingsError> {
        Self::build(settings, Describer::with_provider(provider))
    }

    fn build(settings: &Settings, describer: Describer) -> Result<Self, SettingsError> {
        let types = ColumnTypeMapper::new(&settings.types);

        Ok(Self {
            classifier: TableClassifier::new(settings.classification.clone()),
            measures: MeasureSynthesizer::new(
                settings.measures.clone(),
                types.clone(),
                describer.clone(),
            ),
            dimensions: DimensionSynthesizer::new(
                settings.dimensions.clone(),
                types.clone(),
                describer.clone(),
            ),
            segments: SegmentSynthesizer::new(settings.segments.clone()),
            joins: JoinResolver::new(),
            pre_aggregations: PreAggregationPlanner::new(settings.pre_aggregations.clone(), types),
            domains: DomainDetector::new(settings.domains.clone()),
            views: ViewComposer::new(settings.views.clone()),
            validator: ModelValidator::new(&settings.validation)?,
            describer,
        })
    }

    pub fn classifier(&self) -> &TableClassifier {
        &self.classifier
    }

    pub fn validator(&self) -> &ModelValidator {
        &self.validator
    }

    /// Build the cube for one table.
    pub fn generate_cube(
        &self,
        table: &SchemaDescriptor,
        samples: &[SampleRow],
    ) -> Result<GeneratedCube, DescriptorError> {
        table.check()?;

        let role = self.classifier.classify(table);
        let description = self.describer.describe(&DescriptionRequest::Cube {
            table,
            role,
            samples,
        });

        let cube = CubeDefinition {
            name: sanitize_name(&table.name),
            sql_table: table.qualified_name(),
            description,
            measures: self.measures.synthesize(table, role),
            dimensions: self.dimensions.synthesize(table),
            segments: self.segments.synthesize(table),
            joins: self.joins.resolve(table),
            pre_aggregations: self.pre_aggregations.plan(table, role),
        };

        info!(
            cube = %cube.name,
            role = %role,
            measures = cube.measures.len(),
            dimensions = cube.dimensions.len(),
            "generated cube"
        );

        Ok(GeneratedCube {
            cube,
            metadata: CubeMetadata {
                role,
                source_table: table.qualified_name(),
                column_count: table.columns.len(),
                foreign_key_count: table.foreign_keys.len(),
            },
        })
    }

    /// Generate cubes for every table, then the domain and views.
    pub fn generate(&self, tables: &[TableInput]) -> GenerationOutput {
        let mut cubes: Vec<GeneratedCube> = Vec::new();
        let mut failures = Vec::new();
        let mut taken: HashSet<String> = HashSet::new();

        for input in tables {
            let table = &input.descriptor;
            match self.generate_cube(table, &input.samples) {
                Ok(generated) if !taken.insert(generated.cube.name.clone()) => {
                    let existing = cubes
                        .iter()
                        .find(|c| c.name() == generated.name())
                        .map(|c| c.metadata.source_table.clone())
                        .unwrap_or_default();
                    let error = GenerateError::DuplicateCube {
                        cube: generated.cube.name,
                        table: table.qualified_name(),
                        existing,
                    };
                    warn!(table = %table.name, error = %error, "skipping table");
                    failures.push(TableFailure {
                        table: table.name.clone(),
                        reason: error.to_string(),
                    });
                }
                Ok(generated) => cubes.push(generated),
                Err(e) => {
                    warn!(table = %table.name, error = %e, "skipping table");
                    failures.push(TableFailure {
                        table: table.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Barrier: everything below needs the complete cube list
        let domain = self.domains.detect(cubes.iter().map(|c| &c.cube));
        let views = self.views.compose(&cubes);

        let cube_issues: Vec<ValidationIssue> = cubes
            .iter()
            .filter_map(|c| issue(&c.cube.name, self.validator.validate_cube(&c.cube)))
            .collect();
        let view_issues: Vec<ValidationIssue> = views
            .iter()
            .filter_map(|v| issue(&v.name, self.validator.validate_view(v)))
            .collect();

        let mut roles: BTreeMap<String, usize> = TableRole::ALL
            .iter()
            .map(|r| (r.to_string(), 0))
            .collect();
        for cube in &cubes {
            *roles.entry(cube.role().to_string()).or_default() += 1;
        }

        let stats = GenerationStats {
            tables: tables.len(),
            cubes: cubes.len(),
            views: views.len(),
            roles,
            failures: failures.len(),
            validation_errors: cube_issues
                .iter()
                .chain(view_issues.iter())
                .map(|i| i.errors.len())
                .sum(),
        };

        info!(
            cubes = stats.cubes,
            views = stats.views,
            domain = %domain,
            failures = stats.failures,
            "generation finished"
        );

        GenerationOutput {
            cubes,
            views,
            domain,
            cube_issues,
            view_issues,
            failures,
            stats,
        }
    }

    /// Fetch every table in `schema` from `source` and generate.
    ///
    /// Tables the source cannot describe become failures. Only a failure to
    /// list the schema at all is returned as an error.
    pub async fn generate_from_source<S>(
        &self,
        source: &S,
        schema: &str,
        sample_limit: usize,
    ) -> GenerateResult<GenerationOutput>
    where
        S: SchemaSource + ?Sized,
    {
        let described = source.describe_all(schema).await?;

        let mut inputs = Vec::new();
        let mut fetch_failures = Vec::new();

        for (table, result) in described {
            match result {
                Ok(descriptor) => {
                    let samples = if sample_limit == 0 {
                        Vec::new()
                    } else {
                        source
                            .sample_rows(schema, &table, sample_limit)
                            .await
                            .unwrap_or_else(|e| {
                                warn!(table = %table, error = %e, "could not fetch sample rows");
                                Vec::new()
                            })
                    };
                    inputs.push(TableInput::new(descriptor).with_samples(samples));
                }
                Err(e) => {
                    warn!(table = %table, error = %e, "could not describe table");
                    fetch_failures.push(TableFailure {
                        table,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut output = self.generate(&inputs);
        output.stats.tables += fetch_failures.len();
        output.stats.failures += fetch_failures.len();
        fetch_failures.append(&mut output.failures);
        output.failures = fetch_failures;

        Ok(output)
    }
}

fn issue(artifact: &str, result: Result<(), Vec<ValidationError>>) -> Option<ValidationIssue> {
    match result {
        Ok(()) => None,
        Err(errors) => {
            warn!(artifact = %artifact, errors = errors.len(), "validation failed");
            Some(ValidationIssue {
                artifact: artifact.to_string(),
                errors,
            })
        }
    }
}
