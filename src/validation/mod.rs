//! Structural validation of generated cubes and views.
//!
//! Checks shape only: required fields, naming convention, and count
//! limits. Nothing here is thrown; callers get the full list of problems
//! and decide whether to keep the artifact.

use regex::Regex;
use std::collections::HashSet;

use crate::config::{SettingsError, ValidationSettings};
use crate::model::{CubeDefinition, ViewDefinition};

/// Validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field is empty.
    MissingField {
        entity_type: String,
        entity_name: String,
        field: String,
    },
    /// Name does not match the naming convention.
    InvalidName {
        entity_type: String,
        name: String,
        pattern: String,
    },
    /// More members than the configured limit.
    TooMany {
        entity_type: String,
        entity_name: String,
        member_type: String,
        count: usize,
        max: usize,
    },
    /// Non-count measure without a source column.
    UnsourcedMeasure { cube: String, measure: String },
    /// Duplicate name detected.
    DuplicateName {
        entity_type: String,
        owner: String,
        name: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField {
                entity_type,
                entity_name,
                field,
            } => {
                write!(f, "{} '{}' is missing {}", entity_type, entity_name, field)
            }
            ValidationError::InvalidName {
                entity_type,
                name,
                pattern,
            } => {
                write!(
                    f,
                    "{} name '{}' does not match naming convention {}",
                    entity_type, name, pattern
                )
            }
            ValidationError::TooMany {
                entity_type,
                entity_name,
                member_type,
                count,
                max,
            } => {
                write!(
                    f,
                    "{} '{}' has {} {} (maximum {})",
                    entity_type, entity_name, count, member_type, max
                )
            }
            ValidationError::UnsourcedMeasure { cube, measure } => {
                write!(
                    f,
                    "Measure '{}' in cube '{}' has no source column",
                    measure, cube
                )
            }
            ValidationError::DuplicateName {
                entity_type,
                owner,
                name,
            } => {
                write!(f, "Duplicate {} name in '{}': '{}'", entity_type, owner, name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates cubes and views against the configured limits.
#[derive(Debug, Clone)]
pub struct ModelValidator {
    naming: Regex,
    settings: ValidationSettings,
}

impl ModelValidator {
    pub fn new(settings: &ValidationSettings) -> Result<Self, SettingsError> {
        let naming = Regex::new(&settings.naming_pattern).map_err(|e| {
            SettingsError::InvalidConfig(format!(
                "validation.naming_pattern '{}': {}",
                settings.naming_pattern, e
            ))
        })?;

        Ok(Self {
            naming,
            settings: settings.clone(),
        })
    }

    /// Validate a cube.
    pub fn validate_cube(&self, cube: &CubeDefinition) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let owner = display_name(&cube.name);

        // Cube identity
        if cube.name.is_empty() {
            errors.push(missing("Cube", &owner, "a name"));
        } else {
            self.check_name("Cube", &cube.name, &mut errors);
        }
        if cube.sql_table.trim().is_empty() {
            errors.push(missing("Cube", &owner, "a table source"));
        }

        // Measures
        let mut seen = HashSet::new();
        for measure in &cube.measures {
            if measure.name.is_empty() {
                errors.push(missing("Measure", &owner, "a name"));
                continue;
            }
            self.check_name("Measure", &measure.name, &mut errors);
            if !seen.insert(measure.name.as_str()) {
                errors.push(ValidationError::DuplicateName {
                    entity_type: "measure".to_string(),
                    owner: owner.clone(),
                    name: measure.name.clone(),
                });
            }
            let unsourced = measure.sql.as_deref().map_or(true, |s| s.trim().is_empty());
            if unsourced && !measure.aggregation.is_record_count() {
                errors.push(ValidationError::UnsourcedMeasure {
                    cube: owner.clone(),
                    measure: measure.name.clone(),
                });
            }
        }

        // Dimensions
        let mut seen = HashSet::new();
        for dimension in &cube.dimensions {
            if dimension.name.is_empty() {
                errors.push(missing("Dimension", &owner, "a name"));
                continue;
            }
            if dimension.sql.trim().is_empty() {
                errors.push(missing("Dimension", &dimension.name, "a source column"));
            }
            if !seen.insert(dimension.name.as_str()) {
                errors.push(ValidationError::DuplicateName {
                    entity_type: "dimension".to_string(),
                    owner: owner.clone(),
                    name: dimension.name.clone(),
                });
            }
        }

        // Limits
        self.check_limit(&owner, "measures", cube.measures.len(), self.settings.max_measures, &mut errors);
        self.check_limit(
            &owner,
            "dimensions",
            cube.dimensions.len(),
            self.settings.max_dimensions,
            &mut errors,
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a view.
    pub fn validate_view(&self, view: &ViewDefinition) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let owner = display_name(&view.name);

        if view.name.is_empty() {
            errors.push(missing("View", &owner, "a name"));
        } else {
            self.check_name("View", &view.name, &mut errors);
        }

        if view.cubes.is_empty() {
            errors.push(missing("View", &owner, "at least one cube"));
        }
        for entry in &view.cubes {
            if entry.join_path.trim().is_empty() {
                errors.push(missing("View", &owner, "a join path on every cube"));
            }
        }

        if view.cubes.len() > self.settings.max_cubes_per_view {
            errors.push(ValidationError::TooMany {
                entity_type: "View".to_string(),
                entity_name: owner.clone(),
                member_type: "cubes".to_string(),
                count: view.cubes.len(),
                max: self.settings.max_cubes_per_view,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_name(&self, entity_type: &str, name: &str, errors: &mut Vec<ValidationError>) {
        if !self.naming.is_match(name) {
            errors.push(ValidationError::InvalidName {
                entity_type: entity_type.to_string(),
                name: name.to_string(),
                pattern: self.settings.naming_pattern.clone(),
            });
        }
    }

    fn check_limit(
        &self,
        cube: &str,
        member_type: &str,
        count: usize,
        max: usize,
        errors: &mut Vec<ValidationError>,
    ) {
        if count > max {
            errors.push(ValidationError::TooMany {
                entity_type: "Cube".to_string(),
                entity_name: cube.to_string(),
                member_type: member_type.to_string(),
                count,
                max,
            });
        }
    }
}

fn missing(entity_type: &str, entity_name: &str, field: &str) -> ValidationError {
    ValidationError::MissingField {
        entity_type: entity_type.to_string(),
        entity_name: entity_name.to_string(),
        field: field.to_string(),
    }
}

fn display_name(name: &str) -> String {
    if name.is_empty() {
        "<unnamed>".to_string()
    } else {
        name.to_string()
    }
}
