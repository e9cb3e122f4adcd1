//! Table role and domain inference.
//!
//! This module provides the heuristics that read raw table metadata and
//! decide what a table *is*, before any artifact is generated.
//!
//! # Architecture
//!
//! Classification works in two phases:
//!
//! 1. **Name matching** - Fact, dimension and junction name patterns, first match wins
//! 2. **Column signals** - Type ratios, foreign key count and column-name scores
//!    checked against configured thresholds
//!
//! Domain detection runs once all cubes exist and matches cube names against
//! each domain profile's table vocabulary.
//!
//! # Example
//!
//! ```ignore
//! use cubesmith::inference::TableClassifier;
//!
//! let classifier = TableClassifier::new(settings.classification.clone());
//! let role = classifier.classify(&descriptor);
//! ```

mod classifier;
mod domain;
pub mod naming;
pub mod patterns;
mod type_mapper;

pub use classifier::{Classification, ClassificationReason, ColumnSignals, TableClassifier};
pub use domain::{DomainDetector, GENERIC_DOMAIN};
pub use naming::{sanitize_name, title};
pub use patterns::{first_match, matches_any, PatternRule};
pub use type_mapper::ColumnTypeMapper;

/// Score contributions used by the classifier's fallback comparison.
pub mod weights {
    /// Column name contains a fact/dimension column pattern.
    pub const NAME_MATCH: u32 = 2;
    /// Column type is numeric (fact) or text (dimension).
    pub const TYPE_MATCH: u32 = 1;
}
