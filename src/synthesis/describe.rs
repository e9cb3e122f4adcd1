//! Description text for cubes, measures and dimensions.
//!
//! Synthesizers only talk to a [`Describer`]. It forwards to whichever
//! [`DescriptionProvider`] is active and falls back to the deterministic
//! templates when that provider errors or returns nothing, so generation
//! never depends on an external text service being up.

use inflector::Inflector;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::inference::title;
use crate::metadata::{ColumnDescriptor, SampleRow, SchemaDescriptor};
use crate::model::{AggregationKind, TableRole, ValueKind};

/// What a description is being requested for.
#[derive(Debug, Clone, Copy)]
pub enum DescriptionRequest<'a> {
    Cube {
        table: &'a SchemaDescriptor,
        role: TableRole,
        samples: &'a [SampleRow],
    },
    Measure {
        table: &'a SchemaDescriptor,
        name: &'a str,
        aggregation: AggregationKind,
        column: Option<&'a str>,
    },
    Dimension {
        table: &'a SchemaDescriptor,
        column: &'a ColumnDescriptor,
        kind: ValueKind,
    },
}

impl DescriptionRequest<'_> {
    /// Short label used in log messages.
    pub fn subject(&self) -> String {
        match self {
            DescriptionRequest::Cube { table, .. } => format!("cube {}", table.name),
            DescriptionRequest::Measure { table, name, .. } => {
                format!("measure {}.{}", table.name, name)
            }
            DescriptionRequest::Dimension { table, column, .. } => {
                format!("dimension {}.{}", table.name, column.name)
            }
        }
    }
}

/// Errors a description provider may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescribeError {
    #[error("Description service unavailable: {0}")]
    Unavailable(String),

    #[error("Description generation failed: {0}")]
    Failed(String),
}

/// A source of description text.
pub trait DescriptionProvider: Send + Sync {
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String, DescribeError>;
}

/// Deterministic template descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateDescriptions;

impl TemplateDescriptions {
    pub fn render(request: &DescriptionRequest<'_>) -> String {
        match request {
            DescriptionRequest::Cube { table, .. } => {
                format!("Data cube for {} analysis", title(&table.name))
            }
            DescriptionRequest::Measure {
                name,
                aggregation,
                column,
                ..
            } => match (aggregation, column) {
                (AggregationKind::Count, None) => "Total number of records".to_string(),
                (AggregationKind::CountDistinct, _) if *name == "count_distinct" => {
                    "Count of unique records".to_string()
                }
                (kind, Some(column)) => {
                    format!("{} of {}", kind.as_str().to_sentence_case(), column)
                }
                (kind, None) => format!("{} of records", kind.as_str().to_sentence_case()),
            },
            DescriptionRequest::Dimension { column, .. } => {
                format!("{} dimension", title(&column.name))
            }
        }
    }
}

impl DescriptionProvider for TemplateDescriptions {
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String, DescribeError> {
        Ok(Self::render(request))
    }
}

/// Deterministic descriptions that read the table role and common column
/// names. Measures and generic cubes use the plain templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAwareDescriptions;

impl RoleAwareDescriptions {
    pub fn render(request: &DescriptionRequest<'_>) -> String {
        match request {
            DescriptionRequest::Cube { table, role, .. } => {
                let name = title(&table.name);
                match role {
                    TableRole::Fact => format!("{} transaction and metrics data", name),
                    TableRole::Dimension => format!("{} master data and attributes", name),
                    TableRole::Junction => format!("{} relationship mapping data", name),
                    TableRole::Generic => TemplateDescriptions::render(request),
                }
            }
            DescriptionRequest::Dimension { column, .. } => describe_column(&column.name),
            DescriptionRequest::Measure { .. } => TemplateDescriptions::render(request),
        }
    }
}

fn describe_column(name: &str) -> String {
    let lower = name.to_lowercase();

    if let Some(entity) = lower.strip_suffix("_id").filter(|e| !e.is_empty()) {
        return format!("Unique {} identifier", title(entity));
    }
    if lower.contains("date") || lower.contains("time") {
        return format!("Date/time when {} occurred", title(name).to_lowercase());
    }

    match lower.as_str() {
        "status" | "state" => "Current status or state".to_string(),
        "name" | "title" => "Display name or title".to_string(),
        _ if lower.contains("zip") || lower.contains("postal") => "Postal/ZIP code".to_string(),
        _ if lower.contains("city") => "City location".to_string(),
        _ if lower.contains("state") && !lower.contains("status") => {
            "State/province location".to_string()
        }
        _ => format!("{} attribute", title(name)),
    }
}

impl DescriptionProvider for RoleAwareDescriptions {
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String, DescribeError> {
        Ok(Self::render(request))
    }
}

/// Adapts a closure into a [`DescriptionProvider`].
///
/// This is the hook for an external text-generation service.
pub struct CallbackDescriptions<F> {
    callback: F,
}

impl<F> CallbackDescriptions<F>
where
    F: Fn(&DescriptionRequest<'_>) -> Result<String, DescribeError> + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> DescriptionProvider for CallbackDescriptions<F>
where
    F: Fn(&DescriptionRequest<'_>) -> Result<String, DescribeError> + Send + Sync,
{
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String, DescribeError> {
        (self.callback)(request)
    }
}

/// The description capability handed to every synthesizer.
#[derive(Clone, Default)]
pub struct Describer {
    provider: Option<Arc<dyn DescriptionProvider>>,
}

impl fmt::Debug for Describer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Describer")
            .field("pluggable", &self.provider.is_some())
            .finish()
    }
}

impl Describer {
    /// Templates only.
    pub fn templates() -> Self {
        Self { provider: None }
    }

    /// Use `provider`, falling back to templates on failure.
    pub fn with_provider(provider: Arc<dyn DescriptionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn describe(&self, request: &DescriptionRequest<'_>) -> String {
        let Some(provider) = &self.provider else {
            return TemplateDescriptions::render(request);
        };

        match provider.describe(request) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(subject = %request.subject(), "description provider returned empty text, using template");
                TemplateDescriptions::render(request)
            }
            Err(e) => {
                warn!(subject = %request.subject(), error = %e, "description provider failed, using template");
                TemplateDescriptions::render(request)
            }
        }
    }
}
