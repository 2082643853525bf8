//! JSON-schema validation of response bodies
//!
//! Schemas are addressed by reference, e.g. `schemas/booking-data.json` or
//! just `booking-data.json`. The draft is taken from the schema's `$schema`
//! keyword; schemas without one are treated as draft-04.
//!
//! Validation collects *every* violation instead of stopping at the first,
//! and [`assert_valid_schema`] reports them at the caller's source location.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use jsonschema::error::ValidationErrorKind;
use serde_json::Value;
use tracing::debug;

use crate::{
    bundle,
    error::{Error, Result},
};

const SCHEMA_DIR: &str = "schemas";

const BUNDLED_SCHEMAS: &[(&str, &str)] = &[(
    "booking-data.json",
    include_str!("../resources/schemas/booking-data.json"),
)];

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value. For a missing required property
    /// this points at the property itself, e.g. `/firstname`.
    pub path: String,
    /// Schema keyword that failed, e.g. `required`, `type`, `pattern`
    pub kind: String,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {} ({})", path, self.message, self.kind)
    }
}

impl Violation {
    fn from_error(error: &jsonschema::ValidationError<'_>) -> Self {
        let instance_path = error.instance_path.to_string();
        let schema_path = error.schema_path.to_string();

        let path = match &error.kind {
            ValidationErrorKind::Required { property } => {
                let name = property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string());
                format!("{}/{}", instance_path, name)
            }
            _ => instance_path,
        };

        let kind = schema_path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("schema")
            .to_string();

        Self {
            path,
            kind,
            message: error.to_string(),
        }
    }
}

/// Outcome of validating one instance against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Schema reference the instance was checked against
    pub schema: String,
    /// All violations found; empty when the instance is valid
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no violation was found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations at exactly the given JSON pointer.
    pub fn at(&self, path: &str) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.path == path)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.schema)?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", violation)?;
        }
        f.write_str("]")
    }
}

#[derive(Debug, Clone)]
enum SchemaSource {
    Bundled,
    Directory(PathBuf),
}

/// Loads schemas by reference and validates JSON values against them.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    source: SchemaSource,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SchemaValidator {
    /// Validator over the schemas compiled into the crate.
    pub fn bundled() -> Self {
        Self {
            source: SchemaSource::Bundled,
        }
    }

    /// Validator reading `<dir>/<name>` on every call.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: SchemaSource::Directory(dir.into()),
        }
    }

    /// Validator over the `schemas/` directory of the resource set.
    pub fn from_resources() -> Self {
        Self::from_dir(bundle::resource_dir().join(SCHEMA_DIR))
    }

    /// Validate `instance` against the schema named by `schema_ref`.
    ///
    /// A schema violation is not an error: it is returned in the report.
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaNotFound`] if no schema with that name exists
    /// - [`Error::InvalidSchema`] if the schema is not valid JSON or cannot be
    ///   compiled
    pub fn validate(&self, schema_ref: &str, instance: &Value) -> Result<ValidationReport> {
        let name = schema_name(schema_ref)?;
        let raw = self.load(name, schema_ref)?;

        let schema: Value = serde_json::from_str(&raw).map_err(|e| Error::InvalidSchema {
            name: schema_ref.to_string(),
            message: e.to_string(),
        })?;

        let validator = compile(&schema).map_err(|e| Error::InvalidSchema {
            name: schema_ref.to_string(),
            message: e.to_string(),
        })?;

        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|error| Violation::from_error(&error))
            .collect();

        debug!(
            schema = %schema_ref,
            violations = violations.len(),
            "Validated instance against schema"
        );

        Ok(ValidationReport {
            schema: schema_ref.to_string(),
            violations,
        })
    }

    fn load(&self, name: &str, schema_ref: &str) -> Result<String> {
        match &self.source {
            SchemaSource::Bundled => BUNDLED_SCHEMAS
                .iter()
                .find(|(bundled, _)| *bundled == name)
                .map(|(_, raw)| (*raw).to_string())
                .ok_or_else(|| Error::SchemaNotFound(schema_ref.to_string())),
            SchemaSource::Directory(dir) => read_schema(dir, name, schema_ref),
        }
    }
}

fn read_schema(dir: &Path, name: &str, schema_ref: &str) -> Result<String> {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(raw) => Ok(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::SchemaNotFound(schema_ref.to_string()))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

/// Strip the optional `schemas/` prefix and reject anything escaping the
/// schema directory.
fn schema_name(schema_ref: &str) -> Result<&str> {
    let trimmed = schema_ref.trim().trim_start_matches('/');
    let name = trimmed
        .strip_prefix(SCHEMA_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(trimmed);

    if name.is_empty() || name.split('/').any(|segment| segment == "..") {
        return Err(Error::SchemaNotFound(schema_ref.to_string()));
    }
    Ok(name)
}

fn compile(
    schema: &Value,
) -> std::result::Result<jsonschema::Validator, jsonschema::ValidationError<'static>> {
    if schema.get("$schema").is_some() {
        jsonschema::validator_for(schema)
    } else {
        jsonschema::draft4::new(schema)
    }
}

/// Assert that `instance` satisfies the bundled schema `schema_ref`.
///
/// # Panics
///
/// Panics with `Schema validation failed - <violations>` when the instance is
/// invalid, or when the schema cannot be loaded. The panic is attributed to
/// the calling line.
#[track_caller]
pub fn assert_valid_schema(instance: &Value, schema_ref: &str) {
    assert_valid_schema_with(&SchemaValidator::bundled(), instance, schema_ref);
}

/// [`assert_valid_schema`] with an explicit validator.
#[track_caller]
pub fn assert_valid_schema_with(validator: &SchemaValidator, instance: &Value, schema_ref: &str) {
    match validator.validate(schema_ref, instance) {
        Ok(report) if report.is_valid() => {}
        Ok(report) => panic!("Schema validation failed - {}", report),
        Err(e) => panic!("Schema validation could not run - {}", e),
    }
}
