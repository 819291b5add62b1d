//! Structural model of host-produced preview descriptors
//!
//! The host hands over previews as loosely typed records: a type tag plus
//! named fields, some of which are view factories. Nothing here assumes a
//! fixed schema; readers walk field paths and report what they found instead.

use std::fmt;
use std::sync::Arc;

use crate::catalog::View;
use crate::error::AdaptError;

/// Host-side factory for a preview body.
pub type ViewFactory = Arc<dyn Fn() -> View + Send + Sync>;

/// Instantiates a descriptor's payload. May fail on the host side.
pub type MakePreview = Arc<dyn Fn() -> Result<Record, AdaptError> + Send + Sync>;

#[derive(Clone)]
pub enum Field {
    Str(String),
    Int(i64),
    Bool(bool),
    Record(Record),
    Factory(ViewFactory),
}

impl Field {
    fn kind(&self) -> &'static str {
        match self {
            Field::Str(_) => "string",
            Field::Int(_) => "integer",
            Field::Bool(_) => "bool",
            Field::Record(_) => "record",
            Field::Factory(_) => "factory",
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Str(value) => write!(f, "{value:?}"),
            Field::Int(value) => write!(f, "{value}"),
            Field::Bool(value) => write!(f, "{value}"),
            Field::Record(record) => record.fmt(f),
            Field::Factory(_) => f.write_str("<factory>"),
        }
    }
}

/// A tagged bag of named fields, in declaration order.
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Field)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    pub fn with_str(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, Field::Str(value.into()))
    }

    pub fn with_record(self, name: impl Into<String>, record: Record) -> Self {
        self.with(name, Field::Record(record))
    }

    pub fn with_factory<F>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> View + Send + Sync + 'static,
    {
        self.with(name, Field::Factory(Arc::new(factory)))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, field)| field)
    }

    /// Follow `path` through nested records.
    pub fn lookup(&self, path: &[&str]) -> Result<&Field, AdaptError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(AdaptError::MissingField {
                path: String::new(),
            });
        };

        let mut current = self;
        for (depth, name) in parents.iter().enumerate() {
            current = match current.field(name) {
                Some(Field::Record(inner)) => inner,
                Some(other) => {
                    return Err(AdaptError::FieldType {
                        path: path[..=depth].join("."),
                        expected: "record",
                        found: other.kind(),
                    })
                }
                None => {
                    return Err(AdaptError::MissingField {
                        path: path[..=depth].join("."),
                    })
                }
            };
        }

        current.field(last).ok_or_else(|| AdaptError::MissingField {
            path: path.join("."),
        })
    }

    pub fn record_at(&self, path: &[&str]) -> Result<&Record, AdaptError> {
        match self.lookup(path)? {
            Field::Record(record) => Ok(record),
            other => Err(type_mismatch(path, "record", other)),
        }
    }

    pub fn str_at(&self, path: &[&str]) -> Result<&str, AdaptError> {
        match self.lookup(path)? {
            Field::Str(value) => Ok(value),
            other => Err(type_mismatch(path, "string", other)),
        }
    }

    pub fn factory_at(&self, path: &[&str]) -> Result<ViewFactory, AdaptError> {
        match self.lookup(path)? {
            Field::Factory(factory) => Ok(Arc::clone(factory)),
            other => Err(type_mismatch(path, "factory", other)),
        }
    }
}

fn type_mismatch(path: &[&str], expected: &'static str, found: &Field) -> AdaptError {
    AdaptError::FieldType {
        path: path.join("."),
        expected,
        found: found.kind(),
    }
}

/// One preview as discovered by the host: a source location plus a payload
/// that is instantiated lazily.
#[derive(Clone)]
pub struct PreviewDescriptor {
    file_id: String,
    line: u32,
    column: u32,
    make_preview: MakePreview,
}

impl PreviewDescriptor {
    pub fn new<F>(file_id: impl Into<String>, line: u32, column: u32, make_preview: F) -> Self
    where
        F: Fn() -> Result<Record, AdaptError> + Send + Sync + 'static,
    {
        Self {
            file_id: file_id.into(),
            line,
            column,
            make_preview: Arc::new(make_preview),
        }
    }

    /// Descriptor whose payload is already built.
    pub fn from_record(file_id: impl Into<String>, line: u32, column: u32, record: Record) -> Self {
        Self::new(file_id, line, column, move || Ok(record.clone()))
    }

    /// File identifier, `"{module}/{path}"`.
    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Leading component of the file identifier.
    pub fn module(&self) -> &str {
        self.file_id.split('/').next().unwrap_or_default()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn instantiate(&self) -> Result<Record, AdaptError> {
        (self.make_preview)()
    }
}

impl fmt::Debug for PreviewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewDescriptor")
            .field("file_id", &self.file_id)
            .field("line", &self.line)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new("outer")
            .with_str("displayName", "Title")
            .with_record(
                "preview",
                Record::new("inner").with_record(
                    "structure",
                    Record::new("structure").with_factory("makeBody", || View::text("body")),
                ),
            )
    }

    #[test]
    fn test_lookup_follows_nested_records() {
        let record = sample();
        assert_eq!(record.str_at(&["displayName"]).unwrap(), "Title");
        assert_eq!(record.record_at(&["preview"]).unwrap().type_name(), "inner");

        let factory = record.factory_at(&["preview", "structure", "makeBody"]).unwrap();
        assert_eq!(factory(), View::text("body"));
    }

    #[test]
    fn test_lookup_reports_missing_path_prefix() {
        let record = sample();
        let err = record.factory_at(&["preview", "nope", "makeBody"]).err().unwrap();
        assert_eq!(
            err,
            AdaptError::MissingField {
                path: "preview.nope".into()
            }
        );
    }

    #[test]
    fn test_lookup_reports_kind_mismatch() {
        let record = sample();
        let err = record.str_at(&["preview"]).unwrap_err();
        assert_eq!(
            err,
            AdaptError::FieldType {
                path: "preview".into(),
                expected: "string",
                found: "record"
            }
        );

        let err = record.factory_at(&["displayName", "makeBody"]).err().unwrap();
        assert!(matches!(err, AdaptError::FieldType { .. }));
    }

    #[test]
    fn test_descriptor_module_is_first_path_component() {
        let descriptor = PreviewDescriptor::from_record("Components/Buttons/Primary.rs", 3, 1, sample());
        assert_eq!(descriptor.module(), "Components");
        assert_eq!(descriptor.instantiate().unwrap().type_name(), "outer");
    }
}
