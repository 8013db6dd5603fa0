//! Attribute metadata and resolved attribute references.
//!
//! Model metadata is handed to the compiler explicitly through an
//! [`AttributeLookup`]; nothing here is global. An [`AttributeRef`] is what a
//! condition key resolves to: optional table prefix, association path,
//! attribute name and the physical column it maps to.

use std::collections::HashMap;
use std::fmt;

use super::types::DataType;

/// Table qualifier placed before every attribute of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// Table alias, quoted as an identifier.
    Table(String),
    /// Pre-quoted SQL written verbatim (`"yolo"."User"`).
    Raw(String),
}

/// Declared metadata of one model attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMeta {
    /// Logical attribute name used in condition keys.
    pub name: String,
    /// Physical column name when it differs from `name`.
    pub field: Option<String>,
    pub ty: Option<DataType>,
    /// Owning table, used when the attribute itself is a comparison operand.
    pub table: Option<String>,
}

impl AttributeMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            ty: None,
            table: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_type(mut self, ty: DataType) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Column written to SQL.
    pub fn column_name(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.name)
    }
}

/// Read-only attribute metadata source.
pub trait AttributeLookup: fmt::Debug + Send + Sync {
    fn attribute(&self, name: &str) -> Option<&AttributeMeta>;
}

/// Attribute table keyed by logical name.
#[derive(Debug, Clone, Default)]
pub struct ModelAttributes {
    attributes: HashMap<String, AttributeMeta>,
}

impl ModelAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, meta: AttributeMeta) -> Self {
        self.insert(meta);
        self
    }

    pub fn insert(&mut self, meta: AttributeMeta) {
        self.attributes.insert(meta.name.clone(), meta);
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl AttributeLookup for ModelAttributes {
    fn attribute(&self, name: &str) -> Option<&AttributeMeta> {
        self.attributes.get(name)
    }
}

/// A resolved column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRef {
    pub table: Option<Prefix>,
    /// Association segments leading to the attribute's table.
    pub path: Vec<String>,
    pub name: String,
    pub field: Option<String>,
    pub ty: Option<DataType>,
    /// Set for `$a.b$` keys, which may reach into eagerly joined tables.
    pub cross_join: bool,
}

impl AttributeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            path: Vec::new(),
            name: name.into(),
            field: None,
            ty: None,
            cross_join: false,
        }
    }

    pub fn with_prefix(mut self, prefix: Option<Prefix>) -> Self {
        self.table = prefix;
        self
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    pub fn with_type(mut self, ty: Option<DataType>) -> Self {
        self.ty = ty;
        self
    }

    /// Copy physical name and type from declared metadata.
    pub fn with_meta(mut self, meta: &AttributeMeta) -> Self {
        self.field = meta.field.clone();
        if meta.ty.is_some() {
            self.ty = meta.ty.clone();
        }
        self
    }

    pub fn column_name(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.name)
    }
}

impl From<&AttributeMeta> for AttributeRef {
    fn from(meta: &AttributeMeta) -> Self {
        AttributeRef::new(meta.name.clone())
            .with_prefix(meta.table.clone().map(Prefix::Table))
            .with_meta(meta)
    }
}
