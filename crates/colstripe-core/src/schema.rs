//! Schema model for nested records. Pure data; no value semantics here.
//!
//! A schema is a tree of [`Field`]s rooted at a group. Field order within a
//! group is significant: it fixes traversal order and hence the order of
//! everything downstream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How many times a field may occur within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    Required,
    Optional,
    Repeated,
}

/// Scalar types a leaf field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Utf8,
    Binary,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Utf8 => "utf8",
            ScalarKind::Binary => "binary",
        };
        f.write_str(name)
    }
}

/// Leaf scalar or group of child fields. Closed; there is no dynamic
/// dispatch on runtime types anywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Leaf(ScalarKind),
    Group(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub cardinality: Cardinality,
    pub kind: FieldKind,
}

impl Field {
    pub fn leaf(name: impl Into<String>, cardinality: Cardinality, scalar: ScalarKind) -> Self {
        Self {
            name: name.into(),
            cardinality,
            kind: FieldKind::Leaf(scalar),
        }
    }

    pub fn group(name: impl Into<String>, cardinality: Cardinality, children: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            cardinality,
            kind: FieldKind::Group(children),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, FieldKind::Group(_))
    }
}

/// Dotted path of a field relative to its parent's path.
///
/// The root group's own name is not part of any path: paths start at the
/// root's children (`DocId`, `Links.Backward`, ...). Both the schema's leaf
/// listing and the traversal go through this one function, so the column
/// join key cannot drift from the schema's path set.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// A validated schema: a group-rooted field tree with globally unique
/// dotted paths. Constructed once and shared across all traversals.
///
/// Deliberately not `Deserialize`: loaders deserialize the root [`Field`]
/// and go through [`Schema::new`] so validation cannot be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    root: Field,
}

impl Schema {
    /// Validate and wrap a root group.
    ///
    /// Sibling names must be unique and must not contain `.`, which together
    /// make every dotted path globally unique by construction.
    pub fn new(root: Field) -> Result<Self> {
        let FieldKind::Group(children) = &root.kind else {
            return Err(Error::NonGroupRoot(root.name));
        };
        validate_group(children, "")?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Field {
        &self.root
    }

    /// The root group's ordered child fields.
    pub fn fields(&self) -> &[Field] {
        match &self.root.kind {
            FieldKind::Group(children) => children,
            FieldKind::Leaf(_) => unreachable!("Schema::new rejects leaf roots"),
        }
    }

    /// All leaf paths in schema (traversal) order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaf_paths(self.fields(), "", &mut paths);
        paths
    }
}

fn validate_group(children: &[Field], parent_path: &str) -> Result<()> {
    for (i, field) in children.iter().enumerate() {
        if field.name.is_empty() || field.name.contains('.') {
            return Err(Error::InvalidFieldName(field.name.clone()));
        }
        if children[..i].iter().any(|f| f.name == field.name) {
            return Err(Error::DuplicateField(join_path(parent_path, &field.name)));
        }
        if let FieldKind::Group(grandchildren) = &field.kind {
            validate_group(grandchildren, &join_path(parent_path, &field.name))?;
        }
    }
    Ok(())
}

fn collect_leaf_paths(children: &[Field], parent_path: &str, out: &mut Vec<String>) {
    for field in children {
        let path = join_path(parent_path, &field.name);
        match &field.kind {
            FieldKind::Leaf(_) => out.push(path),
            FieldKind::Group(grandchildren) => collect_leaf_paths(grandchildren, &path, out),
        }
    }
}
