//! Column-striped output: one stripe of level-annotated values per leaf.

use serde::{Deserialize, Serialize};

use colstripe_core::{Scalar, Schema};

use crate::error::{Error, Result};

/// One leaf occurrence: the value (or `None` when this leaf, or an ancestor
/// of it, is absent), plus its repetition and definition levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub value: Option<Scalar>,
    pub repetition_level: u32,
    pub definition_level: u32,
}

impl ColumnRecord {
    pub fn new(value: Option<Scalar>, repetition_level: u32, definition_level: u32) -> Self {
        Self {
            value,
            repetition_level,
            definition_level,
        }
    }
}

/// The ordered sequence of [`ColumnRecord`]s for one leaf field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStripe {
    pub path: String,
    pub records: Vec<ColumnRecord>,
}

/// All stripes for one (or, after [`ColumnMap::append`], several) records,
/// keyed by leaf path.
///
/// Stripes are kept in a `Vec` in schema order with positional name lookup,
/// and the map is pre-seeded with every leaf path of the schema before any
/// traversal runs. The key set therefore always equals the schema's leaf
/// path set, no matter which fields the record populates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    columns: Vec<ColumnStripe>,
}

impl ColumnMap {
    /// An empty stripe per leaf path of `schema`, in schema order.
    pub fn for_schema(schema: &Schema) -> Self {
        Self {
            columns: schema
                .leaf_paths()
                .into_iter()
                .map(|path| ColumnStripe {
                    path,
                    records: Vec::new(),
                })
                .collect(),
        }
    }

    /// The stripe for `path`, if `path` names a leaf of the schema.
    pub fn column(&self, path: &str) -> Option<&[ColumnRecord]> {
        self.columns
            .iter()
            .find(|c| c.path == path)
            .map(|c| c.records.as_slice())
    }

    /// Leaf paths in schema order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnStripe> {
        self.columns.iter()
    }

    /// Number of leaf columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total column records across all stripes.
    pub fn total_records(&self) -> usize {
        self.columns.iter().map(|c| c.records.len()).sum()
    }

    pub(crate) fn push(&mut self, path: &str, record: ColumnRecord) {
        match self.columns.iter_mut().find(|c| c.path == path) {
            Some(stripe) => stripe.records.push(record),
            None => self.columns.push(ColumnStripe {
                path: path.to_string(),
                records: vec![record],
            }),
        }
    }

    /// Concatenate another record's stripes onto this map, column by column.
    ///
    /// This is the caller-side composition of multiple records into shared
    /// columns: split each record in a single fixed order and append each
    /// result in that same order. Both maps must cover the same leaf paths
    /// in the same order (i.e. come from the same schema).
    pub fn append(&mut self, other: ColumnMap) -> Result<()> {
        if !self.paths().eq(other.paths()) {
            return Err(Error::ColumnMismatch(format!(
                "left has {} columns, right has {} columns, or paths differ",
                self.len(),
                other.len()
            )));
        }
        for (stripe, mut incoming) in self.columns.iter_mut().zip(other.columns) {
            stripe.records.append(&mut incoming.records);
        }
        Ok(())
    }
}
