//! Schema-guided traversal computing repetition and definition levels.
//!
//! Level rules (Melnik et al., VLDB 2010):
//! - Repetition level: the count of repeated ancestors at which a new
//!   repetition begins. The first value of a repeated field continues the
//!   enclosing repetition context; every later value starts a new one at
//!   the field's own repeated depth.
//! - Definition level: the count of optional/repeated ancestors (including
//!   the field itself where applicable) actually present on the path.
//!   Required fields never contribute; their presence is guaranteed by the
//!   schema, not the data.

use colstripe_core::schema::join_path;
use colstripe_core::{Cardinality, Field, FieldKind, Record, Scalar, ScalarKind, Schema, Value};

use crate::column::{ColumnMap, ColumnRecord};
use crate::error::{Error, Result};

/// Level state threaded through the recursion. All zero at the root.
#[derive(Debug, Clone, Copy, Default)]
struct Levels {
    /// Repetition level inherited from the enclosing context.
    repetition: u32,
    /// Optional/repeated ancestors present on the path taken so far.
    definition: u32,
    /// Repeated ancestors strictly above the current field.
    repeated_depth: u32,
}

/// Shreds one record against its schema. One splitter per record; the
/// result is computed once and cached, so `split` is idempotent.
#[derive(Debug)]
pub struct Splitter<'a> {
    schema: &'a Schema,
    record: &'a Record,
    columns: Option<ColumnMap>,
}

impl<'a> Splitter<'a> {
    pub fn new(schema: &'a Schema, record: &'a Record) -> Self {
        Self {
            schema,
            record,
            columns: None,
        }
    }

    /// Walk the record once and return the column map; later calls return
    /// the cached result. On error no partial map is retained.
    pub fn split(&mut self) -> Result<&ColumnMap> {
        if self.columns.is_none() {
            self.columns = Some(split(self.schema, self.record)?);
        }
        match &self.columns {
            Some(columns) => Ok(columns),
            None => unreachable!("populated above"),
        }
    }
}

/// One-shot form of [`Splitter::split`]: shred `record` against `schema`
/// and return an owned column map.
pub fn split(schema: &Schema, record: &Record) -> Result<ColumnMap> {
    let mut columns = ColumnMap::for_schema(schema);
    traverse(schema.fields(), "", record, Levels::default(), &mut columns)?;

    #[cfg(feature = "tracing")]
    tracing::trace!(
        leaves = columns.len(),
        records = columns.total_records(),
        "record split"
    );

    Ok(columns)
}

fn traverse(
    fields: &[Field],
    parent_path: &str,
    record: &Record,
    levels: Levels,
    columns: &mut ColumnMap,
) -> Result<()> {
    for field in fields {
        let path = join_path(parent_path, &field.name);
        match field.cardinality {
            Cardinality::Repeated => {
                traverse_repeated(field, &path, record, levels, columns)?;
            }
            Cardinality::Optional => {
                traverse_optional(field, &path, record, levels, columns)?;
            }
            Cardinality::Required => {
                traverse_required(field, &path, record, levels, columns)?;
            }
        }
    }
    Ok(())
}

fn traverse_repeated(
    field: &Field,
    path: &str,
    record: &Record,
    levels: Levels,
    columns: &mut ColumnMap,
) -> Result<()> {
    let values = match record.get(&field.name) {
        None => &[][..],
        Some(Value::List(values)) => values.as_slice(),
        Some(other) => return Err(type_mismatch(path, "list", other)),
    };

    // An empty repeated field is absent: its own presence adds no
    // definition level.
    if values.is_empty() {
        mark_absent_subtree(field, path, levels.repetition, levels.definition, columns);
        return Ok(());
    }

    let definition = levels.definition + 1;
    for (i, value) in values.iter().enumerate() {
        // The first value continues the enclosing repetition context; each
        // later value starts a new repetition at this field's own depth.
        let repetition = if i == 0 {
            levels.repetition
        } else {
            levels.repeated_depth + 1
        };

        match (&field.kind, value) {
            (FieldKind::Group(children), Value::Group(child)) => {
                let child_levels = Levels {
                    repetition,
                    definition,
                    repeated_depth: levels.repeated_depth + 1,
                };
                traverse(children, path, child, child_levels, columns)?;
            }
            (FieldKind::Leaf(kind), Value::Scalar(scalar)) => {
                check_scalar_kind(path, *kind, scalar)?;
                columns.push(
                    path,
                    ColumnRecord::new(Some(scalar.clone()), repetition, definition),
                );
            }
            (FieldKind::Group(_), other) => return Err(type_mismatch(path, "group", other)),
            (FieldKind::Leaf(kind), other) => {
                return Err(type_mismatch(path, &kind.to_string(), other))
            }
        }
    }
    Ok(())
}

fn traverse_optional(
    field: &Field,
    path: &str,
    record: &Record,
    levels: Levels,
    columns: &mut ColumnMap,
) -> Result<()> {
    // Presence adds one definition level; absence never does.
    let value = record.get(&field.name);
    let definition = if value.is_some() {
        levels.definition + 1
    } else {
        levels.definition
    };

    match (&field.kind, value) {
        (FieldKind::Group(children), Some(Value::Group(child))) => {
            let child_levels = Levels {
                repetition: levels.repetition,
                definition,
                repeated_depth: levels.repeated_depth,
            };
            traverse(children, path, child, child_levels, columns)?;
        }
        (FieldKind::Group(_), None) => {
            mark_absent_subtree(field, path, levels.repetition, definition, columns);
        }
        (FieldKind::Leaf(kind), Some(Value::Scalar(scalar))) => {
            check_scalar_kind(path, *kind, scalar)?;
            columns.push(
                path,
                ColumnRecord::new(Some(scalar.clone()), levels.repetition, definition),
            );
        }
        (FieldKind::Leaf(_), None) => {
            columns.push(
                path,
                ColumnRecord::new(None, levels.repetition, definition),
            );
        }
        (FieldKind::Group(_), Some(other)) => return Err(type_mismatch(path, "group", other)),
        (FieldKind::Leaf(kind), Some(other)) => {
            return Err(type_mismatch(path, &kind.to_string(), other))
        }
    }
    Ok(())
}

fn traverse_required(
    field: &Field,
    path: &str,
    record: &Record,
    levels: Levels,
    columns: &mut ColumnMap,
) -> Result<()> {
    // Required fields never add a definition level.
    let Some(value) = record.get(&field.name) else {
        return Err(Error::MissingRequiredField {
            path: path.to_string(),
        });
    };

    match (&field.kind, value) {
        (FieldKind::Group(children), Value::Group(child)) => {
            traverse(children, path, child, levels, columns)?;
        }
        (FieldKind::Leaf(kind), Value::Scalar(scalar)) => {
            check_scalar_kind(path, *kind, scalar)?;
            columns.push(
                path,
                ColumnRecord::new(
                    Some(scalar.clone()),
                    levels.repetition,
                    levels.definition,
                ),
            );
        }
        (FieldKind::Group(_), other) => return Err(type_mismatch(path, "group", other)),
        (FieldKind::Leaf(kind), other) => return Err(type_mismatch(path, &kind.to_string(), other)),
    }
    Ok(())
}

/// Mark `field` and every leaf below it as absent, at the levels computed
/// at the point where the absence was detected. No instance data exists
/// below that point, so the levels never refine deeper.
fn mark_absent_subtree(
    field: &Field,
    path: &str,
    repetition: u32,
    definition: u32,
    columns: &mut ColumnMap,
) {
    match &field.kind {
        FieldKind::Leaf(_) => {
            columns.push(path, ColumnRecord::new(None, repetition, definition));
        }
        FieldKind::Group(children) => {
            for child in children {
                mark_absent_subtree(
                    child,
                    &join_path(path, &child.name),
                    repetition,
                    definition,
                    columns,
                );
            }
        }
    }
}

fn check_scalar_kind(path: &str, expected: ScalarKind, scalar: &Scalar) -> Result<()> {
    if scalar.kind() == expected {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: scalar.kind().to_string(),
        })
    }
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> Error {
    Error::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: actual.kind_name().to_string(),
    }
}
