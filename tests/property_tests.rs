//! Structural properties of the shredder output, checked over the
//! canonical documents.


use colstripe_core::{Record, Value};
use colstripe_split::{split, Error};
use test_documents::{doc_r1, doc_r2, document_schema};

#[test]
fn output_keys_equal_schema_leaf_paths_regardless_of_population() {
    let schema = document_schema();
    let sparse = Record::new().with("DocId", 1i64);
    for record in [doc_r1(), doc_r2(), sparse] {
        let columns = split(&schema, &record).unwrap();
        let paths: Vec<&str> = columns.paths().collect();
        assert_eq!(
            paths,
            schema.leaf_paths().iter().map(String::as_str).collect::<Vec<_>>()
        );
    }
}

#[test]
fn split_is_deterministic_byte_for_byte() {
    let schema = document_schema();
    let record = doc_r1();
    let first = serde_json::to_string(&split(&schema, &record).unwrap()).unwrap();
    let second = serde_json::to_string(&split(&schema, &record).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_absent_leaf_gets_exactly_one_null_record() {
    // Only DocId is populated: Links and Name are absent wholesale, so each
    // of the five leaves below them contributes exactly one null entry.
    let schema = document_schema();
    let columns = split(&schema, &Record::new().with("DocId", 1i64)).unwrap();
    for path in [
        "Links.Backward",
        "Links.Forward",
        "Name.Language.Code",
        "Name.Language.Country",
        "Name.Url",
    ] {
        let stripe = columns.column(path).unwrap();
        assert_eq!(stripe.len(), 1, "{path} should have one entry");
        assert_eq!(stripe[0].value, None, "{path} should be absent");
    }
}

#[test]
fn later_values_of_a_repeated_field_restart_at_its_own_depth() {
    // Name.Language sits under one repeated ancestor (Name), so every
    // Language value after the first repeats at level 2, regardless of
    // what its sibling fields produced.
    let schema = document_schema();
    let columns = split(&schema, &doc_r1()).unwrap();
    let codes = columns.column("Name.Language.Code").unwrap();
    assert_eq!(codes[1].repetition_level, 2);

    // Links.Forward sits under no repeated ancestor; later values repeat
    // at level 1.
    let forward = columns.column("Links.Forward").unwrap();
    assert_eq!(forward[1].repetition_level, 1);
    assert_eq!(forward[2].repetition_level, 1);
}

#[test]
fn required_leaves_never_contribute_definition_levels() {
    let schema = document_schema();
    let left = split(&schema, &doc_r1()).unwrap();
    let right = split(&schema, &doc_r1().with("DocId", 999i64)).unwrap();

    for (a, b) in left.iter().zip(right.iter()) {
        assert_eq!(a.path, b.path);
        let a_levels: Vec<(u32, u32)> = a
            .records
            .iter()
            .map(|r| (r.repetition_level, r.definition_level))
            .collect();
        let b_levels: Vec<(u32, u32)> = b
            .records
            .iter()
            .map(|r| (r.repetition_level, r.definition_level))
            .collect();
        assert_eq!(a_levels, b_levels);
    }
}

#[test]
fn appending_records_concatenates_stripes_in_record_order() {
    let schema = document_schema();
    let mut combined = split(&schema, &doc_r1()).unwrap();
    combined.append(split(&schema, &doc_r2()).unwrap()).unwrap();

    let doc_ids = combined.column("DocId").unwrap();
    assert_eq!(doc_ids.len(), 2);
    assert_eq!(doc_ids[0].value, Some(colstripe_core::Scalar::I64(10)));
    assert_eq!(doc_ids[1].value, Some(colstripe_core::Scalar::I64(20)));

    // r1 contributed three Forward values, r2 one.
    assert_eq!(combined.column("Links.Forward").unwrap().len(), 4);
}

#[test]
fn append_rejects_foreign_column_sets() {
    use colstripe_core::{Cardinality, Field, ScalarKind, Schema};

    let schema = document_schema();
    let other = Schema::new(Field::group(
        "Other",
        Cardinality::Required,
        vec![Field::leaf("X", Cardinality::Optional, ScalarKind::Int64)],
    ))
    .unwrap();

    let mut left = split(&schema, &doc_r1()).unwrap();
    let right = split(&other, &Record::new()).unwrap();
    assert!(matches!(left.append(right), Err(Error::ColumnMismatch(_))));
}

#[test]
fn traversal_never_mutates_the_record() {
    let schema = document_schema();
    let record = doc_r1();
    let before = record.clone();
    let _ = split(&schema, &record).unwrap();
    assert_eq!(record, before);
}

#[test]
fn empty_list_and_missing_entry_are_the_same_absence() {
    let schema = document_schema();
    let explicit = Record::new()
        .with("DocId", 1i64)
        .with("Name", Value::List(vec![]));
    let implicit = Record::new().with("DocId", 1i64);
    assert_eq!(
        split(&schema, &explicit).unwrap(),
        split(&schema, &implicit).unwrap()
    );
}
