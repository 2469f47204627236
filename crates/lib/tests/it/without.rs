//! Tests for key removal.

use immutree::{KeySelector, Record, Shape, UpdateError, Value, record, seq, without};

use crate::helpers::{assert_shared, sample_state};

fn numbers() -> Value {
    record! { "a" => 1, "b" => 2, "c" => 3, "d" => 4, "e" => 5 }
}

#[test]
fn test_without_keys() {
    let trimmed = without(&numbers(), ["a", "c", "e"]).expect("without failed");
    assert_eq!(trimmed, record! { "b" => 2, "d" => 4 });
}

#[test]
fn test_without_single_key() {
    let trimmed = without(&numbers(), "b").expect("without failed");
    assert_eq!(trimmed, record! { "a" => 1, "c" => 3, "d" => 4, "e" => 5 });

    let owned = without(&numbers(), String::from("a")).expect("without failed");
    assert_eq!(owned.as_record().map(Record::len), Some(4));
}

#[test]
fn test_without_predicate() {
    let odd = without(
        &numbers(),
        KeySelector::predicate(|value, _| value.as_int().is_some_and(|n| n % 2 == 0)),
    )
    .expect("without failed");
    assert_eq!(odd, record! { "a" => 1, "c" => 3, "e" => 5 });

    let by_key = without(&numbers(), KeySelector::predicate(|_, key| key > "b"))
        .expect("without failed");
    assert_eq!(by_key, record! { "a" => 1, "b" => 2 });
}

#[test]
fn test_without_numeric_key() {
    let indexed = record! { "0" => "zero", "1" => "one" };
    let trimmed = without(&indexed, 0).expect("without failed");
    assert_eq!(trimmed, record! { "1" => "one" });
}

#[test]
fn test_without_shares_remaining_values() {
    let before = sample_state();
    let after = without(&before, "c").expect("without failed");
    assert!(!after.same(&before));
    assert_shared(&before, &after, "a");
    assert_shared(&before, &after, "b");
}

#[test]
fn test_without_nothing_removed_returns_input() {
    let before = sample_state();
    assert!(without(&before, "missing").expect("without failed").same(&before));
    assert!(without(&before, Vec::<String>::new()).expect("without failed").same(&before));
    assert!(
        without(&before, KeySelector::predicate(|value, _| value.is_null()))
            .expect("without failed")
            .same(&before)
    );
}

#[test]
fn test_without_keeps_shape_and_inherited_entries() {
    let shape = Shape::named("Config").with_default("level", 1);
    let before = Value::Record(Record::with_shape(shape.clone(), [("level", 3), ("debug", 1)]));
    let after = without(&before, "level").expect("without failed");

    let record = after.as_record().expect("Expected a record");
    assert!(record.shape().same(&shape));
    assert!(!record.has_own("level"));
    // The inherited default shows through again
    assert_eq!(record.get("level"), Some(&Value::Int(1)));
}

#[test]
fn test_without_rejects_non_record() {
    let err = without(&seq![1, 2], "0").expect_err("Sequence should fail");
    assert!(err.is_record_error());
    assert_eq!(
        err.as_update_error(),
        Some(&UpdateError::NotARecord {
            operation: "without",
            found: "sequence",
        })
    );
}
