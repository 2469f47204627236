//! Tests for the path setter.

use immutree::{Path, Segment, Shape, UpdateError, Value, get, record, seq, set, set_in};

use crate::helpers::{assert_forked, assert_shared, at, sample_state};

#[test]
fn test_set_in_shares_untouched_branches() {
    let before = sample_state();
    let after = set_in(&before, "a.a1.x", 10).expect("Failed to set a.a1.x");

    assert_eq!(at(&after, "a.a1.x"), &Value::Int(10));
    assert_eq!(at(&before, "a.a1.x"), &Value::Int(1));

    assert!(!before.same(&after));
    assert_forked(&before, &after, "a");
    assert_forked(&before, &after, "a.a1");
    assert_shared(&before, &after, "a.a2");
    assert_shared(&before, &after, "b");
    assert_shared(&before, &after, "b.b1.b12");
}

#[test]
fn test_set_in_same_value_returns_input() {
    let before = sample_state();
    let after = set_in(&before, "a.a1.y", 2).expect("Failed to set a.a1.y");
    assert!(before.same(&after));

    // Writing a container back into its own slot is also a no-op
    let a2 = at(&before, "a.a2").clone();
    let after = set_in(&before, "a.a2", a2).expect("Failed to set a.a2");
    assert!(before.same(&after));
}

#[test]
fn test_set_in_equal_but_distinct_container_forks() {
    let before = sample_state();
    let after = set_in(&before, "a.a2", seq![1, 2, 3]).expect("Failed to set a.a2");

    assert_eq!(before, after);
    assert!(!before.same(&after));
    assert_forked(&before, &after, "a.a2");
    assert_shared(&before, &after, "a.a1");
}

#[test]
fn test_set_nan_over_nan_is_noop() {
    let before = record! { "n" => f64::NAN };
    let after = set(&before, "n", f64::NAN).expect("Failed to set NaN");
    assert!(before.same(&after));
}

#[test]
fn test_set_int_over_equal_float_is_noop() {
    let before = record! { "n" => 3.0 };
    let after = set(&before, "n", 3).expect("Failed to set 3");
    assert!(before.same(&after));
}

#[test]
fn test_set_is_idempotent() {
    let before = sample_state();
    let once = set_in(&before, "b.b1.b11", "changed").expect("First write failed");
    let twice = set_in(&once, "b.b1.b11", "changed").expect("Second write failed");
    assert!(once.same(&twice));
}

#[test]
fn test_set_in_creates_missing_records() {
    let after = set_in(&record! {}, "x.y.z", 1).expect("Failed to set x.y.z");
    assert_eq!(after, record! { "x" => record! { "y" => record! { "z" => 1 } } });
}

#[test]
fn test_set_in_creates_sequences_for_index_segments() {
    let after = set_in(&record! {}, "items[0].name", "first").expect("Failed to set items[0]");
    assert_eq!(after, record! { "items" => seq![record! { "name" => "first" }] });

    // Dotted numeric components are indices too
    let after = set_in(&record! {}, "items.2", true).expect("Failed to set items.2");
    assert_eq!(after, record! { "items" => seq![(), (), true] });
}

#[test]
fn test_set_in_replaces_scalar_intermediates() {
    let before = record! { "a" => 5 };
    let after = set_in(&before, "a.b", 1).expect("Failed to write through scalar");
    assert_eq!(after, record! { "a" => record! { "b" => 1 } });
}

#[test]
fn test_set_on_null_root_vivifies() {
    let after = set(&Value::Null, "k", "v").expect("Failed to set on null");
    assert_eq!(after, record! { "k" => "v" });

    let after = set(&Value::Null, 1, "v").expect("Failed to set index on null");
    assert_eq!(after, seq![(), "v"]);
}

#[test]
fn test_set_index_in_sequence() {
    let before = seq![record! { "id" => 1 }, record! { "id" => 2 }];
    let after = set_in(&before, "[1].id", 20).expect("Failed to set [1].id");

    assert_eq!(at(&after, "1.id"), &Value::Int(20));
    assert_shared(&before, &after, "0");
    assert_forked(&before, &after, "1");
}

#[test]
fn test_set_in_accepts_built_paths() {
    let path = Path::new().key("a").key("a2").index(0);
    let after = set_in(&sample_state(), &path, 100).expect("Failed to set built path");
    assert_eq!(at(&after, "a.a2"), &seq![100, 2, 3]);

    let segments = vec![Segment::from("c")];
    let after = set_in(&after, segments, 4).expect("Failed to set from segments");
    assert_eq!(get(&after, "c"), Some(&Value::Int(4)));
}

#[test]
fn test_set_in_preserves_shape() {
    let point = Shape::named("Point").with_default("z", 0);
    let before = Value::Record(immutree::Record::with_shape(
        point.clone(),
        [("x", 1), ("y", 2)],
    ));
    let after = set(&before, "x", 5).expect("Failed to set x");

    let record = after.as_record().expect("Expected a record");
    assert!(record.shape().same(&point));
    assert_eq!(record.get("z"), Some(&Value::Int(0)));
    assert!(!record.has_own("z"));
}

#[test]
fn test_set_in_empty_path_is_invalid() {
    let err = set_in(&sample_state(), "", 1).expect_err("Empty path should fail");
    assert!(err.is_path_error());
    assert!(matches!(
        err.as_update_error(),
        Some(UpdateError::InvalidPath { .. })
    ));
}

#[test]
fn test_set_in_key_on_sequence_is_invalid() {
    let err = set_in(&sample_state(), "a.a2.name", 1).expect_err("Key on sequence should fail");
    assert!(err.is_path_error());
    assert_eq!(err.path(), Some("a.a2.name"));
    assert_eq!(err.module(), "ops");
}

#[test]
fn test_set_in_huge_index_is_invalid() {
    let err = set(&seq![], usize::MAX, 1).expect_err("usize::MAX index should fail");
    assert!(err.is_path_error());

    let err = set_in(&record! {}, "a.4000000000000000000", 1).expect_err("Huge index should fail");
    assert!(err.is_path_error());
    assert_eq!(err.path(), Some("a[4000000000000000000]"));

    let err = set_in(&record! {}, "a.1000000000", 1).expect_err("Large gap should fail");
    assert!(err.is_path_error());
}

#[test]
fn test_set_in_gap_up_to_limit_is_padded() {
    let before = record! { "list" => seq![1] };
    let path = Path::new().key("list").index(1 + immutree::MAX_SEQUENCE_GAP);
    let after = set_in(&before, &path, 2).expect("Write at the gap limit failed");

    let list = at(&after, "list").as_sequence().expect("Expected a sequence");
    assert_eq!(list.len(), immutree::MAX_SEQUENCE_GAP + 2);
    assert_eq!(list.get(1), Some(&Value::Null));
}

#[test]
fn test_set_float_over_unrepresentable_int_writes() {
    let big = (1_i64 << 53) + 1;
    let before = record! { "n" => big };
    let after = set(&before, "n", (1_i64 << 53) as f64).expect("Failed to set n");

    assert!(!after.same(&before));
    assert_eq!(get(&after, "n"), Some(&Value::Float(9007199254740992.0)));
    assert_eq!(get(&before, "n"), Some(&Value::Int(big)));
}
