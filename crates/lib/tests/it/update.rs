//! Tests for the updater and path-scoped merges.

use immutree::{
    MergeConfig, UpdateError, Value, merge_deep_in, merge_in, record, seq, try_update_in, update,
    update_in,
};

use crate::helpers::{assert_forked, assert_shared, at, sample_state};

#[test]
fn test_update_receives_current_value() {
    let state = record! { "count" => 1 };
    let next = update(&state, "count", |current| {
        Value::from(current.and_then(Value::as_int).unwrap_or(0) + 1)
    })
    .expect("Update failed");
    assert_eq!(next, record! { "count" => 2 });
}

#[test]
fn test_update_receives_none_for_missing_key() {
    let mut seen = Some(Value::Null);
    let next = update(&record! {}, "missing", |current| {
        seen = current.cloned();
        Value::from("created")
    })
    .expect("Update failed");

    assert_eq!(seen, None);
    assert_eq!(next, record! { "missing" => "created" });
}

#[test]
fn test_update_in_shares_siblings() {
    let before = sample_state();
    let after = update_in(&before, "b.b1.b11", |current| {
        let text = current.and_then(Value::as_text).unwrap_or_default();
        Value::from(format!("{text}!"))
    })
    .expect("update_in failed");

    assert_eq!(at(&after, "b.b1.b11"), &Value::from("text!"));
    assert_forked(&before, &after, "b.b1");
    assert_shared(&before, &after, "b.b1.b12");
    assert_shared(&before, &after, "a");
}

#[test]
fn test_update_in_returning_current_is_noop() {
    let before = sample_state();
    let after = update_in(&before, "a.a1", |current| {
        current.cloned().unwrap_or_default()
    })
    .expect("update_in failed");
    assert!(after.same(&before));
}

#[test]
fn test_update_in_missing_path_creates_containers() {
    let after = update_in(&record! {}, "list[0]", |current| {
        assert!(current.is_none());
        Value::from(1)
    })
    .expect("update_in failed");
    assert_eq!(after, record! { "list" => seq![1] });
}

#[test]
fn test_try_update_in_propagates_transform_error() {
    let before = sample_state();
    let err = try_update_in(&before, "a.a1", |_| {
        Err(UpdateError::NotAnArray {
            path: "a.a1".to_string(),
            found: "record",
        }
        .into())
    })
    .expect_err("Transform error should propagate");
    assert!(err.is_array_error());
}

#[test]
fn test_update_in_empty_path_is_invalid() {
    let err = update_in(&sample_state(), "", |_| Value::Null).expect_err("Empty path should fail");
    assert!(err.is_path_error());
}

#[test]
fn test_merge_in_merges_at_path() {
    let before = sample_state();
    let after = merge_in(&before, "a.a1", &record! { "z" => 3 }, &MergeConfig::new())
        .expect("merge_in failed");

    assert_eq!(at(&after, "a.a1"), &record! { "x" => 1, "y" => 2, "z" => 3 });
    assert_shared(&before, &after, "a.a2");
    assert_shared(&before, &after, "b");
}

#[test]
fn test_merge_in_missing_path_takes_source() {
    let source = record! { "k" => 1 };
    let after = merge_in(&record! {}, "x.y", &source, &MergeConfig::new()).expect("merge_in failed");
    assert_eq!(after, record! { "x" => record! { "y" => record! { "k" => 1 } } });
    assert!(at(&after, "x.y").same(&source));
}

#[test]
fn test_merge_deep_in_shares_nested() {
    let before = sample_state();
    let after = merge_deep_in(
        &before,
        "b",
        &record! { "b1" => record! { "b13" => 1 } },
        &MergeConfig::new(),
    )
    .expect("merge_deep_in failed");

    assert_eq!(at(&after, "b.b1.b13"), &Value::Int(1));
    assert_eq!(at(&after, "b.b1.b11"), &Value::from("text"));
    assert_shared(&before, &after, "b.b1.b12");
}

#[test]
fn test_merge_in_rejects_scalar_target() {
    let err = merge_in(&sample_state(), "c", &record! { "k" => 1 }, &MergeConfig::new())
        .expect_err("Scalar merge target should fail");
    assert!(err.is_merge_error());
}
