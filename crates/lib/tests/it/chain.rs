//! Tests for the chaining builder.

use immutree::{KeySelector, MergeConfig, Value, chain, record, seq};

use crate::helpers::{assert_shared, sample_state};

#[test]
fn test_chain_applies_steps_in_order() {
    let before = sample_state();
    let after = chain(before.clone())
        .set_in("a.a1.x", 10)
        .and_then(|c| c.merge_deep(&record! { "b" => record! { "b2" => 1 } }))
        .and_then(|c| c.concat("a.a2", seq![4]))
        .and_then(|c| c.without("c"))
        .expect("Chain failed")
        .value();

    assert_eq!(
        after,
        record! {
            "a" => record! {
                "a1" => record! { "x" => 10, "y" => 2 },
                "a2" => seq![1, 2, 3, 4],
            },
            "b" => record! {
                "b1" => record! { "b11" => "text", "b12" => record! { "deep" => true } },
                "b2" => 1,
            },
        }
    );
    assert_shared(&before, &after, "b.b1");
}

#[test]
fn test_chain_without_changes_keeps_identity() {
    let before = sample_state();
    let after = chain(before.clone())
        .set("c", 3)
        .and_then(|c| c.merge(&record! { "c" => 3 }, &MergeConfig::new()))
        .and_then(|c| c.without(KeySelector::keys(Vec::<String>::new())))
        .expect("Chain failed")
        .value();
    assert!(after.same(&before));
}

#[test]
fn test_chain_stops_at_first_error() -> immutree::Result<()> {
    let err = chain(sample_state())
        .set_in("a.a2.name", 1)
        .and_then(|c| c.set("c", 4))
        .expect_err("Chain should fail");
    assert!(err.is_path_error());

    // Errors compose with `?` in callers
    let value = chain(record! {}).set("k", 1)?.update("k", |v| {
        Value::from(v.and_then(Value::as_int).unwrap_or(0) * 10)
    })?;
    assert_eq!(value.peek(), &record! { "k" => 10 });
    Ok(())
}

#[test]
fn test_chain_sequence_steps() {
    let value = chain(seq![1, 2, 3, 4])
        .splice(1, 1, vec![Value::from(20)])
        .and_then(|c| c.slice(0, Some(3)))
        .and_then(|c| c.flat_map(|v, _| seq![v.clone(), v.clone()]))
        .expect("Chain failed");
    assert_eq!(Value::from(value), seq![1, 1, 20, 20, 3, 3]);
}

#[test]
fn test_chain_in_path_steps_write_back() {
    let state = record! { "list" => seq![1, 2, 3, 4, 5], "keep" => true };
    let value = chain(state)
        .slice_in("list", 1, Some(4))
        .and_then(|c| c.splice_in("list", 0, 1, Vec::new()))
        .and_then(|c| c.unshift("list", seq![0]))
        .and_then(|c| c.update_in("count", |_| Value::from(3)))
        .expect("Chain failed")
        .value();

    assert_eq!(
        value,
        record! { "list" => seq![0, 3, 4], "keep" => true, "count" => 3 }
    );
}

#[test]
fn test_chain_replace_steps() {
    let value = chain(record! { "a" => record! { "x" => 1, "y" => 2 }, "b" => 1 })
        .replace_deep(&record! { "a" => record! { "x" => 1 } })
        .and_then(|c| c.merge_deep_in("a", &record! { "z" => 3 }))
        .and_then(|c| c.merge_in("n", &record! { "k" => 1 }, &MergeConfig::new()))
        .and_then(|c| c.replace(&record! { "a" => 0, "n" => 0 }, &MergeConfig::new()))
        .expect("Chain failed")
        .value();

    assert_eq!(value, record! { "a" => 0, "n" => 0 });
}
