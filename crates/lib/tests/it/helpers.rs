use immutree::{Value, get, record, seq};

// ==========================
// FIXTURES
// ==========================

/// The nested fixture most engine tests start from.
///
/// `a.a1` and `b.b1` are independent branches so that tests can check which
/// one was forked by an update.
pub fn sample_state() -> Value {
    record! {
        "a" => record! {
            "a1" => record! { "x" => 1, "y" => 2 },
            "a2" => seq![1, 2, 3],
        },
        "b" => record! {
            "b1" => record! { "b11" => "text", "b12" => record! { "deep" => true } },
        },
        "c" => 3,
    }
}

/// A wide record with `width` scalar keys and one nested branch per key.
pub fn wide_state(width: usize) -> Value {
    let mut root = immutree::chain(record! {});
    for i in 0..width {
        root = root
            .set_in(format!("k{i}.value").as_str(), i)
            .expect("Failed to build wide state");
    }
    root.value()
}

// ==========================
// ASSERTIONS
// ==========================

/// Looks up `path`, panicking with the path when it is absent.
pub fn at<'a>(value: &'a Value, path: &str) -> &'a Value {
    get(value, path).unwrap_or_else(|| panic!("Expected a value at '{path}'"))
}

/// Asserts that `path` resolves to the same allocation in both values.
pub fn assert_shared(before: &Value, after: &Value, path: &str) {
    assert!(
        at(before, path).same(at(after, path)),
        "Expected '{path}' to be shared between versions"
    );
}

/// Asserts that `path` resolves to different allocations in the two values.
pub fn assert_forked(before: &Value, after: &Value, path: &str) {
    assert!(
        !at(before, path).same(at(after, path)),
        "Expected '{path}' to be copied in the new version"
    );
}
