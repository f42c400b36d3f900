#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use sevlog_ops as ops;

#[test]
fn test_sequential_operations_do_not_leak() {
    {
        let _first = ops::begin("first").set("a", "1");
    }
    let _second = ops::begin("second").set("b", "2");

    let vars = ops::current_variables();
    assert_eq!(vars.get("op").map(String::as_str), Some("second"));
    assert!(!vars.contains_key("a"));
}

#[test]
fn test_threads_have_independent_stacks() {
    let _op = ops::begin("main-thread");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let _op = ops::begin(format!("worker-{i}")).set("worker", i);
                ops::current_variables()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let vars = handle.join().unwrap();
        assert_eq!(vars.get("op"), Some(&format!("worker-{i}")));
        assert_eq!(vars.get("root_op"), Some(&format!("worker-{i}")));
    }

    assert_eq!(
        ops::current_variables().get("op").map(String::as_str),
        Some("main-thread")
    );
}

proptest! {
    #[test]
    fn prop_op_and_root_op_track_innermost_and_outermost(
        names in prop::collection::vec("[a-z]{1,8}", 1..6)
    ) {
        let scopes: Vec<_> = names.iter().map(|n| ops::begin(n.clone())).collect();
        let vars = ops::current_variables();

        prop_assert_eq!(vars.get("op"), names.last());
        prop_assert_eq!(vars.get("root_op"), names.first());

        drop(scopes);
        prop_assert!(ops::current_variables().is_empty());
    }

    #[test]
    fn prop_last_write_wins_across_scopes(
        values in prop::collection::vec("[a-z0-9]{1,6}", 1..6)
    ) {
        let scopes: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ops::begin(format!("s{i}")).set("shared", v))
            .collect();

        let vars = ops::current_variables();
        prop_assert_eq!(vars.get("shared"), values.last());
        drop(scopes);
    }
}
