use proptest::prelude::*;
use querylite::{SortSpec, Value, sorted};
use serde_json::json;

fn rows(pairs: &[(i32, i32)]) -> Vec<Value> {
    pairs.iter().map(|(a, b)| Value::from(json!({"a": a, "b": b}))).collect()
}

fn key(v: &Value, f: &str) -> f64 {
    v.get(f).as_f64().unwrap_or(f64::NAN)
}

fn mixed() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(json!(null)),
        any::<bool>().prop_map(|b| json!(b)),
        (-50i32..50).prop_map(|n| json!(n)),
        (-50i32..50).prop_map(|n| json!(n.to_string())),
        "[a-zA-Z]{0,3}".prop_map(|s| json!(s)),
        Just(json!([1, 2])),
        Just(json!({"k": 1})),
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 128,
        .. proptest::test_runner::Config::default()
    })]

    #[test]
    fn prop_multi_key_sort_non_decreasing(v in proptest::collection::vec((any::<i32>(), any::<i32>()), 0..50)) {
        let out = sorted(rows(&v), &SortSpec::new().asc("a").asc("b"));
        prop_assert_eq!(out.len(), v.len());
        for w in out.windows(2) {
            let (a0, b0, a1, b1) = (key(&w[0], "a"), key(&w[0], "b"), key(&w[1], "a"), key(&w[1], "b"));
            prop_assert!(a0 < a1 || (a0 == a1 && b0 <= b1));
        }
    }

    #[test]
    fn prop_desc_reverses_distinct_keys(v in proptest::collection::btree_set(any::<i32>(), 0..40)) {
        let pairs: Vec<(i32, i32)> = v.iter().map(|a| (*a, 0)).collect();
        let asc = sorted(rows(&pairs), &SortSpec::new().asc("a"));
        let mut desc = sorted(rows(&pairs), &SortSpec::new().desc("a"));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn prop_resort_is_identity(v in proptest::collection::vec((0i32..5, any::<i32>()), 0..40)) {
        let spec = SortSpec::new().desc("a");
        let once = sorted(rows(&v), &spec);
        let twice = sorted(once.clone(), &spec);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_mixed_types_keep_every_element(v in proptest::collection::vec(mixed(), 0..40)) {
        let items: Vec<Value> = v.iter().enumerate().map(|(i, x)| Value::from(json!({"x": x, "i": i}))).collect();
        let out = sorted(items, &SortSpec::new().asc("x"));
        let mut seen: Vec<usize> = out
            .iter()
            .filter_map(|r| r.get("i").as_f64())
            .map(|n| n as usize)
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..v.len()).collect::<Vec<_>>());
        let nulls = out.iter().skip_while(|r| !r.get("x").eq(&Value::Null)).count();
        prop_assert_eq!(nulls, v.iter().filter(|x| x.is_null()).count());
    }
}
