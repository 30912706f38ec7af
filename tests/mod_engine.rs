use querylite::{Engine, EngineConfig, FindQuery, SortSpec, Value};
use serde_json::json;

fn items() -> Vec<Value> {
    (1..=6).map(|i| Value::from(json!({"n": i, "odd": i % 2 == 1}))).collect()
}

#[test]
fn engine_mirrors_free_functions() {
    let engine = Engine::default();
    let q = FindQuery::new(Value::from(json!({"odd": true}))).order_by(SortSpec::new().desc("n"));
    assert_eq!(engine.find_many(&q, &items()), querylite::find_many(&q, &items()));
    assert_eq!(engine.find_unique(&q, &items()), querylite::find_unique(&q, &items()));
    assert_eq!(engine.find_first(&q, &items()), querylite::find_first(&q, &items()));
    assert_eq!(engine.count(&q, &items()), 3);
}

#[test]
fn cache_counts_hits_and_clears() {
    let engine = Engine::default();
    let c = Value::from(json!({"n": {"gt": 2}}));
    for record in items() {
        let _ = engine.matches(&c, &record);
    }
    let m = engine.cache_metrics();
    assert_eq!(m.misses, 1);
    assert_eq!(m.hits, 5);
    engine.clear_cache();
    let _ = engine.matches(&c, &items()[0]);
    assert_eq!(engine.cache_metrics().misses, 2);
}

#[test]
fn compile_reports_depth_errors() {
    let engine = Engine::new(EngineConfig { max_criteria_depth: Some(2), ..EngineConfig::default() });
    assert!(engine.compile(&Value::from(json!({"a": {"gt": 1}}))).is_ok());
    assert!(engine.compile(&Value::from(json!({"a": {"b": {"gt": 1}}}))).is_err());
    let res = engine.find_many(&FindQuery::new(Value::from(json!({"n": {"not": {"not": {"equals": 1}}}}))), &items());
    assert!(res.data.is_empty());
}

#[test]
fn non_record_where_matches_nothing() {
    let engine = Engine::default();
    assert_eq!(engine.count(&FindQuery::new(Value::from(json!([1]))), &items()), 0);
    assert!(!engine.matches(&Value::Null, &items()[0]));
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = std::sync::Arc::new(Engine::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || engine.count(&FindQuery::new(Value::from(json!({"odd": false}))), &items()))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 3);
    }
    assert_eq!(engine.cache_metrics().misses + engine.cache_metrics().hits, 4);
}
