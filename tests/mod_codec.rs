use querylite::query::{decode_json, encode_json, try_decode_json};
use querylite::{FindQuery, QueryError, SortSpec, Value, decode, encode, try_decode};
use serde_json::json;

#[test]
fn where_clause_round_trips() {
    let q = FindQuery::new(Value::from(json!({"name": {"equals": "x"}})));
    let back = decode(&encode(&q));
    assert_eq!(back, q);
    assert_eq!(serde_json::to_value(&back).unwrap(), json!({"where": {"name": {"equals": "x"}}}));
}

#[test]
fn full_query_round_trips() {
    let q = FindQuery::new(Value::from(json!({"age": {"between": [18, 65]}, "tags": {"some": "x"}})))
        .order_by(SortSpec::new().desc("age").asc("name"))
        .skip(3)
        .take(7);
    assert_eq!(decode(&encode(&q)), q);
}

#[test]
fn dates_degrade_to_iso_strings() {
    let when = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let filter: Value = [("at", Value::Date(when))].into_iter().collect();
    let back = decode(&encode(&FindQuery::new(filter)));
    assert_eq!(back.filter.get("at"), &Value::from("2023-11-14T22:13:20.000Z"));
}

#[test]
fn bad_input_falls_back() {
    assert_eq!(decode("not base64!"), FindQuery::default());
    assert_eq!(decode(&encode_json(&json!([1, 2]))), FindQuery::default());
    assert_eq!(decode(&encode_json(&json!({"take": 3}))), FindQuery::default());
    assert!(matches!(try_decode(&encode_json(&json!({"take": 3}))), Err(QueryError::MissingWhere)));
    assert!(matches!(try_decode_json("e30"), Err(QueryError::MissingWhere)));
    assert_eq!(decode_json(""), json!({"where": {}}));
}

#[test]
fn loose_where_values_survive() {
    let raw = json!({"where": {"a": 1}, "extra": "kept"});
    assert_eq!(decode_json(&encode_json(&raw)), raw);
    let q = decode(&encode_json(&raw));
    assert_eq!(q.filter, Value::from(json!({"a": 1})));
}

#[test]
fn malformed_paging_keeps_the_filter() {
    let people = [Value::from(json!({"role": "admin"})), Value::from(json!({"role": "guest"}))];
    let admins = Value::from(json!({"role": {"equals": "admin"}}));
    for extra in [json!({"take": "5"}), json!({"skip": -1}), json!({"orderBy": {"role": "sideways"}}), json!({"pagination": "first"})] {
        let mut raw = json!({"where": {"role": {"equals": "admin"}}});
        raw.as_object_mut().unwrap().extend(extra.as_object().unwrap().clone());
        let q = decode(&encode_json(&raw));
        assert_eq!(q, FindQuery::new(admins.clone()), "{raw}");
        assert_eq!(querylite::find_many(&q, &people).data, vec![people[0].clone()]);
    }
}

#[test]
fn well_typed_fields_survive_a_bad_neighbour() {
    let raw = json!({"where": {}, "orderBy": {"age": "desc"}, "distinct": "team", "take": "lots", "pagination": {"page": 2, "size": 3}});
    let q = decode(&encode_json(&raw));
    assert_eq!(q.order_by, Some(SortSpec::new().desc("age")));
    assert_eq!(q.distinct, Some(querylite::Distinct::Field("team".into())));
    assert_eq!(q.take, None);
    assert_eq!(q.pagination.and_then(|p| p.size), Some(3));
}
