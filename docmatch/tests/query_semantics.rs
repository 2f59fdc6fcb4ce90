mod common;

use anyhow::Result;
use common::query;
use serde_json::{json, Value};

#[test]
fn empty_query_matches_any_context() -> Result<()> {
    let q = query(json!({}));
    for context in [json!({}), json!({ "a": 1 }), json!({ "nested": { "deep": [1, 2, 3] } })] {
        assert!(q.test(&context)?);
    }
    Ok(())
}

#[test]
fn business_hours() -> Result<()> {
    let q = query(json!({
        "now.isoTime": { "$gt": "10:00", "$lt": "18:00" },
        "now.isoDate": { "$not": { "$in": ["2020-01-01"] } }
    }));

    assert!(q.test(&json!({ "now": { "isoTime": "13:00", "isoDate": "2020-05-21" } }))?);
    assert!(!q.test(&json!({ "now": { "isoTime": "19:30", "isoDate": "2020-05-21" } }))?);
    assert!(!q.test(&json!({ "now": { "isoTime": "13:00", "isoDate": "2020-01-01" } }))?);
    Ok(())
}

#[test]
fn structural_equality_with_deep_copy() -> Result<()> {
    let samples = [
        json!(null),
        json!(true),
        json!(-12.5),
        json!("text"),
        json!([1, [2, [3]], { "a": null }]),
        json!({ "a": { "b": [1, 2, { "c": "d" }] }, "e": false }),
    ];
    for value in samples {
        let context = json!({ "field": value.clone() });
        assert!(query(json!({ "field": { "$eq": value.clone() } })).test(&context)?, "{}", value);
    }
    Ok(())
}

#[test]
fn object_shorthand_is_equality() -> Result<()> {
    let context = json!({ "config": { "x": 1 } });
    assert!(query(json!({ "config": { "x": 1 } })).test(&context)?);
    assert!(!query(json!({ "config": { "x": 1, "y": 2 } })).test(&context)?);
    Ok(())
}

#[test]
fn not_negates_expression() -> Result<()> {
    let expressions = [
        json!({ "$gt": 5 }),
        json!({ "$in": [1, 2, 3] }),
        json!(3),
        json!({ "$regex": "^1" }),
        json!({ "$ne": null }),
        json!({ "$gte": 1, "$lte": 3 }),
    ];
    let contexts = [json!({ "v": 1 }), json!({ "v": 3 }), json!({ "v": 10 }), json!({ "v": null }), json!({})];

    for expression in &expressions {
        for context in &contexts {
            let plain = query(json!({ "v": expression })).test(context)?;
            let negated = query(json!({ "v": { "$not": expression } })).test(context)?;
            assert_eq!(plain, !negated, "{} against {}", expression, context);
        }
    }
    Ok(())
}

#[test]
fn string_number_coercion() -> Result<()> {
    assert!(query(json!({ "code": "137" })).test(&json!({ "code": 137 }))?);
    assert!(query(json!({ "code": 137 })).test(&json!({ "code": "137" }))?);
    assert!(query(json!({ "code": { "$eq": "137" } })).test(&json!({ "code": 137 }))?);
    assert!(!query(json!({ "code": "138" })).test(&json!({ "code": 137 }))?);
    Ok(())
}

#[test]
fn missing_path() -> Result<()> {
    let context = json!({ "a": { "b": 1 } });
    let mut q = query(json!({ "a.c.d": null }));
    assert!(!q.test(&context)?);

    q.set_undefined_equals_null(true);
    assert!(q.test(&context)?);
    Ok(())
}

#[test]
fn explicit_null_is_not_missing() -> Result<()> {
    let context = json!({ "a": null });
    assert!(query(json!({ "a": null })).test(&context)?);
    assert!(!query(json!({ "b": null })).test(&context)?);
    assert!(query(json!({ "b": { "$ne": null } })).test(&context)?);
    Ok(())
}

#[test]
fn array_containment() -> Result<()> {
    let context = json!({ "arr": [10, 20, 30] });
    assert!(query(json!({ "arr": 20 })).test(&context)?);
    assert!(query(json!({ "arr": { "$eq": [10, 20, 30] } })).test(&context)?);
    assert!(!query(json!({ "arr": { "$eq": [1, 2] } })).test(&context)?);
    assert!(!query(json!({ "arr": 40 })).test(&context)?);
    Ok(())
}

#[test]
fn regex_options() -> Result<()> {
    let context = json!({ "name": "ABC" });
    assert!(query(json!({ "name": { "$regex": "abc", "$options": "i" } })).test(&context)?);
    assert!(!query(json!({ "name": { "$regex": "abc" } })).test(&context)?);
    // flags may come before the pattern
    assert!(query(json!({ "name": { "$options": "i", "$regex": "^a" } })).test(&context)?);
    Ok(())
}

#[test]
fn paths_with_indexes() -> Result<()> {
    let context = json!({ "orders": [{ "items": [{ "sku": "A1" }, { "sku": "B2" }] }] });
    assert!(query(json!({ "orders[0].items[1].sku": "B2" })).test(&context)?);
    assert!(query(json!({ "orders.0.items.0.sku": "A1" })).test(&context)?);
    assert!(!query(json!({ "orders[1].items[0].sku": "A1" })).test(&context)?);
    Ok(())
}

#[test]
fn nested_boolean_operators() -> Result<()> {
    let q = query(json!({
        "$or": [
            { "$and": [{ "role": "admin" }, { "active": true }] },
            { "tags": "superuser" }
        ]
    }));
    assert!(q.test(&json!({ "role": "admin", "active": true }))?);
    assert!(!q.test(&json!({ "role": "admin", "active": false }))?);
    assert!(q.test(&json!({ "role": "guest", "tags": ["beta", "superuser"] }))?);
    Ok(())
}

#[test]
fn filter_many_contexts() {
    let q = query(json!({ "age": { "$gte": 30 } }));
    let people: Vec<Value> = vec![json!({ "name": "Alice", "age": 20 }), json!({ "name": "Bob", "age": 35 }), json!({ "name": "Carol", "age": 41 })];

    let passed: Vec<_> = q
        .filter(&people)
        .filter_map(|result| match result {
            docmatch::FilterResult::Pass(person) => person["name"].as_str(),
            _ => None,
        })
        .collect();
    assert_eq!(passed, vec!["Bob", "Carol"]);
}
