use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use dictdesc::core::Reflect;
use pretty_assertions::assert_eq;

use crate::{
    Fixture,
    models::{Customer, Line, Order, Person},
};

#[test]
fn test_none_body_makes_no_source_calls() {
    let fixture = Fixture::new();
    let mut body: Option<Order> = None;

    fixture.annotator.process(&mut body, "en");

    assert!(body.is_none());
    assert_eq!(fixture.source.calls(), 0);
}

#[test]
fn test_vec_body() {
    let fixture = Fixture::new();
    let mut body = vec![Line::new("pending"), Line::new("shipped")];

    fixture.annotator.process(&mut body, "en");

    assert_eq!(body[0].status_desc, "Pending");
    assert_eq!(body[1].status_desc, "Shipped");
}

#[test]
fn test_map_bodies() {
    let fixture = Fixture::new();

    let mut by_id: HashMap<u32, Line> = HashMap::new();
    by_id.insert(1, Line::new("pending"));
    by_id.insert(2, Line::new("shipped"));
    fixture.annotator.process(&mut by_id, "en");
    assert_eq!(by_id[&1].status_desc, "Pending");
    assert_eq!(by_id[&2].status_desc, "Shipped");

    let mut by_name: BTreeMap<String, Vec<Line>> = BTreeMap::new();
    by_name.insert("a".to_string(), vec![Line::new("pending")]);
    fixture.annotator.process(&mut by_name, "zh-TW");
    assert_eq!(by_name["a"][0].status_desc, "待处理");
}

#[test]
fn test_heterogeneous_collection() {
    let fixture = Fixture::new();
    let mut body: Vec<Box<dyn Reflect>> = vec![
        Box::new(Line::new("shipped")),
        Box::new(Person::new("f")),
    ];

    fixture.annotator.process(&mut body, "en");

    let line = body[0].field("status_desc").and_then(|f| f.as_text());
    let person = body[1].field("gender_desc").and_then(|f| f.as_text());
    assert_eq!(line, Some("Shipped"));
    assert_eq!(person, Some("Female"));
}

#[test]
fn test_nested_objects_and_collections() {
    let fixture = Fixture::new();
    let mut order = Order::new("shipped");
    order.customer = Some(Customer {
        name: "Ada".to_string(),
        gender: Some("f".to_string()),
        label: None,
    });
    order.lines = vec![Line::new("pending"), Line::new("shipped")];

    fixture.annotator.process(&mut order, "zh-CN");

    assert_eq!(order.status_desc, "Shipped");
    assert_eq!(order.audit.gender_desc, "Male");
    assert_eq!(order.customer.as_ref().unwrap().label.as_deref(), Some("女"));
    assert_eq!(order.lines[0].status_desc, "待处理");
    assert_eq!(order.lines[1].status_desc, "Shipped");
}

#[test]
fn test_equal_but_distinct_objects_are_each_processed() {
    let fixture = Fixture::new();
    let mut body = vec![Person::new("m"), Person::new("m")];

    fixture.annotator.process(&mut body, "en");

    assert_eq!(body[0].gender_desc, "Male");
    assert_eq!(body[1].gender_desc, "Male");
    assert_eq!(fixture.source.calls(), 2);
}

#[test]
fn test_same_shared_object_is_processed_once() {
    let fixture = Fixture::new();
    let shared = Person::shared("f");
    let mut body = vec![Arc::clone(&shared), Arc::clone(&shared)];

    fixture.annotator.process(&mut body, "en");

    assert_eq!(shared.lock().unwrap().gender_desc, "Female");
    assert_eq!(fixture.source.calls(), 1);
}
