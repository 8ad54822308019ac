use dictdesc::{
    core::{AnnotatorOptions, Describe, MissPolicy},
    reflect,
};
use pretty_assertions::assert_eq;

use crate::{Fixture, Gender, OrderStatus, models::Order};

/// Description field without a registered companion.
struct Orphan {
    status_desc: String,
}

/// Companion holds a number, not a code string.
struct Numbered {
    status: u32,
    status_desc: String,
}

/// Explicit companion that does not exist.
struct Misnamed {
    status: String,
    text: String,
}

/// Description field that cannot hold text.
struct Counter {
    status: String,
    status_desc: u64,
}

/// One bad field next to a good one.
struct Mixed {
    status: String,
    status_desc: u64,
    gender: String,
    gender_desc: String,
}

/// Custom suffix.
struct Camel {
    status: String,
    status_text: String,
}

reflect!(Orphan { status_desc: dict(OrderStatus) });
reflect!(Numbered { status, status_desc: dict(OrderStatus) });
reflect!(Misnamed { status, text: dict(OrderStatus, state) });
reflect!(Counter { status, status_desc: dict(OrderStatus) });
reflect!(Mixed {
    status,
    status_desc: dict(OrderStatus),
    gender,
    gender_desc: dict(Gender),
});
reflect!(Camel { status, status_text: dict(OrderStatus) });

#[test]
fn test_missing_companion_leaves_field_untouched() {
    let fixture = Fixture::new();
    let mut orphan = Orphan {
        status_desc: "keep".to_string(),
    };
    let mut misnamed = Misnamed {
        status: "pending".to_string(),
        text: "keep".to_string(),
    };

    fixture.annotator.process(&mut orphan, "en");
    fixture.annotator.process(&mut misnamed, "en");

    assert_eq!(orphan.status_desc, "keep");
    assert_eq!(misnamed.text, "keep");
    assert_eq!(fixture.source.calls(), 0);
}

#[test]
fn test_non_string_companion_leaves_field_untouched() {
    let fixture = Fixture::new();
    let mut numbered = Numbered {
        status: 1,
        status_desc: "keep".to_string(),
    };

    fixture.annotator.process(&mut numbered, "en");

    assert_eq!(numbered.status, 1);
    assert_eq!(numbered.status_desc, "keep");
    assert_eq!(fixture.source.calls(), 0);
}

#[test]
fn test_non_text_description_field_is_skipped() {
    let fixture = Fixture::new();
    let mut counter = Counter {
        status: "pending".to_string(),
        status_desc: 7,
    };

    fixture.annotator.process(&mut counter, "en");

    assert_eq!(counter.status_desc, 7);
}

#[test]
fn test_one_bad_field_does_not_stop_the_rest() {
    let fixture = Fixture::new();
    let mut mixed = Mixed {
        status: "pending".to_string(),
        status_desc: 7,
        gender: "f".to_string(),
        gender_desc: String::new(),
    };

    fixture.annotator.process(&mut mixed, "en");

    assert_eq!(mixed.status_desc, 7);
    assert_eq!(mixed.gender_desc, "Female");
}

#[test]
fn test_inherited_fields_are_processed() {
    let fixture = Fixture::new();
    let mut order = Order::new("pending");

    fixture.annotator.process(&mut order, "en");

    assert_eq!(order.status_desc, "Pending");
    assert_eq!(order.audit.gender_desc, "Male");

    let names: Vec<&str> = Order::type_descriptor()
        .fields()
        .iter()
        .filter(|field| field.is_description())
        .map(|field| field.name())
        .collect();
    assert_eq!(names, vec!["gender_desc", "status_desc"]);
}

#[test]
fn test_unresolved_code_writes_empty_string() {
    let fixture = Fixture::new();
    let mut order = Order::new("cancelled");
    order.status_desc = "stale".to_string();

    fixture.annotator.process(&mut order, "en");

    assert_eq!(order.status_desc, "");
}

#[test]
fn test_miss_policy_code() {
    let fixture = Fixture::with_options(AnnotatorOptions {
        on_miss: MissPolicy::Code,
        ..Default::default()
    });
    let mut order = Order::new("cancelled");

    fixture.annotator.process(&mut order, "en");

    assert_eq!(order.status_desc, "cancelled");
}

#[test]
fn test_custom_description_suffix() {
    let fixture = Fixture::with_options(AnnotatorOptions {
        description_suffix: "_text".to_string(),
        ..Default::default()
    });
    let mut camel = Camel {
        status: "shipped".to_string(),
        status_text: String::new(),
    };

    fixture.annotator.process(&mut camel, "fr");

    assert_eq!(camel.status_text, "Shipped");
}
