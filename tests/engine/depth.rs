use std::time::{Duration, Instant};

use dictdesc::core::AnnotatorOptions;
use pretty_assertions::assert_eq;

use crate::{Fixture, models::Link};

#[test]
fn test_links_beyond_max_depth_are_untouched() {
    let fixture = Fixture::new();
    let mut head = Link::chain(15);

    fixture.annotator.process(&mut head, "en");

    let descriptions = head.descriptions();
    assert_eq!(descriptions.len(), 15);
    assert!(descriptions[..=10].iter().all(|d| *d == "Pending"));
    assert!(descriptions[11..].iter().all(|d| d.is_empty()));
}

#[test]
fn test_custom_max_depth() {
    let fixture = Fixture::with_options(AnnotatorOptions {
        max_depth: 2,
        ..Default::default()
    });
    let mut head = Link::chain(5);

    fixture.annotator.process(&mut head, "en");

    assert_eq!(head.descriptions(), vec!["Pending", "Pending", "Pending", "", ""]);
}

#[test]
fn test_long_chain_work_is_bounded_by_depth() {
    let fixture = Fixture::new();
    let mut head = Link::chain(100_000);

    let started = Instant::now();
    fixture.annotator.process(&mut head, "en");
    let elapsed = started.elapsed();

    // One hit per link at depth 0..=10.
    assert_eq!(fixture.source.calls(), 11);
    assert!(
        elapsed < Duration::from_millis(20),
        "processing took {:?}",
        elapsed
    );
}
