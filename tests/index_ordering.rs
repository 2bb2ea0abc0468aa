use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use spanline::construct::Timespan;

fn span(start: i64, end: i64) -> Timespan<i64> {
    Timespan::between(start, end).expect("valid span")
}

fn point(t: i64) -> Timespan<i64> {
    Timespan::at(t)
}

fn hash_of<H: Hash>(value: &H) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn starts_dominate_ordering() {
    assert!(point(2) < point(3));
    assert!(span(1, 9) < point(2));
    assert!(point(4) > span(3, 5));
}

#[test]
fn point_sorts_before_same_start_span() {
    assert!(point(3) < span(3, 5));
    assert!(span(3, 5) > point(3));
}

#[test]
fn larger_end_sorts_greater_among_same_start_spans() {
    assert!(span(3, 4) < span(3, 5));
    assert!(span(3, 5) > span(3, 4));
}

#[test]
fn equality_is_componentwise() {
    assert_eq!(point(2), point(2));
    assert_eq!(span(1, 3), span(1, 3));
    assert_ne!(point(2), point(3));
    assert_ne!(span(1, 3), span(1, 4));
    assert_ne!(point(1), span(1, 3));
}

#[test]
fn normalized_degenerate_span_equals_point() {
    assert_eq!(Timespan::between(4, 4).unwrap(), point(4));
}

#[test]
fn equal_timespans_hash_identically() {
    assert_eq!(hash_of(&point(4)), hash_of(&Timespan::between(4, 4).unwrap()));
    assert_eq!(hash_of(&span(1, 3)), hash_of(&span(1, 3)));
}

#[test]
fn sorting_is_total_and_deterministic() {
    let mut timespans = vec![span(3, 5), point(4), span(3, 4), point(3), point(2), span(1, 9)];
    timespans.sort();
    assert_eq!(
        timespans,
        vec![span(1, 9), point(2), point(3), span(3, 4), span(3, 5), point(4)]
    );
}
