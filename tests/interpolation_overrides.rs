use chrono::NaiveDate;
use spanline::construct::{Datapoints, Event, Properties, Timeline, Timespan};
use spanline::datatype::{Cast, Value};
use spanline::error::SpanlineError;
use spanline::interpolate::Interpolation;

fn span(start: i64, end: i64) -> Timespan<i64> {
    Timespan::between(start, end).expect("valid span")
}

fn point(t: i64) -> Timespan<i64> {
    Timespan::at(t)
}

fn props(entries: Vec<(&str, Value)>) -> Properties {
    entries
        .into_iter()
        .map(|(name, value)| (String::from(name), value))
        .collect()
}

#[test]
fn interpolates_between_span_edges_with_ephemeral_override() {
    let regular: Datapoints<i64> = vec![
        (span(1, 2), Value::Integer(1)),
        (span(4, 6), Value::Integer(3)),
    ];
    let ephemeral: Datapoints<i64> = vec![(point(5), Value::Integer(5))];
    let interpolation =
        Interpolation::from_datapoints(&regular, &ephemeral, Some(Cast::Integer), 1)
            .expect("builds");
    let values: Vec<Value> = interpolation.over(vec![1, 2, 3, 4, 5, 6]).collect();
    assert_eq!(
        values,
        vec![
            Value::Integer(1),
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
            Value::Integer(5),
            Value::Integer(3),
        ]
    );
}

#[test]
fn scalar_and_sequence_entry_points_agree() {
    let regular: Datapoints<i64> = vec![
        (point(0), Value::Integer(0)),
        (point(10), Value::Integer(10)),
    ];
    let interpolation = Interpolation::from_datapoints(&regular, &[], None, 1).expect("builds");
    let swept: Vec<Value> = interpolation.over(vec![3, 7]).collect();
    assert_eq!(swept, vec![interpolation.at(3), interpolation.at(7)]);
    assert_eq!(interpolation.at(3), Value::Float(3.0));
}

#[test]
fn queries_outside_the_range_clamp() {
    let regular: Datapoints<i64> = vec![
        (point(10), Value::Integer(5)),
        (point(20), Value::Integer(9)),
    ];
    let interpolation = Interpolation::from_datapoints(&regular, &[], None, 1).expect("builds");
    assert_eq!(interpolation.at(0), Value::Float(5.0));
    assert_eq!(interpolation.at(10), Value::Float(5.0));
    assert_eq!(interpolation.at(100), Value::Float(9.0));
}

#[test]
fn without_cast_values_come_back_as_floats() {
    let regular: Datapoints<i64> = vec![
        (point(1), Value::Integer(1)),
        (point(3), Value::Integer(2)),
    ];
    let interpolation = Interpolation::from_datapoints(&regular, &[], None, 1).expect("builds");
    assert_eq!(interpolation.at(2), Value::Float(1.5));
}

#[test]
fn integer_cast_truncates_and_covers_overrides_too() {
    let regular: Datapoints<i64> = vec![
        (point(1), Value::Integer(1)),
        (point(3), Value::Integer(2)),
    ];
    let ephemeral: Datapoints<i64> = vec![(point(2), Value::Float(7.9))];
    let interpolation =
        Interpolation::from_datapoints(&regular, &ephemeral, Some(Cast::Integer), 1)
            .expect("builds");
    assert_eq!(interpolation.at(2), Value::Integer(7));
}

#[test]
fn later_sorted_ephemeral_span_wins_where_spans_overlap() {
    // anchors for the regular curve, far away from the overrides
    let timeline = Timeline::from_events(vec![
        Event::new(Timespan::at(0), props(vec![("load", Value::Integer(0))])),
        Event::new(Timespan::at(10), props(vec![("load", Value::Integer(10))])),
        Event::new(span(1, 5), props(vec![("load", Value::Integer(1))])),
        Event::new(span(2, 4), props(vec![("load", Value::Integer(2))])),
        Event::new(span(2, 3), props(vec![("load", Value::Integer(3))])),
        Event::new(
            Timespan::at(6),
            props(vec![("load", Value::Integer(4)), ("ephemeral", Value::Flag(true))]),
        ),
    ]);
    let interpolation =
        Interpolation::for_property(&timeline, "load", Some(Cast::Integer)).expect("builds");
    // sort order is (1,5), (2,3), (2,4), 6 — last write wins per timepoint
    let values: Vec<Value> = interpolation.over(1..=6).collect();
    assert_eq!(
        values,
        vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(2),
            Value::Integer(2),
            Value::Integer(1),
            Value::Integer(4),
        ]
    );
}

#[test]
fn touching_spans_share_a_seam_first_value_answers() {
    let regular: Datapoints<i64> = vec![
        (span(1, 2), Value::Integer(1)),
        (span(2, 4), Value::Integer(3)),
    ];
    let interpolation = Interpolation::from_datapoints(&regular, &[], None, 1).expect("builds");
    // exactly at the seam the earlier span's value answers
    assert_eq!(interpolation.at(2), Value::Float(1.0));
    // inside the later span the curve is flat at its value
    assert_eq!(interpolation.at(3), Value::Float(3.0));
}

#[test]
fn zero_regular_datapoints_is_an_empty_dataset() {
    let ephemeral: Datapoints<i64> = vec![(point(5), Value::Integer(5))];
    let result = Interpolation::from_datapoints(&[], &ephemeral, None, 1);
    assert!(matches!(result, Err(SpanlineError::EmptyDataset(_))));
}

#[test]
fn non_numeric_datapoints_fail_at_build_time() {
    let regular: Datapoints<i64> = vec![(point(1), Value::Text(String::from("five")))];
    let result = Interpolation::from_datapoints(&regular, &[], None, 1);
    assert!(matches!(
        result,
        Err(SpanlineError::NonNumericDatapoint { .. })
    ));

    let regular: Datapoints<i64> = vec![(point(1), Value::Integer(1))];
    let ephemeral: Datapoints<i64> = vec![(span(2, 3), Value::Flag(true))];
    let result = Interpolation::from_datapoints(&regular, &ephemeral, None, 1);
    assert!(matches!(
        result,
        Err(SpanlineError::NonNumericDatapoint { .. })
    ));
}

#[test]
fn ephemeral_only_property_propagates_not_found() {
    let timeline = Timeline::from_events(vec![Event::new(
        span(1500, 1550),
        props(vec![("name", "XV century".into())]),
    )]);
    let result = Interpolation::for_property(&timeline, "name", None);
    assert!(matches!(result, Err(SpanlineError::PropertyNotFound(_))));
}

#[test]
fn date_axis_interpolates_and_overrides_by_day() {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    let timeline = Timeline::from_events(vec![
        Event::new(
            Timespan::at(d(2017, 1, 1)),
            props(vec![("level", Value::Integer(0))]),
        ),
        Event::new(
            Timespan::at(d(2017, 1, 11)),
            props(vec![("level", Value::Integer(10))]),
        ),
        Event::new(
            Timespan::between(d(2017, 1, 4), d(2017, 1, 5)).unwrap(),
            props(vec![("level", Value::Integer(42))]),
        ),
    ]);
    let interpolation = Interpolation::for_property(&timeline, "level", None).expect("builds");
    assert_eq!(interpolation.at(d(2017, 1, 6)), Value::Float(5.0));
    assert_eq!(interpolation.at(d(2017, 1, 4)), Value::Float(42.0));
    assert_eq!(interpolation.at(d(2017, 1, 5)), Value::Float(42.0));
}
