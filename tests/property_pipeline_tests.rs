use proptest::prelude::*;
use serde_json::{Value, json};
use shot_chart::core::{AxisRange, Record, align_zero, build_series, get, lookup, normalize_elapsed};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(|value| json!(value)),
        "[a-z0-9. ]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn arb_range() -> impl Strategy<Value = AxisRange> {
    (-1.0e4f64..1.0e4, 0.001f64..1.0e4).prop_map(|(min, span)| AxisRange::new(min, min + span))
}

proptest! {
    #[test]
    fn accessor_returns_number_or_nan_for_any_document(
        doc in arb_json(),
        path in prop::collection::vec("[a-c0]", 0..4),
    ) {
        let value = get(&doc, &path);
        match lookup(&doc, &path) {
            None | Some(Value::Null | Value::Array(_) | Value::Object(_)) => {
                prop_assert!(value.is_nan());
            }
            Some(Value::Number(number)) => prop_assert_eq!(Some(value), number.as_f64()),
            Some(Value::Bool(flag)) => prop_assert_eq!(value, if *flag { 1.0 } else { 0.0 }),
            Some(Value::String(_)) => {}
        }
    }

    #[test]
    fn series_length_always_matches_record_count(
        docs in prop::collection::vec(
            prop::collection::btree_map("[a-c]", arb_json(), 0..4),
            0..12,
        ),
        path in prop::collection::vec("[a-c]", 1..3),
    ) {
        let records: Vec<Record> = docs
            .into_iter()
            .map(|map| Record::new(map.into_iter().collect()))
            .collect();
        prop_assert_eq!(build_series(&records, &path).len(), records.len());
    }

    #[test]
    fn normalized_stream_starts_at_zero(
        raw in prop::collection::vec(-1.0e9f64..1.0e9, 1..40),
    ) {
        let elapsed = normalize_elapsed(&raw);
        prop_assert_eq!(elapsed.len(), raw.len());
        prop_assert_eq!(elapsed[0], 0.0);
    }

    #[test]
    fn alignment_never_clips_input_ranges(primary in arb_range(), secondary in arb_range()) {
        let (aligned_primary, aligned_secondary) = align_zero(primary, secondary);
        prop_assert!(aligned_primary.min <= primary.min);
        prop_assert!(aligned_primary.max >= primary.max);
        prop_assert!(aligned_secondary.min <= secondary.min);
        prop_assert!(aligned_secondary.max >= secondary.max);
    }

    #[test]
    fn alignment_is_idempotent(primary in arb_range(), secondary in arb_range()) {
        let once = align_zero(primary, secondary);
        let twice = align_zero(once.0, once.1);
        let tolerance = |range: AxisRange| 1e-9 * range.span().max(1.0);
        prop_assert!((twice.0.min - once.0.min).abs() <= tolerance(once.0));
        prop_assert!((twice.0.max - once.0.max).abs() <= tolerance(once.0));
        prop_assert!((twice.1.min - once.1.min).abs() <= tolerance(once.1));
        prop_assert!((twice.1.max - once.1.max).abs() <= tolerance(once.1));
    }

    #[test]
    fn aligned_axes_share_zero_fraction(
        primary_min in -100.0f64..-0.01,
        primary_max in 0.01f64..100.0,
        secondary_min in -100.0f64..-0.01,
        secondary_max in 0.01f64..100.0,
    ) {
        let (primary, secondary) = align_zero(
            AxisRange::new(primary_min, primary_max),
            AxisRange::new(secondary_min, secondary_max),
        );
        let fraction = |range: AxisRange| -range.min / range.span();
        prop_assert!((fraction(primary) - fraction(secondary)).abs() <= 1e-9);
    }
}
