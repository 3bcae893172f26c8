//! Every classified kind returns a value or the unparseable marker for any input.

use proptest::prelude::*;

use pitwall_model::{ColumnKind, NormalizedTemporalValue, Unparseable};
use pitwall_transform::parse_text;

const KINDS: [ColumnKind; 3] = [
    ColumnKind::Duration,
    ColumnKind::AbsoluteTime,
    ColumnKind::Datetime,
];

fn check_total(value: &str) {
    for kind in KINDS {
        let outcome = parse_text(kind, Some(value));
        assert!(outcome.is_some(), "{kind} returned passthrough for {value:?}");
    }
}

proptest! {
    #[test]
    fn arbitrary_strings_never_panic(value in any::<String>()) {
        check_total(&value);
    }

    #[test]
    fn clock_like_strings_never_panic(value in "-?[0-9]{0,25}[:.][0-9]{0,25}([:.][0-9]{0,25}){0,3}") {
        check_total(&value);
    }

    #[test]
    fn date_like_strings_never_panic(value in "[0-9]{4}-[0-9]{1,3}-[0-9]{1,3}([T ][0-9:.]{0,16})?[Zz+\\-0-9:]{0,6}") {
        check_total(&value);
    }

    #[test]
    fn numeric_seconds_are_never_negative_durations(seconds in any::<f64>()) {
        let outcome = parse_text(ColumnKind::Duration, Some(&seconds.to_string()));
        match outcome {
            Some(Ok(NormalizedTemporalValue::Duration(duration))) => {
                prop_assert!(seconds >= 0.0 || duration.as_millis() == 0);
            }
            Some(Ok(other)) => prop_assert!(false, "unexpected value {other:?}"),
            Some(Err(reason)) => {
                prop_assert!(
                    seconds < 0.0 || !seconds.is_finite() || reason == Unparseable::OutOfRange,
                    "{seconds} rejected as {reason}"
                );
            }
            None => prop_assert!(false, "duration column treated as passthrough"),
        }
    }

    #[test]
    fn durations_round_trip(millis in 0u64..10_000_000_000) {
        let value = pitwall_model::Duration::from_millis(millis);
        let reparsed = parse_text(ColumnKind::Duration, Some(&value.to_string()));
        prop_assert_eq!(reparsed, Some(Ok(NormalizedTemporalValue::Duration(value))));
    }
}

#[test]
fn edge_inputs_are_total() {
    for value in ["", " ", "-", ":", "::", "..", "-1", "-0", "1e400", "inf", "NaN", "ü:ö.ä"] {
        check_total(value);
    }
}
