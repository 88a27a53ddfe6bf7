//! Serde matrix: comparing ordinary derived types end to end.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use deep_assert::catalog::{
    float_within, is_absent_expected, skip_if, timestamp_truncated_to, MISSING_EXPECTED,
};
use deep_assert::{
    compare, compare_serialized, order_insensitive, to_value, Mutator, Overrides, Value,
    TIMESTAMP_TYPE,
};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Sub {
    field1: String,
    field2: Vec<i32>,
    field3: HashMap<String, i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Complex {
    field1: String,
    field2: i32,
    field3: Vec<String>,
    field4: HashMap<String, String>,
    field5: Sub,
}

fn complex(name: &str, count: i32, numbers: Vec<i32>, b: i32) -> Complex {
    Complex {
        field1: name.to_string(),
        field2: count,
        field3: vec!["x".into(), "y".into()],
        field4: HashMap::from([("k".to_string(), "v".to_string())]),
        field5: Sub {
            field1: "inner".into(),
            field2: numbers,
            field3: HashMap::from([("a".to_string(), 1), ("b".to_string(), b)]),
        },
    }
}

#[derive(Serialize)]
struct Event {
    name: String,
    at: Option<SystemTime>,
}

fn minute_aligned() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_609_459_200)
}

// ---------------------------------------------------------------------------
// Derived structs
// ---------------------------------------------------------------------------

#[test]
fn identical_structs_match() {
    let a = complex("test", 1, vec![1, 2], 2);
    let b = complex("test", 1, vec![1, 2], 2);
    let result = compare_serialized(&a, &b, &Overrides::new()).unwrap();
    assert!(result.matched());
    assert_eq!(result.report(), "");
}

#[test]
fn every_differing_leaf_is_reported_in_order() {
    let actual = complex("test", 1, vec![1, 2, 3], 2);
    let expected = complex("test5", 5, vec![1, 2], 3);
    let (matched, report) = compare_serialized(&actual, &expected, &Overrides::new())
        .unwrap()
        .into_parts();
    assert!(!matched);
    assert_eq!(
        report,
        "Path: $.Field1\nExpected: \"test5\"\nActual:   \"test\"\n(Should equal)!\n\
         Path: $.Field2\nExpected: 5\nActual:   1\n(Should equal)!\n\
         Path: $.Field5.Field2\nExpected: [1, 2]\nActual:   [1, 2, 3]\n(Should equal)!\n\
         Path: $.Field5.Field3.b\nExpected: 3\nActual:   2\n(Should equal)!"
    );
}

#[test]
fn path_overrides_reach_derived_fields() {
    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Quote {
        symbol: String,
        price: f64,
    }

    let overrides = Overrides::new().with("$[].Price", float_within(0.01));
    let actual = vec![
        Quote { symbol: "A".into(), price: 10.004 },
        Quote { symbol: "B".into(), price: 20.0 },
    ];
    let expected = vec![
        Quote { symbol: "A".into(), price: 10.0 },
        Quote { symbol: "B".into(), price: 20.009 },
    ];
    assert!(compare_serialized(&actual, &expected, &overrides).unwrap().matched());
}

// ---------------------------------------------------------------------------
// Optional timestamps
// ---------------------------------------------------------------------------

#[test]
fn optional_timestamps_reach_type_overrides() {
    let overrides =
        Overrides::new().with(TIMESTAMP_TYPE, timestamp_truncated_to(Duration::from_secs(60)));
    let actual = Event {
        name: "deploy".into(),
        at: Some(minute_aligned() + Duration::from_secs(30)),
    };
    let expected = Event {
        name: "deploy".into(),
        at: Some(minute_aligned()),
    };
    assert!(compare_serialized(&actual, &expected, &overrides).unwrap().matched());
    assert!(!compare_serialized(&actual, &expected, &Overrides::new())
        .unwrap()
        .matched());
}

#[test]
fn one_sided_timestamp_is_a_presence_failure() {
    let actual = Event {
        name: "deploy".into(),
        at: Some(minute_aligned()),
    };
    let expected = Event {
        name: "deploy".into(),
        at: None,
    };
    let result = compare_serialized(&actual, &expected, &Overrides::new()).unwrap();
    assert_eq!(
        result.report(),
        "Path: $.at\nExpected: <none>\nActual: Timestamp(2021-01-01T00:00:00Z)"
    );
}

#[test]
fn one_sided_timestamp_reaches_type_overrides() {
    let actual = Event {
        name: "deploy".into(),
        at: Some(minute_aligned()),
    };
    let expected = Event {
        name: "deploy".into(),
        at: None,
    };

    let lenient = Overrides::new().with(TIMESTAMP_TYPE, skip_if(is_absent_expected));
    assert!(compare_serialized(&actual, &expected, &lenient).unwrap().matched());

    let truncated =
        Overrides::new().with(TIMESTAMP_TYPE, timestamp_truncated_to(Duration::from_secs(60)));
    let result = compare_serialized(&actual, &expected, &truncated).unwrap();
    assert_eq!(result.report(), format!("Path: $.at\n{MISSING_EXPECTED}"));
}

#[test]
fn both_sides_unset_match() {
    let actual = Event {
        name: "deploy".into(),
        at: None,
    };
    let expected = Event {
        name: "deploy".into(),
        at: None,
    };
    assert!(compare_serialized(&actual, &expected, &Overrides::new())
        .unwrap()
        .matched());
}

// ---------------------------------------------------------------------------
// Mutators
// ---------------------------------------------------------------------------

#[test]
fn order_insensitive_lists_match_after_mutation() {
    let actual = to_value(&vec![3, 1, 2]).unwrap();
    let expected = to_value(&vec![1, 2, 3]).unwrap();
    assert!(!compare(&actual, &expected, &Overrides::new()).matched());

    let by_value = order_insensitive(|a: &Value, b: &Value| match (a, b) {
        (Value::Int(a), Value::Int(b)) => a < b,
        _ => false,
    });
    let (actual, expected) = by_value.mutate(Some(&actual), Some(&expected));
    let (Some(actual), Some(expected)) = (actual, expected) else {
        panic!("both operands survive mutation");
    };
    assert!(compare(&actual, &expected, &Overrides::new()).matched());
}

#[test]
fn order_insensitive_keeps_real_differences() {
    let by_value = order_insensitive(|a: &Value, b: &Value| a.to_string() < b.to_string());
    let actual = to_value(&["b", "a", "c"]).unwrap();
    let expected = to_value(&["a", "b", "d"]).unwrap();
    let (Some(actual), Some(expected)) = by_value.mutate(Some(&actual), Some(&expected)) else {
        panic!("both operands survive mutation");
    };
    let result = compare(&actual, &expected, &Overrides::new());
    assert_eq!(
        result.report(),
        "Path: $[2]\nExpected: \"d\"\nActual:   \"c\"\n(Should equal)!"
    );
}

// ---------------------------------------------------------------------------
// JSON documents
// ---------------------------------------------------------------------------

#[test]
fn json_documents_compare_with_overrides() {
    let actual = Value::from(&json!({"price": 1.004, "tags": ["a", "b"], "meta": null}));
    let expected = Value::from(&json!({"price": 1.0, "tags": ["a", "c"], "meta": null}));
    let overrides = Overrides::new().with("$.price", float_within(0.01));
    assert_eq!(
        compare(&actual, &expected, &overrides).report(),
        "Path: $.tags[1]\nExpected: \"c\"\nActual:   \"b\"\n(Should equal)!"
    );
}

#[test]
fn json_key_missing_from_expected_is_reported() {
    let actual = Value::from(&json!({"id": 1, "name": "x"}));
    let expected = Value::from(&json!({"id": 2, "title": "x"}));
    assert_eq!(
        compare(&actual, &expected, &Overrides::new()).report(),
        "Path: $.id\nExpected: 2\nActual:   1\n(Should equal)!\n\
         Path: $.name\nKey name not found in expected"
    );
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn comparisons_emit_override_and_summary_events() {
    let captured = Captured::default();
    let sink = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let overrides =
            Overrides::new().with(TIMESTAMP_TYPE, timestamp_truncated_to(Duration::from_secs(60)));
        let actual = Event {
            name: "deploy".into(),
            at: Some(minute_aligned() + Duration::from_secs(5)),
        };
        let expected = Event {
            name: "deploy".into(),
            at: Some(minute_aligned()),
        };
        let result = compare_serialized(&actual, &expected, &overrides).unwrap();
        assert!(result.matched());
    });

    let logs = captured.text();
    assert!(logs.contains("override applied"), "{logs}");
    assert!(logs.contains("whole-node comparison"), "{logs}");
    assert!(logs.contains("comparison finished"), "{logs}");
    assert!(logs.contains("matched=true"), "{logs}");
}
