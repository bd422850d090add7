//! Tests for the text and JSON record layouts.

use cascadelog::encoder::compose_message;
use cascadelog::{
    Complex, Encoder, Field, JsonEncoder, JsonEscape, Level, Opaque, PrefixMode, Record,
    TextEncoder, TypeEncoder, Value,
};
use chrono::{Local, TimeZone};
use std::time::Duration;

fn record(fields: Vec<Field>) -> Record {
    Record {
        level: Level::Info,
        time: Local.with_ymd_and_hms(2024, 1, 31, 12, 34, 56).unwrap(),
        position: "app/main.rs:10".to_string(),
        args: vec!["hello".into()],
        fields,
        ..Record::default()
    }
}

fn abc() -> Vec<Field> {
    vec![
        Field::new("A", 1),
        Field::new("B", true),
        Field::new("C", 1.5),
    ]
}

fn encode(encoder: &impl Encoder, record: &Record) -> String {
    let mut buf = Vec::new();
    encoder.encode(&mut buf, record).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn text_layout() {
    let line = encode(&TextEncoder::default(), &record(abc()));
    assert_eq!(
        line,
        "level=INFO time=20240131123456 pos=app/main.rs:10 msg=hello A=1 B=true C=1.5000\n"
    );
}

#[test]
fn text_fields_are_ordered_tokens() {
    let line = encode(&TextEncoder::default(), &record(abc()));
    let tokens: Vec<&str> = line.trim_end().split(' ').collect();
    assert_eq!(&tokens[tokens.len() - 3..], ["A=1", "B=true", "C=1.5000"]);
    assert!(line.ends_with('\n'));
    assert_eq!(line.matches('\n').count(), 1);
}

#[test]
fn text_custom_separator_and_time_format() {
    let encoder = TextEncoder::new("%Y-%m-%d", ":");
    assert_eq!(encoder.separator(), ":");
    let line = encode(&encoder, &record(vec![Field::new("k", "v")]));
    assert!(line.starts_with("level:INFO time:2024-01-31 pos:app/main.rs:10"));
    assert!(line.ends_with(" k:v\n"));
}

#[test]
fn text_leaves_strings_unquoted() {
    let line = encode(&TextEncoder::default(), &record(vec![Field::new("q", "say \"hi\"")]));
    assert!(line.ends_with(" q=say \"hi\"\n"));
}

#[test]
fn json_layout() {
    let line = encode(&JsonEncoder::default(), &record(abc()));
    assert_eq!(
        line,
        "{\"level\":\"INFO\",\"time\":\"20240131123456\",\"pos\":\"app/main.rs:10\",\
         \"msg\":\"hello\",\"A\":1,\"B\":true,\"C\":1.5000}\n"
    );
}

#[test]
fn json_parses_with_keys_in_order() {
    let line = encode(&JsonEncoder::default(), &record(abc()));
    let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["msg"], "hello");
    assert_eq!(parsed["A"], 1);
    assert_eq!(parsed["B"], true);
    assert_eq!(parsed["C"], 1.5);

    let positions: Vec<usize> = ["level", "time", "pos", "msg", "A", "B", "C"]
        .iter()
        .map(|k| line.find(&format!("\"{k}\":")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn json_minimal_escape_only_handles_quotes() {
    let fields = vec![Field::new("q", "say \"hi\""), Field::new("path", r"C:\tmp")];
    let line = encode(&JsonEncoder::default(), &record(fields));
    assert!(line.contains(r#""q":"say \"hi\"""#));
    assert!(line.contains(r#""path":"C:\tmp""#));
}

#[test]
fn json_full_escape_is_always_valid() {
    let encoder = JsonEncoder::default().escape(JsonEscape::Full);
    let fields = vec![
        Field::new("path", r"C:\tmp"),
        Field::new("text", "line\nbreak\t\u{1}"),
    ];
    let line = encode(&encoder, &record(fields));
    assert_eq!(line.matches('\n').count(), 1);
    let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(parsed["path"], r"C:\tmp");
    assert_eq!(parsed["text"], "line\nbreak\t\u{1}");
}

#[test]
fn json_opaque_values() {
    let fields = vec![
        Field::new("opt", Value::debug(&Some(3))),
        Field::new("obj", serde_json::json!({"a": 1})),
        Field::new("ser", Opaque::serialize(&vec!["x", "y"])),
    ];
    let line = encode(&JsonEncoder::default(), &record(fields));
    assert!(line.contains(r#""opt":"Some(3)""#));
    assert!(line.contains(r#""obj":{"a":1}"#));
    assert!(line.contains(r#""ser":["x","y"]"#));
}

#[test]
fn text_kinds() {
    let fields = vec![
        Field::new("ids", vec![1, 2, 3]),
        Field::new("took", Duration::from_millis(1500)),
        Field::new("z", Complex::new(1.0, -2.0)),
        Field::new("u", 7_u8),
        Field::new("neg", -4_i64),
        Field::new("opt", Value::debug(&None::<u8>)),
    ];
    let line = encode(&TextEncoder::default(), &record(fields));
    assert!(line.ends_with(" ids=123 took=1.5s z=(1-2i) u=7 neg=-4 opt=None\n"));
}

#[test]
fn json_quotes_durations_and_times() {
    let when = Local.with_ymd_and_hms(2023, 5, 6, 7, 8, 9).unwrap();
    let fields = vec![
        Field::new("took", Duration::from_secs(90)),
        Field::new("at", when),
    ];
    let line = encode(&JsonEncoder::default(), &record(fields));
    assert!(line.contains(r#""took":"1m30s""#));
    assert!(line.contains(r#""at":"20230506070809""#));
}

#[test]
fn formatted_message_with_prefix() {
    let mut r = record(Vec::new());
    r.prefix = "[svc] ".to_string();
    r.format = "%d items".to_string();
    r.args = vec![3.into()];
    assert_eq!(compose_message(&r, PrefixMode::IntoFormat), "[svc] 3 items");
    assert_eq!(compose_message(&r, PrefixMode::Literal), "[svc] 3 items");

    r.prefix = "100% ".to_string();
    r.format = "%d".to_string();
    r.args = vec![5.into()];
    assert_eq!(compose_message(&r, PrefixMode::Literal), "100% 5");
}

#[test]
fn unformatted_message_joins_args_and_strips_one_newline() {
    let mut r = record(Vec::new());
    r.prefix = "p: ".to_string();
    r.args = vec!["a".into(), 1.into(), true.into()];
    assert_eq!(compose_message(&r, PrefixMode::default()), "p: a 1 true");

    r.args = vec!["line\n".into()];
    assert_eq!(compose_message(&r, PrefixMode::default()), "p: line\n");
}

#[test]
fn type_encoder_hooks() {
    fn shout(buf: &mut Vec<u8>, s: &str) {
        buf.extend_from_slice(s.to_uppercase().as_bytes());
    }
    fn hidden(buf: &mut Vec<u8>, _: &Opaque) {
        buf.extend_from_slice(b"<hidden>");
    }

    let types = TypeEncoder::new("", hidden).with_string(shout);
    let mut buf = Vec::new();
    types.encode_val(&mut buf, &Value::from("abc"));
    types.encode_val(&mut buf, &Value::debug(&[1, 2]));
    types.encode_val(&mut buf, &Value::from(vec!["x", "y"]));
    TypeEncoder::encode_float(&mut buf, 2.0);
    assert_eq!(String::from_utf8(buf).unwrap(), "ABC<hidden>XY2.0000");

    let encoder = TextEncoder::default().with_types(types);
    let line = encode(&encoder, &record(vec![Field::new("k", "v")]));
    assert!(line.starts_with("level=INFO"));
    assert!(line.ends_with(" k=V\n"));
}
