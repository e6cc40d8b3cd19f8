use ts_schema::derive::Notation;
use ts_schema::{ErrorKind, FormatOptions, FormatReason, NotationError, SchemaRegistry, TextOptions};
use ts_text::{Decoder, Encoder};

#[derive(Notation, Default, Debug, PartialEq)]
struct Inner {
    a: i32,
}

#[derive(Notation, Default, Debug, PartialEq)]
struct Outer {
    inner: Inner,
    list: Vec<u8>,
    empty: Vec<u8>,
    nothing: Inner2,
}

#[derive(Notation, Default, Debug, PartialEq)]
struct Inner2 {}

#[derive(Notation, Default, Debug, PartialEq)]
struct Arrays {
    fixed: [u8; 3],
    boxed: Box<[i16]>,
    seq: Vec<u8>,
}

#[derive(Notation, Default, Debug, PartialEq)]
struct Floats {
    single: f32,
    double: f64,
}

fn outer() -> Outer {
    Outer {
        inner: Inner { a: 1 },
        list: vec![1, 2],
        empty: Vec::new(),
        nothing: Inner2 {},
    }
}

#[test]
fn default_layout_indents_per_level() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default();

    let text = Encoder::new(&registry, &options).encode(&outer()).unwrap();
    assert_eq!(
        text,
        "{\n\t\"inner\":{\n\t\t\"a\":1\n\t},\n\t\"list\":[\n\t\t1,\n\t\t2\n\t],\n\t\"empty\":[],\n\t\"nothing\":{}\n}"
    );

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["list"][1], 2);
}

#[test]
fn compact_layout_with_length_prefix() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default().with_text(TextOptions::compact().with_array_length_prefix(true));
    let value = Arrays {
        fixed: [1, 2, 3],
        boxed: Box::new([]),
        seq: vec![4],
    };

    let text = Encoder::new(&registry, &options).encode(&value).unwrap();
    assert_eq!(text, r#"{"fixed":[3,1,2,3],"boxed":[],"seq":[4]}"#);

    let back: Arrays = Decoder::new(&registry, &options).decode(&text).unwrap();
    assert_eq!(back, value);
}

#[test]
fn decoder_ignores_layout() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default().with_text(TextOptions::compact());

    let text = " {\r\n \"inner\" : { \"a\" : -1 } ,\"list\":[ 1 ,2 ] , \"empty\" : [ ]\n,\"nothing\":{ } }\n";
    let back: Outer = Decoder::new(&registry, &options).decode(text).unwrap();
    assert_eq!(back.inner.a, -1);
    assert_eq!(back.list, [1, 2]);
}

#[test]
fn floats_are_invariant_and_finite() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default().with_text(TextOptions::compact());
    let encoder = Encoder::new(&registry, &options);

    let text = encoder.encode(&Floats { single: 1.5, double: 0.1 }).unwrap();
    assert_eq!(text, r#"{"single":1.5,"double":0.1}"#);

    let text = encoder.encode(&Floats { single: 2.0, double: -1e21 }).unwrap();
    assert_eq!(text, r#"{"single":2,"double":-1000000000000000000000}"#);

    let back: Floats = Decoder::new(&registry, &options)
        .decode(r#"{"single":2.5e-1,"double":1E2}"#)
        .unwrap();
    assert_eq!(back, Floats { single: 0.25, double: 100.0 });

    let err = encoder.encode(&Floats { single: f32::NAN, double: 0.0 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    let err = encoder.encode(&Floats { single: 0.0, double: f64::INFINITY }).unwrap_err();
    assert!(matches!(
        err,
        NotationError::Format { reason: FormatReason::NonFiniteFloat(v), .. } if v == f64::INFINITY
    ));
}

#[test]
fn writes_append_to_existing_text() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default().with_text(TextOptions::compact());

    let mut out = String::from("doc=");
    Encoder::new(&registry, &options)
        .encode_to(&mut out, &Inner { a: 7 })
        .unwrap();
    assert_eq!(out, r#"doc={"a":7}"#);
}
