use std::sync::Arc;

use ts_schema::derive::Notation;
use ts_schema::{FormatOptions, Object, SchemaRegistry, StructuralOptions, TextOptions, TypeScope};
use ts_text::{Decoder, Encoder};

#[derive(Notation, Default, Debug, PartialEq, Clone, Copy)]
enum Mode {
    #[default]
    Off,
    On = 5,
    #[notation(rename = "auto")]
    Automatic,
}

#[derive(Notation, Default, Debug, PartialEq, Clone)]
struct Point {
    x: f32,
    y: f32,
}

#[derive(Notation, Default, Debug, PartialEq, Clone)]
#[notation(class)]
struct Shape {
    name: String,
    points: Vec<Point>,
}

#[derive(Notation, Default, Debug, PartialEq, Clone)]
#[notation(class)]
struct Plain {
    small: i8,
    big: i64,
    unsigned: u64,
    single: f32,
    double: f64,
    text: String,
    mode: Mode,
    modes: Vec<Mode>,
    grid: Vec<Vec<i32>>,
    fixed: [u16; 2],
    slice: Box<[String]>,
    point: Point,
    shape: Box<Shape>,
    note: Option<String>,
    empty: Vec<Point>,
}

#[derive(Notation, Default, Debug)]
#[notation(class)]
struct Holder {
    any: Box<dyn Object>,
    maybe: Option<Box<dyn Object>>,
    many: Vec<Box<dyn Object>>,
}

// The derive cannot compare a bare `Box<dyn Object>` field.
impl PartialEq for Holder {
    fn eq(&self, other: &Self) -> bool {
        *self.any == *other.any && self.maybe == other.maybe && self.many == other.many
    }
}

fn plain() -> Plain {
    Plain {
        small: -128,
        big: i64::MIN,
        unsigned: u64::MAX,
        single: 0.1,
        double: -2.5e-300,
        text: String::from("quote \" slash \\ line \n tab \t cr \r done"),
        mode: Mode::On,
        modes: vec![Mode::Automatic, Mode::Off],
        grid: vec![vec![1, -2], vec![], vec![3]],
        fixed: [7, 65535],
        slice: vec![String::from("a"), String::new()].into_boxed_slice(),
        point: Point { x: 1.0, y: -0.5 },
        shape: Box::new(Shape {
            name: String::from("tri"),
            points: vec![Point { x: 0.0, y: 0.0 }, Point { x: 3.0, y: 4.0 }],
        }),
        note: Some(String::from("n")),
        empty: Vec::new(),
    }
}

fn option_sets() -> Vec<FormatOptions> {
    let mut scope = TypeScope::new();
    scope.register::<Plain>();
    scope.register::<Holder>();
    let scope = Arc::new(scope);

    let tagged = StructuralOptions::new()
        .with_type_tags(true)
        .with_scope(Arc::clone(&scope));
    let named = TextOptions::compact()
        .with_enum_as_string(true)
        .with_array_length_prefix(true)
        .with_class_tag("$type");

    vec![
        FormatOptions::default(),
        FormatOptions::default().with_structural(tagged.clone()),
        FormatOptions::new(StructuralOptions::new(), named.clone()),
        FormatOptions::new(tagged, named.with_indent("  ").with_field_separator("\r\n")),
    ]
}

#[test]
fn every_kind_survives_every_option_set() {
    let registry = SchemaRegistry::new();
    let value = plain();

    for options in option_sets() {
        let text = Encoder::new(&registry, &options).encode(&value).unwrap();
        let back: Plain = Decoder::new(&registry, &options).decode(&text).unwrap();
        assert_eq!(back, value, "options {options:?}, text {text}");
    }
}

#[test]
fn absent_optional_members_are_omitted_and_tolerated() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default();
    let value = Plain { note: None, ..plain() };

    let text = Encoder::new(&registry, &options).encode(&value).unwrap();
    assert!(!text.contains("\"note\""));

    let back: Plain = Decoder::new(&registry, &options).decode(&text).unwrap();
    assert_eq!(back.note, None);
    assert_eq!(back, value);
}

#[test]
fn polymorphic_members_keep_their_concrete_type() {
    let registry = SchemaRegistry::new();
    let value = Holder {
        any: Box::new(Shape {
            name: String::from("sq"),
            points: vec![Point { x: 1.0, y: 1.0 }],
        }),
        maybe: Some(Box::new(Point { x: 2.0, y: 3.0 })),
        many: vec![Box::new(plain()) as Box<dyn Object>, Box::default()],
    };

    for options in option_sets().into_iter().filter(FormatOptions::emit_type_tags) {
        let text = Encoder::new(&registry, &options).encode(&value).unwrap();
        let back: Holder = Decoder::new(&registry, &options).decode(&text).unwrap();

        assert!(back.any.is::<Shape>());
        assert_eq!(back.maybe.as_ref().and_then(|p| p.downcast_ref::<Point>()), Some(&Point { x: 2.0, y: 3.0 }));
        assert_eq!(back.many[0].downcast_ref::<Plain>(), Some(&plain()));
        assert!(back.many[1].is::<ts_schema::EmptyObject>());
        assert_eq!(back, value);
    }
}

#[test]
fn tagged_roots() {
    let registry = SchemaRegistry::new();
    let sets = option_sets();
    let options = &sets[1];
    let point = Point { x: 4.0, y: 5.0 };

    let encoder = Encoder::new(&registry, options);
    let untagged = encoder.encode(&point).unwrap();
    assert!(!untagged.contains("class"));

    let tagged = encoder.encode_tagged(&point).unwrap();
    let back = Decoder::new(&registry, options).decode_tagged(&tagged).unwrap();
    assert_eq!(back.downcast_ref::<Point>(), Some(&point));
}

#[test]
fn decode_into_keeps_absent_optionals() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default();
    let decoder = Decoder::new(&registry, &options);

    let mut target = plain();
    let mut source = plain();
    source.note = None;
    source.big = 9;
    let text = Encoder::new(&registry, &options).encode(&source).unwrap();

    decoder.decode_into(&mut target, &text).unwrap();
    assert_eq!(target.big, 9);
    assert_eq!(target.note.as_deref(), Some("n"));

    let before = target.clone();
    assert!(decoder.decode_into(&mut target, "{\"small\":1}").is_err());
    assert_eq!(target, before);
}

#[test]
fn streams() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default();
    let value = plain();

    let mut bytes = Vec::new();
    Encoder::new(&registry, &options)
        .encode_to_writer(&mut bytes, &value)
        .unwrap();

    let back: Plain = Decoder::new(&registry, &options)
        .decode_from_reader(bytes.as_slice())
        .unwrap();
    assert_eq!(back, value);
}
