use std::sync::Arc;

use ts_schema::derive::Notation;
use ts_schema::{
    ErrorKind, FormatOptions, NotationError, Object, SchemaReason, SchemaRegistry, StructuralOptions, TextOptions,
    TypeScope,
};
use ts_text::{Decoder, Encoder};

#[derive(Notation, Default, Debug, PartialEq)]
#[notation(class)]
struct Circle {
    r: f32,
}

#[derive(Notation, Default, Debug, PartialEq)]
#[notation(class, type_path = "geo.Square")]
struct Square {
    side: f32,
}

#[derive(Notation, Default, Debug)]
struct Slot {
    any: Box<dyn Object>,
}

#[derive(Notation, Default, Debug, PartialEq)]
#[notation(class)]
struct Labelled {
    #[notation(rename = "class")]
    kind: String,
}

fn tagged(class_tag: &str) -> FormatOptions {
    let mut scope = TypeScope::new();
    scope.register::<Circle>();
    scope.register::<Square>();
    scope.register::<Labelled>();
    FormatOptions::new(
        StructuralOptions::new().with_type_tags(true).with_scope(Arc::new(scope)),
        TextOptions::compact().with_class_tag(class_tag),
    )
}

fn schema_reason(err: NotationError) -> SchemaReason {
    match err {
        NotationError::Schema { reason, .. } => reason,
        other => panic!("not a schema error: {other}"),
    }
}

#[test]
fn class_tags_are_written_first() {
    let registry = SchemaRegistry::new();
    let options = tagged("class");
    let slot = Slot {
        any: Box::new(Square { side: 2.0 }),
    };

    let text = Encoder::new(&registry, &options).encode(&slot).unwrap();
    assert_eq!(text, r#"{"any":{"class":"geo.Square","side":2}}"#);

    let back: Slot = Decoder::new(&registry, &options).decode(&text).unwrap();
    assert_eq!(back.any.downcast_ref::<Square>(), Some(&Square { side: 2.0 }));
}

#[test]
fn tags_resolve_by_full_path_or_short_name() {
    let registry = SchemaRegistry::new();
    let options = tagged("class");
    let decoder = Decoder::new(&registry, &options);

    for text in [
        r#"{"any":{"class":"polymorphism::Circle","r":1}}"#,
        r#"{"any":{"class":"Circle","r":1}}"#,
    ] {
        let slot: Slot = decoder.decode(text).unwrap();
        assert_eq!(slot.any.downcast_ref::<Circle>(), Some(&Circle { r: 1.0 }));
    }
}

#[test]
fn unknown_tag() {
    let registry = SchemaRegistry::new();
    let options = tagged("class");

    let err = Decoder::new(&registry, &options)
        .decode::<Slot>(r#"{"any":{"class":"nope::Thing"}}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert_eq!(err.offset(), Some(16));
}

#[test]
fn missing_tag() {
    let registry = SchemaRegistry::new();
    let options = tagged("class");
    let decoder = Decoder::new(&registry, &options);

    let err = decoder.decode::<Slot>(r#"{"any":{"r":1}}"#).unwrap_err();
    assert!(matches!(schema_reason(err), SchemaReason::MissingClassTag { .. }));

    let err = decoder.decode::<Slot>(r#"{"any":{}}"#).unwrap_err();
    assert!(matches!(schema_reason(err), SchemaReason::MissingClassTag { found: None, .. }));

    let err = decoder.decode::<Circle>(r#"{"r":1}"#).unwrap_err();
    assert!(matches!(schema_reason(err), SchemaReason::MissingClassTag { .. }));
}

#[test]
fn polymorphic_members_need_tags() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default().with_text(TextOptions::compact());
    let decoder = Decoder::new(&registry, &options);

    let err = decoder.decode::<Slot>(r#"{"any":{}}"#).unwrap_err();
    assert_eq!(err.offset(), Some(7));
    assert_eq!(schema_reason(err), SchemaReason::TypeTagsRequired);

    let err = decoder.decode_tagged(r#"{"class":"Circle","r":1}"#).unwrap_err();
    assert_eq!(schema_reason(err), SchemaReason::TypeTagsRequired);
}

#[test]
fn polymorphic_members_are_not_written_without_tags() {
    let registry = SchemaRegistry::new();
    let options = FormatOptions::default().with_text(TextOptions::compact());
    let slot = Slot {
        any: Box::new(Circle { r: 1.0 }),
    };

    let err = Encoder::new(&registry, &options).encode(&slot).unwrap_err();
    assert_eq!(err.offset(), None);
    assert_eq!(schema_reason(err), SchemaReason::TypeTagsRequired);
}

#[test]
fn root_tag_must_name_the_requested_type() {
    let registry = SchemaRegistry::new();
    let options = tagged("class");
    let decoder = Decoder::new(&registry, &options);

    let circle: Circle = decoder
        .decode(r#"{"class":"polymorphism::Circle","r":3}"#)
        .unwrap();
    assert_eq!(circle.r, 3.0);

    let err = decoder.decode::<Circle>(r#"{"class":"geo.Square","r":3}"#).unwrap_err();
    assert_eq!(err.offset(), Some(9));
    assert!(matches!(schema_reason(err), SchemaReason::TypeMismatch { expected: "polymorphism::Circle", .. }));

    let err = decoder.decode::<Circle>(r#"{"class":"Ellipse","r":3}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);

    let any = decoder.decode_tagged(r#"{"class":"geo.Square","side":1}"#).unwrap();
    assert!(any.is::<Square>());
}

#[test]
fn member_named_like_the_tag() {
    let registry = SchemaRegistry::new();
    let labelled = Labelled { kind: "x".into() };

    let options = tagged("class");
    let err = Encoder::new(&registry, &options).encode(&labelled).unwrap_err();
    assert!(matches!(schema_reason(err), SchemaReason::TagCollision { member: "class", .. }));
    let err = Decoder::new(&registry, &options)
        .decode::<Labelled>(r#"{"class":"x"}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);

    let options = tagged("$type");
    let text = Encoder::new(&registry, &options).encode(&labelled).unwrap();
    assert_eq!(text, r#"{"$type":"polymorphism::Labelled","class":"x"}"#);
    let back: Labelled = Decoder::new(&registry, &options).decode(&text).unwrap();
    assert_eq!(back, labelled);

    // Without tags the member is ordinary.
    let options = FormatOptions::default().with_text(TextOptions::compact());
    let text = Encoder::new(&registry, &options).encode(&labelled).unwrap();
    assert_eq!(text, r#"{"class":"x"}"#);
}
