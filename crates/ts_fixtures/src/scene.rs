//! A scene document.

use ts_schema::derive::Notation;
use ts_schema::{EmptyObject, Object};

#[derive(Notation, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    TopLeft,
    Center = 4,
    #[notation(rename = "br")]
    BottomRight,
    Stretch = -1,
}

/// Placement of a widget relative to its parent.
#[derive(Notation, Default, Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: [f32; 2],
    pub scale: f64,
    pub layer: i16,
}

#[derive(Notation, Default, Debug, PartialEq)]
#[notation(class, auto_register)]
pub struct Widget {
    pub name: String,
    pub anchor: Anchor,
    pub transform: Transform,
    pub tint: Option<[u8; 4]>,
    #[notation(rename = "labels")]
    pub tags: Vec<String>,
    /// Markers and nested widgets.
    pub children: Vec<Box<dyn Object>>,
}

/// A labelled point of interest.
#[derive(Notation, Default, Debug, PartialEq)]
#[notation(class, auto_register, type_path = "fixtures.Marker")]
pub struct Marker {
    pub label: String,
    pub at: Box<[i32]>,
    pub note: Option<String>,
    pub r#ref: Option<u64>,
}

#[derive(Notation, Default, Debug, PartialEq)]
#[notation(class, auto_register)]
pub struct Scene {
    pub title: String,
    pub version: u32,
    pub root: Box<Widget>,
    /// The object the editor had selected.
    pub focus: Option<Box<dyn Object>>,
    pub anchors: Vec<Anchor>,
    pub grid: Vec<Vec<u8>>,
    pub history: Vec<Transform>,
    pub bounds: Option<Transform>,
    #[notation(skip)]
    pub dirty: bool,
}

impl Marker {
    pub fn new(label: &str, at: &[i32]) -> Self {
        Self {
            label: label.into(),
            at: at.into(),
            note: None,
            r#ref: None,
        }
    }
}

/// A scene without polymorphic members, which can be written without type
/// tags.
pub fn plain_scene() -> Scene {
    Scene {
        title: "Main \"menu\"".into(),
        version: 3,
        root: Box::new(Widget {
            name: "root".into(),
            anchor: Anchor::Center,
            transform: Transform {
                position: [0.5, 1.25],
                scale: 2.0,
                layer: 7,
            },
            tint: Some([201, 202, 203, 204]),
            tags: vec!["top".into(), "left\tpanel".into()],
            children: Vec::new(),
        }),
        focus: None,
        anchors: vec![Anchor::Stretch, Anchor::BottomRight, Anchor::TopLeft],
        grid: vec![vec![1, 2], Vec::new(), vec![9]],
        history: vec![Transform::default(), Transform {
            position: [8.0, 16.5],
            scale: 0.125,
            layer: 12,
        }],
        bounds: None,
        dirty: false,
    }
}

/// [`plain_scene`] with children and a focus.
pub fn sample_scene() -> Scene {
    let mut scene = plain_scene();
    let mut marker = Marker::new("spawn", &[10, 20, 30]);
    marker.note = Some("first\nof two".into());
    marker.r#ref = Some(u64::MAX);

    scene.root.children = vec![
        Box::new(marker) as Box<dyn Object>,
        Box::new(Widget {
            name: "inner".into(),
            children: vec![Box::new(Marker::new("exit", &[])) as Box<dyn Object>, Box::new(EmptyObject)],
            ..Widget::default()
        }),
    ];
    scene.focus = Some(Box::new(Transform {
        position: [1.0, 1.0],
        scale: 1.5,
        layer: 2,
    }));
    scene.bounds = Some(Transform::default());
    scene
}
