use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::fs;
use std::path::Path;

use ts_schema::info::{MemberDescriptor, TypeDescriptor, ValueKind};
use ts_schema::{FormatOptions, SchemaRegistry, TypeHandle};
use ts_utils::hash::{HashMap, HashSet};
use ts_utils::hash::hashbrown::hash_map::Entry;

use crate::error::GenerateError;
use crate::source::{SourceWriter, field_ident, type_name};

/// Emits Rust source for `ts_text::compiled::CompiledDecoder`s.
///
/// The generated decoder for a type reads the same grammar as the
/// interpreted `ts_text::Decoder` walking that type's descriptor with the
/// same options, and fails on the same inputs with the same errors. Every
/// decision that depends on a member's kind or on the text options is made
/// here, once, instead of on every decode.
#[derive(Debug, Clone)]
pub struct DecoderGenerator {
    options: FormatOptions,
    runtime: String,
}

impl DecoderGenerator {
    /// A generator for decoders that read text written with `options`.
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            runtime: String::from("::ts_text"),
        }
    }

    /// Sets the path generated code uses to reach `ts_text`. Defaults to
    /// `::ts_text`.
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime = path.into();
        self
    }

    #[inline]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    #[inline]
    pub fn runtime_path(&self) -> &str {
        &self.runtime
    }

    /// The name of the decoder generated for `handle`'s type: the last
    /// segment of its Rust path plus `Decoder`.
    pub fn decoder_name(handle: TypeHandle) -> Result<String, GenerateError> {
        Ok(format!("{}Decoder", type_name(handle.rust_path())?))
    }

    /// Generates the decoder for one type.
    ///
    /// Members holding a nested object of a known type call that type's
    /// decoder, which must be generated into the same module.
    pub fn generate(&self, descriptor: &TypeDescriptor) -> Result<String, GenerateError> {
        let mut writer = SourceWriter::new();
        self.write_decoder(&mut writer, descriptor)?;
        Ok(writer.finish())
    }

    /// Generates a module with decoders for `roots` and every type their
    /// members nest by value, roots first.
    pub fn generate_module(
        &self,
        registry: &SchemaRegistry,
        roots: &[TypeHandle],
    ) -> Result<String, GenerateError> {
        let mut seen = HashSet::default();
        let mut descriptors = Vec::new();
        for &root in roots {
            collect(registry, root, &mut seen, &mut descriptors);
        }

        let mut names: HashMap<String, &'static str> = HashMap::default();
        for descriptor in &descriptors {
            let name = Self::decoder_name(descriptor.handle())?;
            match names.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(GenerateError::DuplicateDecoder {
                        name: entry.key().clone(),
                        first: *entry.get(),
                        second: descriptor.type_path(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(descriptor.type_path());
                }
            }
        }

        let text = &self.options.text;
        let mut writer = SourceWriter::new();
        writer.line(format_args!("// @generated by ts_codegen. Do not edit."))?;
        writer.line(format_args!("//"))?;
        writer.line(format_args!(
            "// emit_type_tags = {}, class_tag = {:?}, enum_as_string = {}, array_length_prefix = {}",
            self.options.emit_type_tags(),
            text.class_tag,
            text.enum_as_string,
            text.array_length_prefix,
        ))?;
        for descriptor in &descriptors {
            writer.blank()?;
            self.write_decoder(&mut writer, descriptor)?;
        }

        log::debug!(
            "generated {} decoders for {} root types",
            descriptors.len(),
            roots.len(),
        );
        Ok(writer.finish())
    }

    /// [`generate_module`](Self::generate_module) into a file, for build
    /// scripts.
    pub fn write_module(
        &self,
        path: impl AsRef<Path>,
        registry: &SchemaRegistry,
        roots: &[TypeHandle],
    ) -> Result<(), GenerateError> {
        let path = path.as_ref();
        let source = self.generate_module(registry, roots)?;
        fs::write(path, source).map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote decoders to `{}`", path.display());
        Ok(())
    }

    fn write_decoder(&self, w: &mut SourceWriter, descriptor: &TypeDescriptor) -> Result<(), GenerateError> {
        let options = &self.options;
        let text = &options.text;
        if options.emit_type_tags() && descriptor.is_class() {
            descriptor.check_class_tag(&text.class_tag)?;
        }

        let rt = &self.runtime;
        let rust_path = descriptor.handle().rust_path();
        let name = Self::decoder_name(descriptor.handle())?;
        let members: Vec<String> = descriptor
            .members()
            .iter()
            .map(|member| format!("{:?}", member.name()))
            .collect();

        w.line(format_args!("/// Decodes `{rust_path}`."))?;
        w.line(format_args!("pub struct {name};"))?;
        w.blank()?;
        w.line(format_args!(
            "#[allow(unused_mut, unused_variables, unused_qualifications, clippy::all)]"
        ))?;
        w.open(format_args!("impl {rt}::compiled::CompiledDecoder for {name} {{"))?;
        w.line(format_args!("type Output = {rust_path};"))?;
        w.blank()?;
        w.line(format_args!("const TYPE_PATH: &'static str = {:?};", descriptor.type_path()))?;
        w.line(format_args!("const IS_CLASS: bool = {};", descriptor.is_class()))?;
        w.line(format_args!("const EMIT_TYPE_TAGS: bool = {};", options.emit_type_tags()))?;
        w.line(format_args!("const CLASS_TAG: &'static str = {:?};", text.class_tag))?;
        w.line(format_args!("const ENUM_AS_STRING: bool = {};", text.enum_as_string))?;
        w.line(format_args!("const ARRAY_LENGTH_PREFIX: bool = {};", text.array_length_prefix))?;
        w.line(format_args!(
            "const MEMBERS: &'static [&'static str] = &[{}];",
            members.join(", ")
        ))?;
        w.blank()?;
        w.open(format_args!(
            "fn read_fields(cx: &mut {rt}::Session<'_>, mut name: ::core::option::Option<::std::string::String>) \
             -> ::core::result::Result<Self::Output, {rt}::compiled::NotationError> {{"
        ))?;
        w.line(format_args!(
            "let mut result = <Self::Output as ::core::default::Default>::default();"
        ))?;
        for member in descriptor.members() {
            self.write_member(w, member)?;
        }
        w.line(format_args!("cx.finish_object(name, Self::TYPE_PATH)?;"))?;
        w.line(format_args!("::core::result::Result::Ok(result)"))?;
        w.close(format_args!("}}"))?;
        w.close(format_args!("}}"))?;

        log::debug!(
            "generated `{name}` for `{}` with {} members",
            descriptor.type_path(),
            descriptor.members().len(),
        );
        Ok(())
    }

    /// A required member must be next, an optional one is read only if its
    /// name is next.
    fn write_member(&self, w: &mut SourceWriter, member: &MemberDescriptor) -> Result<(), GenerateError> {
        let wire = member.name();
        let field = field_ident(member.field())?;

        if member.is_optional() {
            w.open(format_args!(
                "if name.as_deref() == ::core::option::Option::Some({wire:?}) {{"
            ))?;
        } else {
            w.line(format_args!(
                "cx.expect_member(&name, {wire:?}, Self::TYPE_PATH, Self::MEMBERS)?;"
            ))?;
        }
        w.line(format_args!("let at = cx.position();"))?;
        let value = self.write_value(w, member.kind(), 0)?;
        if member.is_optional() {
            w.line(format_args!("result.{field} = ::core::option::Option::Some({value});"))?;
        } else {
            w.line(format_args!("result.{field} = {value};"))?;
        }
        w.line(format_args!("name = cx.next_member_name(false)?;"))?;
        if member.is_optional() {
            w.close(format_args!("}}"))?;
        }
        Ok(())
    }

    /// Writes the statements that read one value of `kind` and returns the
    /// expression that yields it. `at` is in scope and holds the value's
    /// offset. `depth` counts enclosing lists.
    fn write_value(&self, w: &mut SourceWriter, kind: &ValueKind, depth: usize) -> Result<String, GenerateError> {
        let rt = &self.runtime;
        let text = &self.options.text;

        Ok(match *kind {
            ValueKind::Int { .. } => format!("{rt}::compiled::int(cx.require_int()?, at)?"),
            ValueKind::UInt { .. } => format!("{rt}::compiled::uint(cx.require_uint()?, at)?"),
            ValueKind::Float => String::from("cx.require_single()?"),
            ValueKind::Double => String::from("cx.require_double()?"),
            ValueKind::String => String::from("cx.require_string()?"),
            ValueKind::Enum(_) if text.enum_as_string => {
                format!("{rt}::compiled::enum_by_name(cx.require_string()?, at)?")
            }
            ValueKind::Enum(_) => format!("{rt}::compiled::enum_by_ordinal(cx.require_int()?, at)?"),
            ValueKind::Sequence(element) => {
                let items = format!("items{depth}");
                w.line(format_args!("let mut {items} = ::std::vec::Vec::new();"))?;
                self.write_list(w, element, &items, depth)?;
                items
            }
            ValueKind::Array { element, .. } => {
                let items = format!("items{depth}");
                w.line(format_args!("let mut {items} = ::std::vec::Vec::new();"))?;
                if text.array_length_prefix {
                    self.write_prefixed(w, element, &items, depth)?;
                } else {
                    self.write_list(w, element, &items, depth)?;
                }
                format!("{rt}::compiled::collect_array({items}, at)?")
            }
            ValueKind::Object(handle) => format!(
                "{rt}::compiled::nest(<{} as {rt}::compiled::CompiledDecoder>::read_object(cx)?)",
                Self::decoder_name(handle)?
            ),
            ValueKind::Polymorphic => String::from("cx.read_polymorphic()?"),
        })
    }

    fn write_list(
        &self,
        w: &mut SourceWriter,
        element: &ValueKind,
        items: &str,
        depth: usize,
    ) -> Result<(), GenerateError> {
        w.open(format_args!("if cx.begin_list()? {{"))?;
        w.open(format_args!("loop {{"))?;
        w.line(format_args!("let at = cx.position();"))?;
        let value = self.write_value(w, element, depth + 1)?;
        w.line(format_args!("{items}.push({value});"))?;
        w.open(format_args!("if !cx.next_element()? {{"))?;
        w.line(format_args!("break;"))?;
        w.close(format_args!("}}"))?;
        w.close(format_args!("}}"))?;
        w.close(format_args!("}}"))?;
        Ok(())
    }

    fn write_prefixed(
        &self,
        w: &mut SourceWriter,
        element: &ValueKind,
        items: &str,
        depth: usize,
    ) -> Result<(), GenerateError> {
        let rt = &self.runtime;
        w.open(format_args!(
            "if let ::core::option::Option::Some(count) = cx.begin_prefixed()? {{"
        ))?;
        w.line(format_args!("{items}.reserve({rt}::compiled::capacity(count));"))?;
        w.open(format_args!("for _ in 0..count {{"))?;
        w.line(format_args!("cx.require(\",\")?;"))?;
        w.line(format_args!("let at = cx.position();"))?;
        let value = self.write_value(w, element, depth + 1)?;
        w.line(format_args!("{items}.push({value});"))?;
        w.close(format_args!("}}"))?;
        w.line(format_args!("cx.require(\"]\")?;"))?;
        w.close(format_args!("}}"))?;
        Ok(())
    }
}

/// Depth-first over the types `handle` nests by value.
fn collect(
    registry: &SchemaRegistry,
    handle: TypeHandle,
    seen: &mut HashSet<TypeHandle>,
    out: &mut Vec<Arc<TypeDescriptor>>,
) {
    if !seen.insert(handle) {
        return;
    }
    let descriptor = registry.get_handle(handle);
    out.push(Arc::clone(&descriptor));
    for member in descriptor.members() {
        let mut kind = member.kind();
        while let ValueKind::Sequence(element) | ValueKind::Array { element, .. } = *kind {
            kind = element;
        }
        if let ValueKind::Object(nested) = *kind {
            collect(registry, nested, seen, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DecoderGenerator;
    use crate::GenerateError;
    use ts_schema::derive::Notation;
    use ts_schema::{
        FormatOptions, NotationError, Object, SchemaReason, SchemaRegistry, StructuralOptions, TextOptions,
        TypeHandle,
    };

    #[derive(Notation, Default)]
    struct Pair {
        left: u8,
        right: Option<String>,
    }

    #[derive(Notation, Default, Clone, Copy)]
    enum Level {
        #[default]
        Low,
        High,
    }

    #[derive(Notation, Default)]
    #[notation(class, type_path = "demo.Everything")]
    struct Everything {
        grid: Vec<Vec<i32>>,
        bytes: [u8; 2],
        level: Level,
        pair: Pair,
        shared: Option<Box<Pair>>,
        any: Box<dyn Object>,
        r#type: f64,
    }

    #[derive(Notation, Default)]
    #[notation(class)]
    struct Labelled {
        #[notation(rename = "class")]
        label: String,
    }

    mod other {
        use ts_schema::derive::Notation;

        #[derive(Notation, Default)]
        pub struct Pair {
            pub only: f32,
        }
    }

    #[derive(Notation, Default)]
    struct Both {
        a: Pair,
        b: other::Pair,
    }

    #[test]
    fn one_step_per_member() {
        let registry = SchemaRegistry::new();
        let generator = DecoderGenerator::new(FormatOptions::default());
        let source = generator.generate(&registry.get::<Pair>()).unwrap();

        let expected = r#"/// Decodes `ts_codegen::generator::tests::Pair`.
pub struct PairDecoder;

#[allow(unused_mut, unused_variables, unused_qualifications, clippy::all)]
impl ::ts_text::compiled::CompiledDecoder for PairDecoder {
    type Output = ts_codegen::generator::tests::Pair;

    const TYPE_PATH: &'static str = "ts_codegen::generator::tests::Pair";
    const IS_CLASS: bool = false;
    const EMIT_TYPE_TAGS: bool = false;
    const CLASS_TAG: &'static str = "class";
    const ENUM_AS_STRING: bool = false;
    const ARRAY_LENGTH_PREFIX: bool = false;
    const MEMBERS: &'static [&'static str] = &["left", "right"];

    fn read_fields(cx: &mut ::ts_text::Session<'_>, mut name: ::core::option::Option<::std::string::String>) -> ::core::result::Result<Self::Output, ::ts_text::compiled::NotationError> {
        let mut result = <Self::Output as ::core::default::Default>::default();
        cx.expect_member(&name, "left", Self::TYPE_PATH, Self::MEMBERS)?;
        let at = cx.position();
        result.left = ::ts_text::compiled::uint(cx.require_uint()?, at)?;
        name = cx.next_member_name(false)?;
        if name.as_deref() == ::core::option::Option::Some("right") {
            let at = cx.position();
            result.right = ::core::option::Option::Some(cx.require_string()?);
            name = cx.next_member_name(false)?;
        }
        cx.finish_object(name, Self::TYPE_PATH)?;
        ::core::result::Result::Ok(result)
    }
}
"#;
        assert_eq!(source, expected);
    }

    #[test]
    fn kinds_and_options_are_resolved_at_generation() {
        let registry = SchemaRegistry::new();
        let descriptor = registry.get::<Everything>();

        let source = DecoderGenerator::new(FormatOptions::default())
            .with_runtime_path("crate::rt")
            .generate(&descriptor)
            .unwrap();
        assert!(source.contains("const TYPE_PATH: &'static str = \"demo.Everything\";"));
        assert!(source.contains("type Output = ts_codegen::generator::tests::Everything;"));
        assert!(source.contains("const IS_CLASS: bool = true;"));
        assert!(source.contains("items1.push(crate::rt::compiled::int(cx.require_int()?, at)?);"));
        assert!(source.contains("result.grid = items0;"));
        assert!(source.contains("result.bytes = crate::rt::compiled::collect_array(items0, at)?;"));
        assert!(source.contains("crate::rt::compiled::enum_by_ordinal(cx.require_int()?, at)?"));
        assert!(source.contains(
            "result.pair = crate::rt::compiled::nest(<PairDecoder as crate::rt::compiled::CompiledDecoder>::read_object(cx)?);"
        ));
        assert!(source.contains("result.shared = ::core::option::Option::Some(crate::rt::compiled::nest("));
        assert!(source.contains("result.any = cx.read_polymorphic()?;"));
        assert!(source.contains("result.r#type = cx.require_double()?;"));
        assert!(source.contains("\"type\""));
        assert!(!source.contains("begin_prefixed"));

        let text = TextOptions::default().with_enum_as_string(true).with_array_length_prefix(true);
        let source = DecoderGenerator::new(FormatOptions::default().with_text(text))
            .generate(&descriptor)
            .unwrap();
        assert!(source.contains("::ts_text::compiled::enum_by_name(cx.require_string()?, at)?"));
        assert!(source.contains("if let ::core::option::Option::Some(count) = cx.begin_prefixed()? {"));
        assert!(source.contains("const ARRAY_LENGTH_PREFIX: bool = true;"));
    }

    #[test]
    fn class_tag_collisions_are_refused() {
        let registry = SchemaRegistry::new();
        let descriptor = registry.get::<Labelled>();
        let tagged = FormatOptions::default().with_structural(StructuralOptions::new().with_type_tags(true));

        let err = DecoderGenerator::new(tagged.clone()).generate(&descriptor).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Notation(NotationError::Schema {
                reason: SchemaReason::TagCollision { member: "class", .. },
                ..
            })
        ));

        let renamed = tagged.with_text(TextOptions::default().with_class_tag("$type"));
        assert!(DecoderGenerator::new(renamed).generate(&descriptor).is_ok());
        assert!(DecoderGenerator::new(FormatOptions::default()).generate(&descriptor).is_ok());
    }

    #[test]
    fn modules_include_nested_types_once() {
        let registry = SchemaRegistry::new();
        let generator = DecoderGenerator::new(FormatOptions::default());
        let source = generator
            .generate_module(&registry, &[TypeHandle::of::<Everything>(), TypeHandle::of::<Pair>()])
            .unwrap();

        assert!(source.starts_with("// @generated by ts_codegen. Do not edit.\n"));
        let everything = source.find("pub struct EverythingDecoder;").unwrap();
        let pair = source.find("pub struct PairDecoder;").unwrap();
        assert!(everything < pair);
        assert_eq!(source.matches("pub struct PairDecoder;").count(), 1);
        assert!(!source.contains("LevelDecoder"));
    }

    #[test]
    fn decoder_names_must_be_unique() {
        let registry = SchemaRegistry::new();
        let generator = DecoderGenerator::new(FormatOptions::default());
        let err = generator
            .generate_module(&registry, &[TypeHandle::of::<Both>()])
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::DuplicateDecoder { ref name, .. } if name == "PairDecoder"
        ));
    }
}
