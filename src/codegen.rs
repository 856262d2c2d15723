//! Kotlin rendering of a [`SyntheticTypeSpec`].
//!
//! Output depends only on the synthetic type, so regenerating from unchanged descriptors
//! gives byte-identical files.
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::ir::{Callable, Linkage, OverrideMember, OverrideShape, SyntheticTypeSpec};
use crate::model::{Parameter, Primitive, TypeRef, Visibility};
use crate::synth::literal::ident;

const INDENT: &str = "    ";

pub const HEADER: &str = "// Generated by fake-synth. Do not edit.";

pub struct Codegen {
    out: String,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Append one file's worth of source. Successive specs are separated by a
    /// blank line.
    pub fn emit(&mut self, spec: &SyntheticTypeSpec) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.line(0, HEADER);
        if !spec.package.is_empty() {
            let package = spec.package.split('.').map(ident).collect::<Vec<_>>().join(".");
            self.line(0, &format!("package {package}"));
        }
        self.out.push('\n');
        self.class_header(spec);
        self.class_body(spec);
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn class_header(&mut self, spec: &SyntheticTypeSpec) {
        let mut head = String::new();
        for modifier in &spec.modifiers {
            head.push_str(modifier.as_str());
            head.push(' ');
        }
        let _ = write!(head, "class {}", ident(&spec.name));

        let supertype = match spec.supertype.linkage {
            Linkage::Implements => ident(&spec.supertype.name),
            Linkage::Extends => format!("{}()", ident(&spec.supertype.name)),
        };
        let open_body = if has_body(spec) { " {" } else { "" };

        if spec.constructor.is_empty() {
            self.line(0, &format!("{head} : {supertype}{open_body}"));
            return;
        }
        self.line(0, &format!("{head}("));
        for param in &spec.constructor {
            let text = format!("{}: {} = {},", ident(&param.name), callable_type(&param.callable), param.default);
            self.line(1, &text);
        }
        self.line(0, &format!(") : {supertype}{open_body}"));
    }

    fn class_body(&mut self, spec: &SyntheticTypeSpec) {
        if !has_body(spec) {
            return;
        }
        for field in &spec.fields {
            let text = format!(
                "{}val {}: {} = {}",
                visibility_prefix(field.visibility),
                ident(&field.name),
                callable_type(&field.callable),
                ident(&field.initializer),
            );
            self.line(1, &text);
        }
        for member in &spec.overrides {
            self.out.push('\n');
            self.override_member(member);
        }
        self.line(0, "}");
    }

    fn override_member(&mut self, member: &OverrideMember) {
        let call = format!(
            "{}({})",
            ident(&member.invokes),
            member.args.iter().map(|a| ident(a)).collect::<Vec<_>>().join(", "),
        );
        match &member.shape {
            OverrideShape::Function { params, returns } => {
                let text = format!(
                    "override fun {}({}): {} = {call}",
                    ident(&member.name),
                    parameter_list(params),
                    kotlin_type(returns),
                );
                self.line(1, &text);
            }
            OverrideShape::Property { ty } => {
                self.line(1, &format!("override val {}: {}", ident(&member.name), kotlin_type(ty)));
                self.line(2, &format!("get() = {call}"));
            }
        }
    }
}

/// Convenience: one spec → source text.
pub fn render(spec: &SyntheticTypeSpec) -> String {
    let mut cg = Codegen::new();
    cg.emit(spec);
    cg.into_string()
}

/// `com/example/FakeThing.kt`
pub fn file_path(spec: &SyntheticTypeSpec) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in spec.package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.kt", spec.name));
    path
}

pub fn kotlin_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(kind) => primitive_name(*kind).to_string(),
        TypeRef::Nullable(inner) => format!("{}?", kotlin_type(inner)),
        TypeRef::List(element) => format!("List<{}>", kotlin_type(element)),
        TypeRef::Set(element) => format!("Set<{}>", kotlin_type(element)),
        TypeRef::Map { key, value } => format!("Map<{}, {}>", kotlin_type(key), kotlin_type(value)),
        TypeRef::Array(element) => format!("Array<{}>", kotlin_type(element)),
        TypeRef::Record(name) | TypeRef::Unresolved(name) => name.clone(),
    }
}

fn primitive_name(kind: Primitive) -> &'static str {
    match kind {
        Primitive::String => "String",
        Primitive::Int32 => "Int",
        Primitive::Int64 => "Long",
        Primitive::Int16 => "Short",
        Primitive::Byte => "Byte",
        Primitive::Float32 => "Float",
        Primitive::Float64 => "Double",
        Primitive::Boolean => "Boolean",
        Primitive::Char => "Char",
        Primitive::Void => "Unit",
    }
}

fn callable_type(callable: &Callable) -> String {
    format!("({}) -> {}", parameter_list(&callable.params), kotlin_type(&callable.returns))
}

fn parameter_list(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", ident(&p.name), kotlin_type(&p.ty)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn visibility_prefix(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "",
        Visibility::Internal => "internal ",
        Visibility::Protected => "protected ",
        Visibility::Private => "private ",
    }
}

fn has_body(spec: &SyntheticTypeSpec) -> bool {
    !spec.fields.is_empty() || !spec.overrides.is_empty()
}
