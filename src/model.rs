//! Descriptor model handed over by the resolver.
//!
//! Everything here is plain data: the synthesizer, selector and assembler only
//! read it. Record references go through a [`RecordTable`] by name so that
//! self-referential records can be described at all.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ————————————————————————————————————————————————————————————————————————————
// TYPE REFERENCES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Char,
    Byte,
    Int16,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(Primitive),
    Nullable(Box<TypeRef>),  // exactly one layer
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    Array(Box<TypeRef>),
    /// User-defined composite, looked up in a [`RecordTable`] by name.
    Record(String),
    /// Reported as unresolved by the resolver; carries its source text.
    Unresolved(String),
}

impl TypeRef {
    pub fn primitive(kind: Primitive) -> Self { Self::Primitive(kind) }
    pub fn string() -> Self { Self::Primitive(Primitive::String) }
    pub fn int32() -> Self { Self::Primitive(Primitive::Int32) }
    pub fn int64() -> Self { Self::Primitive(Primitive::Int64) }
    pub fn float64() -> Self { Self::Primitive(Primitive::Float64) }
    pub fn boolean() -> Self { Self::Primitive(Primitive::Boolean) }
    pub fn void() -> Self { Self::Primitive(Primitive::Void) }
    pub fn record(name: impl Into<String>) -> Self { Self::Record(name.into()) }
    pub fn list(element: TypeRef) -> Self { Self::List(Box::new(element)) }
    pub fn set(element: TypeRef) -> Self { Self::Set(Box::new(element)) }
    pub fn array(element: TypeRef) -> Self { Self::Array(Box::new(element)) }
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map { key: Box::new(key), value: Box::new(value) }
    }

    /// Wrap in `Nullable`, never producing `Nullable(Nullable(_))`.
    pub fn nullable(inner: TypeRef) -> Self {
        match inner {
            already @ Self::Nullable(_) => already,
            other => Self::Nullable(Box::new(other)),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Void))
    }

    /// First `Unresolved` text found anywhere in this reference.
    pub fn find_unresolved(&self) -> Option<&str> {
        match self {
            Self::Unresolved(text) => Some(text),
            Self::Primitive(_) | Self::Record(_) => None,
            Self::Nullable(inner) | Self::List(inner) | Self::Set(inner) | Self::Array(inner) => {
                inner.find_unresolved()
            }
            Self::Map { key, value } => key.find_unresolved().or_else(|| value.find_unresolved()),
        }
    }

    /// True if a `Nullable` directly wraps another `Nullable` anywhere inside.
    pub fn has_stacked_nullable(&self) -> bool {
        match self {
            Self::Nullable(inner) => matches!(**inner, Self::Nullable(_)) || inner.has_stacked_nullable(),
            Self::List(inner) | Self::Set(inner) | Self::Array(inner) => inner.has_stacked_nullable(),
            Self::Map { key, value } => key.has_stacked_nullable() || value.has_stacked_nullable(),
            Self::Primitive(_) | Self::Record(_) | Self::Unresolved(_) => false,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RECORDS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl Visibility {
    pub fn is_private(self) -> bool { self == Self::Private }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_literal: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty, visibility: Visibility::Public, override_literal: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDeclaration {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,  // declared order
}

impl RecordDeclaration {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self { name: name.into(), fields }
    }
}

/// Record declarations keyed by name, in resolver order.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: IndexMap<String, RecordDeclaration>,
}

impl RecordTable {
    pub fn new() -> Self { Self::default() }

    /// First declaration of a name wins; later duplicates are ignored.
    pub fn insert(&mut self, record: RecordDeclaration) {
        self.records.entry(record.name.clone()).or_insert(record);
    }

    pub fn get(&self, name: &str) -> Option<&RecordDeclaration> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &RecordDeclaration> {
        self.records.values()
    }
}

impl FromIterator<RecordDeclaration> for RecordTable {
    fn from_iter<I: IntoIterator<Item = RecordDeclaration>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MEMBERS
// ————————————————————————————————————————————————————————————————————————————

/// Where a member came from, as seen by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Declared,
    Inherited(String),
    /// equals/hashCode/toString style members of the language's root type
    ImplicitRoot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }
}

fn void_type() -> TypeRef { TypeRef::void() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default = "void_type")]
    pub returns: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_literal: Option<String>,
    #[serde(default)]
    pub excluded: bool,
    #[serde(default)]
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_literal: Option<String>,
    #[serde(default)]
    pub excluded: bool,
    #[serde(default)]
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDescriptor {
    Function(FunctionDescriptor),
    Property(PropertyDescriptor),
}

impl MemberDescriptor {
    pub fn function(name: impl Into<String>, parameters: Vec<Parameter>, returns: TypeRef) -> Self {
        Self::Function(FunctionDescriptor {
            name: name.into(),
            parameters,
            returns,
            visibility: Visibility::Public,
            override_literal: None,
            excluded: false,
            origin: Origin::Declared,
        })
    }

    pub fn property(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::Property(PropertyDescriptor {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            override_literal: None,
            excluded: false,
            origin: Origin::Declared,
        })
    }

    pub fn with_override(mut self, literal: impl Into<String>) -> Self {
        let literal = Some(literal.into());
        match &mut self {
            Self::Function(f) => f.override_literal = literal,
            Self::Property(p) => p.override_literal = literal,
        }
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        match &mut self {
            Self::Function(f) => f.visibility = visibility,
            Self::Property(p) => p.visibility = visibility,
        }
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        match &mut self {
            Self::Function(f) => f.origin = origin,
            Self::Property(p) => p.origin = origin,
        }
        self
    }

    pub fn excluded(mut self) -> Self {
        match &mut self {
            Self::Function(f) => f.excluded = true,
            Self::Property(p) => p.excluded = true,
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Property(p) => &p.name,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Function(f) => f.visibility,
            Self::Property(p) => p.visibility,
        }
    }

    pub fn override_literal(&self) -> Option<&str> {
        match self {
            Self::Function(f) => f.override_literal.as_deref(),
            Self::Property(p) => p.override_literal.as_deref(),
        }
    }

    pub fn is_excluded(&self) -> bool {
        match self {
            Self::Function(f) => f.excluded,
            Self::Property(p) => p.excluded,
        }
    }

    pub fn origin(&self) -> &Origin {
        match self {
            Self::Function(f) => &f.origin,
            Self::Property(p) => &p.origin,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Parameters of the member; a property has none.
    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Self::Function(f) => &f.parameters,
            Self::Property(_) => &[],
        }
    }

    /// Return type of a function, or the type of a property.
    pub fn value_type(&self) -> &TypeRef {
        match self {
            Self::Function(f) => &f.returns,
            Self::Property(p) => &p.ty,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TARGETS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Interface,
    AbstractClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Internal,
    Protected,
    Open,
    Abstract,
    Sealed,
    Fun,
    Expect,
    Actual,
}

impl Modifier {
    /// Modifiers implied by the target's kind, or that would stop the fake
    /// from being instantiated, stay on the source type only.
    pub fn carries_over(self) -> bool {
        !matches!(self, Self::Abstract | Self::Sealed | Self::Fun)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Open => "open",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Fun => "fun",
            Self::Expect => "expect",
            Self::Actual => "actual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: TargetKind,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Functions before properties, each group in declaration order.
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

impl TargetDescriptor {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            package: String::new(),
            modifiers: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}
