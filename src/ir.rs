// Synthetic type specification: structured output for an emitter. No source text
// here except the literal expressions, which are already target-language text.

use serde::Serialize;

use crate::model::{Modifier, Parameter, TypeRef, Visibility};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticTypeSpec {
    pub name: String,              // "Fake" + target name
    pub package: String,           // same as the target
    pub modifiers: Vec<Modifier>,
    pub supertype: Supertype,
    pub constructor: Vec<ConstructorParam>,
    pub fields: Vec<InjectableField>,
    pub overrides: Vec<OverrideMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    Implements,
    Extends,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supertype {
    pub name: String,
    pub linkage: Linkage,
}

/// Function type of an injectable field. Properties are zero-parameter callables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Callable {
    pub params: Vec<Parameter>,
    pub returns: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "text", rename_all = "snake_case")]
pub enum DefaultValue {
    Synthesized(String),
    Override(String),
}

impl DefaultValue {
    pub fn text(&self) -> &str {
        match self {
            Self::Synthesized(text) | Self::Override(text) => text,
        }
    }
}

/// Body of the default callable: optionally discards its parameters by name,
/// then yields `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultBody {
    /// How many `_` placeholders precede the arrow; 0 unless the function has
    /// more than one parameter.
    pub discarded: usize,
    pub value: DefaultValue,
}

impl DefaultBody {
    pub fn new(param_count: usize, value: DefaultValue) -> Self {
        let discarded = if param_count > 1 { param_count } else { 0 };
        Self { discarded, value }
    }

    /// True if the body neither names parameters nor yields anything.
    pub fn is_noop(&self) -> bool {
        self.discarded == 0 && self.value.text().trim().is_empty()
    }
}

impl std::fmt::Display for DefaultBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_noop() {
            return f.write_str("{}");
        }
        let mut body = String::new();
        if self.discarded > 0 {
            body.push_str(&vec!["_"; self.discarded].join(", "));
            body.push_str(" ->");
        }
        let text = self.value.text().trim();
        if !text.is_empty() {
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(text);
        }
        write!(f, "{{ {body} }}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorParam {
    pub name: String,              // <member>Fake
    pub callable: Callable,
    pub default: DefaultBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjectableField {
    pub name: String,
    pub callable: Callable,
    pub visibility: Visibility,    // always private
    pub initializer: String,       // constructor parameter of the same name
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverrideShape {
    Function { params: Vec<Parameter>, returns: TypeRef },
    Property { ty: TypeRef },
}

/// A member of the source type re-declared on the fake, forwarding to its field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideMember {
    pub name: String,
    pub shape: OverrideShape,
    pub invokes: String,           // injectable field name
    pub args: Vec<String>,         // own parameter names, positional
}

impl SyntheticTypeSpec {
    pub fn member_count(&self) -> usize {
        self.overrides.len()
    }

    pub fn constructor_param(&self, name: &str) -> Option<&ConstructorParam> {
        self.constructor.iter().find(|p| p.name == name)
    }
}
