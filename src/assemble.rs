//! Builds the synthetic type for one target out of its selected members.
//!
//! Each member contributes three parts that always travel together: a
//! constructor parameter carrying the default callable, the private field it
//! initialises, and the override forwarding to that field. A member that fails
//! contributes none of them.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, MemberError};
use crate::ir::{
    Callable, ConstructorParam, DefaultBody, DefaultValue, InjectableField, Linkage,
    OverrideMember, OverrideShape, Supertype, SyntheticTypeSpec,
};
use crate::model::{MemberDescriptor, RecordTable, TargetDescriptor, TargetKind, Visibility};
use crate::synth::synthesize;

pub const TYPE_PREFIX: &str = "Fake";
pub const FIELD_SUFFIX: &str = "Fake";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

#[derive(Debug, Clone)]
pub struct Assembly {
    pub spec: SyntheticTypeSpec,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn fake_type_name(target_name: &str) -> String {
    format!("{TYPE_PREFIX}{target_name}")
}

pub fn injectable_name(member_name: &str) -> String {
    format!("{member_name}{FIELD_SUFFIX}")
}

pub fn assemble(
    target: &TargetDescriptor,
    selected: &[&MemberDescriptor],
    records: &RecordTable,
) -> Assembly {
    let linkage = match target.kind {
        TargetKind::Interface => Linkage::Implements,
        TargetKind::AbstractClass => Linkage::Extends,
    };
    let mut spec = SyntheticTypeSpec {
        name: fake_type_name(&target.name),
        package: target.package.clone(),
        modifiers: target.modifiers.iter().copied().filter(|m| m.carries_over()).collect(),
        supertype: Supertype { name: target.name.clone(), linkage },
        constructor: Vec::with_capacity(selected.len()),
        fields: Vec::with_capacity(selected.len()),
        overrides: Vec::with_capacity(selected.len()),
    };
    let mut diagnostics = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    for member in selected {
        let field_name = injectable_name(member.name());
        let outcome = check_shape(member)
            .and_then(|()| {
                // member names and injectable names share the class namespace
                match [field_name.as_str(), member.name()].into_iter().find(|n| taken.contains(*n)) {
                    Some(name) => Err(MemberError::unsupported(format!(
                        "`{name}` is already used by an earlier member"
                    ))),
                    None => Ok(()),
                }
            })
            .and_then(|()| default_value(member, records));

        match outcome {
            Ok(value) => {
                trace!(target_type = %target.name, member = member.name(), "assembled member");
                taken.insert(field_name.clone());
                taken.insert(member.name().to_string());
                push_member(&mut spec, member, field_name, value);
            }
            Err(error) => {
                debug!(target_type = %target.name, member = member.name(), %error, "member left out");
                diagnostics.push(Diagnostic::failed(&target.name, member.name(), error));
            }
        }
    }

    Assembly { spec, diagnostics }
}

fn default_value(member: &MemberDescriptor, records: &RecordTable) -> Result<DefaultValue, MemberError> {
    match member.override_literal() {
        Some(text) => Ok(DefaultValue::Override(text.to_string())),
        None => synthesize(member.value_type(), records).map(DefaultValue::Synthesized),
    }
}

fn push_member(spec: &mut SyntheticTypeSpec, member: &MemberDescriptor, field_name: String, value: DefaultValue) {
    let params = member.parameters().to_vec();
    let callable = Callable { params: params.clone(), returns: member.value_type().clone() };

    spec.constructor.push(ConstructorParam {
        name: field_name.clone(),
        callable: callable.clone(),
        default: DefaultBody::new(params.len(), value),
    });
    spec.fields.push(InjectableField {
        name: field_name.clone(),
        callable,
        visibility: Visibility::Private,
        initializer: field_name.clone(),
    });

    let args = params.iter().map(|p| p.name.clone()).collect();
    let shape = match member {
        MemberDescriptor::Function(f) => OverrideShape::Function { params, returns: f.returns.clone() },
        MemberDescriptor::Property(p) => OverrideShape::Property { ty: p.ty.clone() },
    };
    spec.overrides.push(OverrideMember {
        name: member.name().to_string(),
        shape,
        invokes: field_name,
        args,
    });
}

/// Rejects members the generated code could not express.
pub fn check_shape(member: &MemberDescriptor) -> Result<(), MemberError> {
    if !IDENTIFIER.is_match(member.name()) {
        return Err(MemberError::unsupported(format!("`{}` is not an identifier", member.name())));
    }

    let mut seen = HashSet::new();
    for param in member.parameters() {
        if !IDENTIFIER.is_match(&param.name) {
            return Err(MemberError::unsupported(format!("parameter `{}` is not an identifier", param.name)));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(MemberError::unsupported(format!("parameter `{}` is declared twice", param.name)));
        }
        if param.ty.is_void() {
            return Err(MemberError::unsupported(format!("parameter `{}` has type void", param.name)));
        }
    }

    let types = member.parameters().iter().map(|p| &p.ty).chain([member.value_type()]);
    for ty in types {
        if let Some(text) = ty.find_unresolved() {
            return Err(MemberError::unresolved(text));
        }
        if ty.has_stacked_nullable() {
            return Err(MemberError::unsupported("nullable type wrapped in another nullable"));
        }
    }
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //
