//! Default value synthesis: `TypeRef` → literal expression text.
//!
//! Dispatch is an exhaustive match over the closed `TypeRef` grammar:
//! - nullable slots are always `null`, whatever they wrap;
//! - containers are their empty literal, element types are never visited;
//! - records become a named-argument constructor call over their non-private
//!   fields, recursively.
//!
//! The only state is the stack of records currently being built. It lives on
//! one call chain and is popped on the way out, so sibling fields never see
//! each other's records.
pub mod literal;

use crate::diagnostic::MemberError;
use crate::model::{FieldDescriptor, RecordTable, TypeRef};

/// Default literal for `ty`. Fails for undescribed records and for record
/// graphs that reach themselves through non-nullable fields.
pub fn synthesize(ty: &TypeRef, records: &RecordTable) -> Result<String, MemberError> {
    let mut active = Vec::new();
    synthesize_in(ty, records, &mut active)
}

fn synthesize_in<'r>(
    ty: &TypeRef,
    records: &'r RecordTable,
    active: &mut Vec<&'r str>,
) -> Result<String, MemberError> {
    match ty {
        TypeRef::Primitive(kind) => Ok(literal::primitive(*kind).to_string()),
        TypeRef::Nullable(_) => Ok(literal::NULL.to_string()),
        TypeRef::List(_) => Ok(literal::EMPTY_LIST.to_string()),
        TypeRef::Set(_) => Ok(literal::EMPTY_SET.to_string()),
        TypeRef::Map { .. } => Ok(literal::EMPTY_MAP.to_string()),
        TypeRef::Array(_) => Ok(literal::EMPTY_ARRAY.to_string()),
        TypeRef::Unresolved(text) => Err(MemberError::unresolved(text.as_str())),
        TypeRef::Record(name) => {
            let Some(record) = records.get(name) else {
                return Err(MemberError::unresolved(name.as_str()));
            };
            if active.contains(&record.name.as_str()) {
                let mut path: Vec<String> = active.iter().map(|n| n.to_string()).collect();
                path.push(record.name.clone());
                return Err(MemberError::SynthesisCycle { path });
            }

            active.push(record.name.as_str());
            let args = visible_fields(&record.fields)
                .map(|field| {
                    let value = match &field.override_literal {
                        Some(text) => text.clone(),
                        // an argument needs a value even where a body would stay empty
                        None if field.ty.is_void() => literal::UNIT.to_string(),
                        None => synthesize_in(&field.ty, records, active)?,
                    };
                    Ok((field.name.as_str(), value))
                })
                .collect::<Result<Vec<_>, MemberError>>();
            active.pop();

            Ok(literal::constructor_call(&record.name, args?))
        }
    }
}

fn visible_fields(fields: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    fields.iter().filter(|f| !f.visibility.is_private())
}

// ------------------------------- Tests ------------------------------------ //
