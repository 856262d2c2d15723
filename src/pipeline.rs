//! select → synthesize → assemble, per target.
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::assemble::assemble;
use crate::diagnostic::Diagnostic;
use crate::ir::SyntheticTypeSpec;
use crate::model::{RecordTable, TargetDescriptor};
use crate::select::partition;

#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub spec: SyntheticTypeSpec,
    /// Skipped members first (selector order), then failed ones.
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }
}

pub fn generate(target: &TargetDescriptor, records: &RecordTable) -> Generated {
    let selection = partition(target);
    let mut diagnostics: Vec<Diagnostic> = selection
        .skipped
        .iter()
        .map(|(member, reason)| Diagnostic::skipped(&target.name, member.name(), *reason))
        .collect();

    let assembly = assemble(target, &selection.selected, records);
    diagnostics.extend(assembly.diagnostics);

    debug!(
        target_type = %target.name,
        members = assembly.spec.member_count(),
        diagnostics = diagnostics.len(),
        "generated fake"
    );
    Generated { spec: assembly.spec, diagnostics }
}

/// Targets are independent; results come back in input order.
pub fn generate_all(targets: &[TargetDescriptor], records: &RecordTable) -> Vec<Generated> {
    targets.par_iter().map(|target| generate(target, records)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{MemberError, Reason, SkipReason};
    use crate::model::{FieldDescriptor, MemberDescriptor, Origin, Parameter, RecordDeclaration, TargetKind, TypeRef, Visibility};

    fn records() -> RecordTable {
        [RecordDeclaration::new("Node", vec![
            FieldDescriptor::new("id", TypeRef::int32()),
            FieldDescriptor::new("parent", TypeRef::record("Node")),
        ])]
        .into_iter()
        .collect()
    }

    #[test]
    fn self_referential_record_fails_one_member() {
        let target = TargetDescriptor::new("Tree", TargetKind::Interface)
            .with_member(MemberDescriptor::function("root", vec![], TypeRef::record("Node")))
            .with_member(MemberDescriptor::function("size", vec![], TypeRef::int32()))
            .with_member(MemberDescriptor::function("rename", vec![Parameter::new("name", TypeRef::string())], TypeRef::void()));
        let out = generate(&target, &records());

        let names: Vec<_> = out.spec.constructor.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["sizeFake", "renameFake"]);
        let failures: Vec<_> = out.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].member, "root");
        assert_eq!(
            failures[0].error(),
            Some(&MemberError::SynthesisCycle { path: vec!["Node".into(), "Node".into()] })
        );
    }

    #[test]
    fn skipped_members_are_reported_as_notes() {
        let target = TargetDescriptor::new("Repo", TargetKind::Interface)
            .with_member(MemberDescriptor::function("hashCode", vec![], TypeRef::int32()).with_origin(Origin::ImplicitRoot))
            .with_member(MemberDescriptor::property("token", TypeRef::string()).with_visibility(Visibility::Private))
            .with_member(MemberDescriptor::property("size", TypeRef::int32()));
        let out = generate(&target, &RecordTable::new());
        assert_eq!(out.spec.member_count(), 1);
        assert_eq!(out.failures().count(), 0);
        let reasons: Vec<_> = out.diagnostics.iter().map(|d| d.reason.clone()).collect();
        assert_eq!(reasons, [
            Reason::Skipped(SkipReason::ImplicitRoot),
            Reason::Skipped(SkipReason::Private),
        ]);
    }

    #[test]
    fn parallel_run_keeps_input_order() {
        let targets: Vec<_> = (0..32)
            .map(|i| {
                TargetDescriptor::new(format!("Service{i}"), TargetKind::Interface)
                    .with_member(MemberDescriptor::function("ping", vec![], TypeRef::boolean()))
            })
            .collect();
        let out = generate_all(&targets, &RecordTable::new());
        let names: Vec<_> = out.iter().map(|g| g.spec.name.clone()).collect();
        let expected: Vec<_> = (0..32).map(|i| format!("FakeService{i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn regeneration_is_identical() {
        let target = TargetDescriptor::new("Tree", TargetKind::AbstractClass)
            .with_member(MemberDescriptor::property("depth", TypeRef::int32()))
            .with_member(MemberDescriptor::function("root", vec![], TypeRef::nullable(TypeRef::record("Node"))));
        let first = serde_json::to_string(&generate(&target, &records())).unwrap();
        let second = serde_json::to_string(&generate(&target, &records())).unwrap();
        assert_eq!(first, second);
    }
}
