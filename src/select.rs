//! Which members of a target take part in its fake, and in what order.
use crate::diagnostic::SkipReason;
use crate::model::{MemberDescriptor, Origin, TargetDescriptor};

#[derive(Debug, Clone, Default)]
pub struct Selection<'t> {
    /// Functions in declaration order, then properties in declaration order.
    pub selected: Vec<&'t MemberDescriptor>,
    pub skipped: Vec<(&'t MemberDescriptor, SkipReason)>,
}

/// Eligible members of `target`, functions first.
pub fn select(target: &TargetDescriptor) -> Vec<&MemberDescriptor> {
    partition(target).selected
}

/// Like [`select`], also returning the members that were left out and why.
pub fn partition(target: &TargetDescriptor) -> Selection<'_> {
    let mut functions = Vec::new();
    let mut properties = Vec::new();
    let mut skipped = Vec::new();

    for member in &target.members {
        match skip_reason(member) {
            Some(reason) => skipped.push((member, reason)),
            None if member.is_function() => functions.push(member),
            None => properties.push(member),
        }
    }

    functions.extend(properties);
    Selection { selected: functions, skipped }
}

// rules are checked in this order; the first match names the reason
fn skip_reason(member: &MemberDescriptor) -> Option<SkipReason> {
    if member.visibility().is_private() {
        return Some(SkipReason::Private);
    }
    if member.is_excluded() {
        return Some(SkipReason::OptedOut);
    }
    if *member.origin() == Origin::ImplicitRoot {
        return Some(SkipReason::ImplicitRoot);
    }
    None
}
