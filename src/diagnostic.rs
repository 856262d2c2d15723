//! Per-member failures and the notices handed back to the host.
//!
//! Nothing in here is fatal: a failed member is dropped from its synthetic type
//! and reported, the rest of the target carries on.
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberError {
    #[error("type `{name}` could not be resolved")]
    UnresolvedType { name: String },

    #[error("record default cycles back on itself: {}", path.join(" -> "))]
    SynthesisCycle { path: Vec<String> },

    #[error("unsupported member shape: {detail}")]
    UnsupportedMemberShape { detail: String },
}

impl MemberError {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedType { name: name.into() }
    }

    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedMemberShape { detail: detail.into() }
    }
}

/// Why the selector left a member out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Private,
    OptedOut,
    ImplicitRoot,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Private => "private member",
            Self::OptedOut => "explicitly excluded",
            Self::ImplicitRoot => "inherited from the implicit root type",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Note,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Skipped(SkipReason),
    Failed(MemberError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub target: String,
    pub member: String,
    pub severity: Severity,
    pub reason: Reason,
}

impl Diagnostic {
    pub fn skipped(target: &str, member: &str, reason: SkipReason) -> Self {
        Self {
            target: target.to_string(),
            member: member.to_string(),
            severity: Severity::Note,
            reason: Reason::Skipped(reason),
        }
    }

    pub fn failed(target: &str, member: &str, error: MemberError) -> Self {
        Self {
            target: target.to_string(),
            member: member.to_string(),
            severity: Severity::Warning,
            reason: Reason::Failed(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.reason, Reason::Failed(_))
    }

    pub fn error(&self) -> Option<&MemberError> {
        match &self.reason {
            Reason::Failed(error) => Some(error),
            Reason::Skipped(_) => None,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Reason::Skipped(why) => write!(f, "{}.{}: skipped ({why})", self.target, self.member),
            Reason::Failed(error) => write!(f, "{}.{}: not generated, {error}", self.target, self.member),
        }
    }
}
