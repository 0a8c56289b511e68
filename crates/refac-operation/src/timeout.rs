//! Per-operation-kind default/maximum timeouts (spec §6).

use std::time::Duration;

use refac_error::{ErrorCode, RefactoringError, Result};

/// The operation-kind buckets spec §6's timeout table groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// move-type-to-file, move-type-to-namespace, rename-symbol, and every
    /// extract-* operation.
    MoveRenameExtract,
    /// organize-usings against a single document.
    OrganizeSingleFile,
    /// organize-usings across every document in the solution.
    OrganizeAllFiles,
    /// inline-constant.
    InlineConstant,
    /// Every C9 query/diagnostic operation.
    Diagnose,
}

/// A default/maximum timeout pair, the one piece of configuration the
/// engine owns (it keeps no persistent state of its own — see SPEC_FULL §A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// Applied when a caller does not request a specific timeout.
    pub default: Duration,
    /// The ceiling a caller-requested timeout may not exceed.
    pub max: Duration,
}

impl TimeoutPolicy {
    /// The policy spec §6's table assigns to `kind`.
    pub fn for_kind(kind: OperationKind) -> Self {
        match kind {
            OperationKind::MoveRenameExtract => Self { default: Duration::from_secs(30), max: Duration::from_secs(120) },
            OperationKind::OrganizeSingleFile => Self { default: Duration::from_secs(10), max: Duration::from_secs(30) },
            OperationKind::OrganizeAllFiles => Self { default: Duration::from_secs(60), max: Duration::from_secs(300) },
            OperationKind::InlineConstant => Self { default: Duration::from_secs(15), max: Duration::from_secs(60) },
            OperationKind::Diagnose => Self { default: Duration::from_secs(10), max: Duration::from_secs(30) },
        }
    }

    /// Resolve a caller-requested timeout: `None` uses `default`; `Some` is
    /// accepted as-is up to `max`.
    ///
    /// # Errors
    ///
    /// `InvalidSelection` if `requested` exceeds `max`.
    pub fn resolve(&self, requested: Option<Duration>) -> Result<Duration> {
        match requested {
            None => Ok(self.default),
            Some(d) if d <= self.max => Ok(d),
            Some(d) => Err(RefactoringError::new(
                ErrorCode::InvalidSelection,
                format!("requested timeout {d:?} exceeds the {:?} maximum for this operation kind", self.max),
            )),
        }
    }
}
