//! `OperationRunner`: drives one call through `OperationState`, wiring a
//! concrete operation's validate/compute hooks to the Workspace and Commit
//! Layer (spec §3: "client → C7 runner → validate → resolve → compute →
//! preview or commit").

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use refac_commit::{CommitLayer, CommitStats};
use refac_error::{ErrorCode, RefactoringError, Result};
use refac_workspace::{EditSet, Solution, Workspace};
use tracing::{debug, info, instrument, warn};

use crate::cancel::CancellationToken;
use crate::state::OperationState;
use crate::timeout::TimeoutPolicy;

/// What a concrete refactoring or query operation contributes to the
/// runner. Object-safe so callers can hold a `&dyn RefactoringOperation`
/// without knowing the concrete operation type.
pub trait RefactoringOperation {
    /// Synchronous input checks; no workspace reads beyond existence checks
    /// (spec §4.5).
    ///
    /// # Errors
    ///
    /// Any `1xxx` input-validation code.
    fn validate(&self) -> Result<()>;

    /// Resolve symbols/references against `base` and compute the edit set
    /// the operation would apply, observing `cancel` at each bounded-work
    /// boundary (per-document iteration, per-reference group).
    ///
    /// # Errors
    ///
    /// `2xxx` resolution or `3xxx` semantic codes.
    fn compute(&self, base: &Solution, cancel: &CancellationToken) -> Result<EditSet>;
}

/// The result of a completed `OperationRunner::run` call.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// `preview = true`: the edit set was computed but nothing was written.
    Previewed {
        /// The edit set the operation would apply.
        edit_set: EditSet,
    },
    /// `preview = false` and the commit succeeded.
    Committed {
        /// Files touched by the commit.
        stats: CommitStats,
    },
    /// The call was cancelled before reaching a non-cancellable stage.
    Cancelled,
}

/// Drives one `RefactoringOperation` through the C7 state machine.
pub struct OperationRunner {
    timeout_policy: TimeoutPolicy,
    commit: Arc<CommitLayer>,
    state: Mutex<OperationState>,
}

impl OperationRunner {
    /// Construct a runner bound to the timeout policy for this operation's
    /// kind and the commit layer that will materialize its edits.
    pub fn new(timeout_policy: TimeoutPolicy, commit: Arc<CommitLayer>) -> Self {
        Self { timeout_policy, commit, state: Mutex::new(OperationState::Pending) }
    }

    /// The state as of the last observed transition.
    pub fn state(&self) -> OperationState {
        *self.state.lock()
    }

    fn set_state(&self, state: OperationState) {
        *self.state.lock() = state;
        debug!(?state, "operation transitioned");
    }

    /// Run `operation` to completion against `workspace`.
    ///
    /// `preview`: stop after Computing and return the edit set without
    /// touching the workspace or disk. `requested_timeout`: `None` uses
    /// this runner's `TimeoutPolicy` default, clamped to its max.
    ///
    /// # Errors
    ///
    /// Propagates `validate`/`compute`'s errors unchanged (state becomes
    /// `Failed`); `Timeout` if the deadline has already elapsed once
    /// `Applying` has begun (spec §4.5: non-cancellable past that point).
    /// A cancel observed at any earlier boundary, or an elapsed deadline
    /// observed before `Applying`, yields `Ok(RunOutcome::Cancelled)`
    /// instead of an error (spec §4.5: "behaves as if cancelled before
    /// Applying").
    #[instrument(skip(self, workspace, operation, cancel))]
    pub fn run(
        &self,
        workspace: &Workspace,
        operation: &dyn RefactoringOperation,
        preview: bool,
        requested_timeout: Option<Duration>,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome> {
        let deadline = self.timeout_policy.resolve(requested_timeout)?;
        let started = Instant::now();

        self.set_state(OperationState::Validating);
        if let Err(err) = operation.validate() {
            self.set_state(OperationState::Failed);
            return Err(err);
        }

        if cancel.is_cancelled() {
            self.set_state(OperationState::Cancelled);
            return Ok(RunOutcome::Cancelled);
        }

        self.set_state(OperationState::Resolving);
        let base = workspace.current_solution()?;

        self.set_state(OperationState::Computing);
        let edit_set = match operation.compute(&base, cancel) {
            Ok(edits) => edits,
            Err(err) => {
                self.set_state(OperationState::Failed);
                return Err(err);
            }
        };

        if cancel.is_cancelled() {
            self.set_state(OperationState::Cancelled);
            return Ok(RunOutcome::Cancelled);
        }

        if preview {
            self.set_state(OperationState::Previewing);
            info!("operation previewed");
            return Ok(RunOutcome::Previewed { edit_set });
        }

        if started.elapsed() > deadline {
            self.set_state(OperationState::Cancelled);
            return Ok(RunOutcome::Cancelled);
        }

        workspace.begin_operating()?;
        self.set_state(OperationState::Applying);

        let new_solution = match workspace.compute_new_solution(&base, &edit_set) {
            Ok(solution) => solution,
            Err(err) => {
                workspace.end_operating_failure(err.to_string())?;
                self.set_state(OperationState::Failed);
                return Err(err);
            }
        };

        if started.elapsed() > deadline {
            workspace.end_operating_failure("operation exceeded its timeout while Applying")?;
            self.set_state(OperationState::Failed);
            return Err(RefactoringError::new(ErrorCode::Timeout, "operation exceeded its timeout while Applying"));
        }

        self.set_state(OperationState::Committing);
        match self.commit.commit(workspace, &base, new_solution, &edit_set) {
            Ok(stats) => {
                workspace.end_operating_success()?;
                self.set_state(OperationState::Completed);
                info!(
                    files_modified = stats.files_modified.len(),
                    files_created = stats.files_created.len(),
                    files_deleted = stats.files_deleted.len(),
                    "operation committed"
                );
                Ok(RunOutcome::Committed { stats })
            }
            Err(err) => {
                workspace.end_operating_failure(err.to_string())?;
                self.set_state(OperationState::Failed);
                warn!(%err, "commit failed, rolled back");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refac_semantic::Span;
    use refac_semantic_mock::MockLanguage;
    use refac_workspace::{Document, DocumentChange, Project, TextEdit};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn fixture() -> (tempfile::TempDir, Arc<Workspace>, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.cs");
        std::fs::write(&path, "class Widget {}\n").unwrap();

        let workspace = Arc::new(Workspace::new(Arc::new(MockLanguage)));
        let id = workspace.mint_document_id();
        let mut documents = BTreeMap::new();
        documents.insert(id, Arc::new(Document::new(id, path.clone(), "class Widget {}\n")));
        let project = Project {
            name: "Ws".into(),
            path: dir.path().join("Ws.csproj"),
            documents: vec![id],
            project_references: Vec::new(),
            language_tag: "cs".into(),
        };
        let solution = Arc::new(Solution::new(Arc::new(MockLanguage), vec![project], documents));
        workspace.update_solution(solution).unwrap();
        (dir, workspace, path)
    }

    struct AppendHeader {
        document: refac_semantic::DocumentId,
        fail_validate: bool,
    }

    impl RefactoringOperation for AppendHeader {
        fn validate(&self) -> Result<()> {
            if self.fail_validate {
                return Err(RefactoringError::new(ErrorCode::InvalidSelection, "forced validation failure"));
            }
            Ok(())
        }

        fn compute(&self, _base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
            let mut edits = EditSet::new();
            edits.push(DocumentChange::Modify {
                document: self.document,
                edits: vec![TextEdit::new(Span::new(0, 0), "// header\n")],
            });
            Ok(edits)
        }
    }

    fn runner() -> OperationRunner {
        OperationRunner::new(TimeoutPolicy::for_kind(crate::timeout::OperationKind::MoveRenameExtract), Arc::new(CommitLayer::new()))
    }

    #[test]
    fn preview_computes_edits_without_touching_disk_or_workspace() {
        let (_dir, workspace, path) = fixture();
        let base = workspace.current_solution().unwrap();
        let document = base.documents().next().unwrap().id;
        let op = AppendHeader { document, fail_validate: false };
        let runner = runner();

        let outcome = runner.run(&workspace, &op, true, None, &CancellationToken::new()).unwrap();
        assert!(matches!(outcome, RunOutcome::Previewed { .. }));
        assert_eq!(runner.state(), OperationState::Previewing);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class Widget {}\n");
        assert_eq!(workspace.lifecycle(), refac_workspace::WorkspaceState::Ready);
    }

    #[test]
    fn committing_operation_writes_disk_and_returns_to_ready() {
        let (_dir, workspace, path) = fixture();
        let base = workspace.current_solution().unwrap();
        let document = base.documents().next().unwrap().id;
        let op = AppendHeader { document, fail_validate: false };
        let runner = runner();

        let outcome = runner.run(&workspace, &op, false, None, &CancellationToken::new()).unwrap();
        let RunOutcome::Committed { stats } = outcome else { panic!("expected a commit") };
        assert_eq!(stats.files_modified.len(), 1);
        assert_eq!(runner.state(), OperationState::Completed);
        assert_eq!(workspace.lifecycle(), refac_workspace::WorkspaceState::Ready);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("// header"));
    }

    #[test]
    fn validation_failure_leaves_the_workspace_ready() {
        let (_dir, workspace, _path) = fixture();
        let base = workspace.current_solution().unwrap();
        let document = base.documents().next().unwrap().id;
        let op = AppendHeader { document, fail_validate: true };
        let runner = runner();

        let err = runner.run(&workspace, &op, false, None, &CancellationToken::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);
        assert_eq!(runner.state(), OperationState::Failed);
        assert_eq!(workspace.lifecycle(), refac_workspace::WorkspaceState::Ready);
    }

    #[test]
    fn a_token_cancelled_before_the_call_short_circuits_to_cancelled() {
        let (_dir, workspace, _path) = fixture();
        let base = workspace.current_solution().unwrap();
        let document = base.documents().next().unwrap().id;
        let op = AppendHeader { document, fail_validate: false };
        let runner = runner();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = runner.run(&workspace, &op, false, None, &cancel).unwrap();
        assert!(matches!(outcome, RunOutcome::Cancelled));
        assert_eq!(runner.state(), OperationState::Cancelled);
        assert_eq!(workspace.lifecycle(), refac_workspace::WorkspaceState::Ready);
    }
}
