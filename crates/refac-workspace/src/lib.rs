//! The Workspace aggregate root (spec §4.1, component C3).
//!
//! A `Workspace` owns exactly one mutable thing: the pointer to the current
//! `Solution` snapshot. Everything reachable from a snapshot — projects,
//! documents, syntax trees, the semantic model — is immutable once built,
//! so readers holding an `Arc<Solution>` never observe a half-applied edit.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod document;
mod edit;
mod project;
mod solution;
mod state;

pub use document::Document;
pub use edit::{apply_text_edits, ChangeKind, DocumentChange, EditSet, TextEdit};
pub use project::Project;
pub use solution::Solution;
pub use state::WorkspaceState;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use refac_error::{ErrorCode, RefactoringError, Result};
use refac_semantic::{DocumentId, Language};
use tracing::{debug, info, instrument, warn};

/// The Workspace aggregate root.
pub struct Workspace {
    language: Arc<dyn Language>,
    state: RwLock<WorkspaceState>,
    solution: RwLock<Option<Arc<Solution>>>,
    solution_path: RwLock<Option<PathBuf>>,
    next_document_id: AtomicU32,
}

impl Workspace {
    /// Construct an unloaded workspace over the given `Language`.
    pub fn new(language: Arc<dyn Language>) -> Self {
        Self {
            language,
            state: RwLock::new(WorkspaceState::Unloaded),
            solution: RwLock::new(None),
            solution_path: RwLock::new(None),
            next_document_id: AtomicU32::new(0),
        }
    }

    /// The `Language` this workspace was constructed with.
    pub fn language(&self) -> &Arc<dyn Language> {
        &self.language
    }

    /// The current lifecycle state, for diagnostics.
    pub fn lifecycle(&self) -> WorkspaceState {
        *self.state.read()
    }

    /// Load a solution from `path`.
    ///
    /// Transitions `Unloaded|Error → Loading → Ready`, or `→ Error` on
    /// failure.
    ///
    /// # Errors
    ///
    /// `SolutionLoadFailed` carrying the collaborator's load diagnostics.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<()> {
        {
            let mut state = self.state.write();
            if matches!(*state, WorkspaceState::Disposed) {
                return Err(RefactoringError::new(ErrorCode::WorkspaceBusy, "workspace has been disposed"));
            }
            *state = WorkspaceState::Loading;
        }
        info!("loading solution");

        let raw_projects = match self.language.load_solution(path) {
            Ok(projects) => projects,
            Err(diagnostics) => {
                *self.state.write() = WorkspaceState::Error;
                warn!(messages = ?diagnostics.messages, "solution load failed");
                return Err(RefactoringError::new(
                    ErrorCode::SolutionLoadFailed,
                    format!("failed to load solution {}", path.display()),
                )
                .with_detail("messages", diagnostics.messages.join("; ")));
            }
        };

        let mut documents: BTreeMap<DocumentId, Arc<Document>> = BTreeMap::new();
        let mut projects = Vec::new();
        for (project_path, raw) in raw_projects {
            let mut doc_ids = Vec::new();
            for (doc_path, text) in raw.documents {
                let id = self.mint_document_id();
                documents.insert(id, Arc::new(Document::new(id, doc_path, text)));
                doc_ids.push(id);
            }
            projects.push(Project {
                name: raw.name,
                path: project_path,
                documents: doc_ids,
                project_references: raw.project_references,
                language_tag: self.language.file_extension().to_string(),
            });
        }

        let doc_count = documents.len();
        let solution = Solution::new(self.language.clone(), projects, documents);
        *self.solution.write() = Some(Arc::new(solution));
        *self.solution_path.write() = Some(path.to_path_buf());
        *self.state.write() = WorkspaceState::Ready;
        info!(documents = doc_count, "solution loaded");
        Ok(())
    }

    /// The current immutable snapshot.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound` if no solution has been loaded yet.
    pub fn current_solution(&self) -> Result<Arc<Solution>> {
        self.solution
            .read()
            .clone()
            .ok_or_else(|| RefactoringError::new(ErrorCode::WorkspaceNotFound, "no solution is loaded"))
    }

    /// Atomically replace the current snapshot.
    ///
    /// Callers must have derived `new_snapshot` from a `current_solution()`
    /// read to preserve document-id lineage; this method does not itself
    /// verify that (the Commit Layer is the only caller in normal use).
    pub fn update_solution(&self, new_snapshot: Arc<Solution>) -> Result<()> {
        *self.solution.write() = Some(new_snapshot);
        Ok(())
    }

    /// Resolve an absolute path to its `Document`.
    ///
    /// # Errors
    ///
    /// `SourceNotInWorkspace` if no loaded document has that path.
    pub fn document_for(&self, path: &Path) -> Result<Arc<Document>> {
        let solution = self.current_solution()?;
        solution.document_by_path(path).cloned().ok_or_else(|| {
            RefactoringError::new(ErrorCode::SourceNotInWorkspace, format!("{} is not part of the loaded solution", path.display()))
                .with_detail("path", path.display().to_string())
        })
    }

    /// Enter the `Operating` state ahead of an Apply/Commit window.
    ///
    /// # Errors
    ///
    /// `WorkspaceBusy` if another mutating operation is already in flight,
    /// or if the workspace is not `Ready` (invariant 1 in spec §3).
    pub fn begin_operating(&self) -> Result<()> {
        let mut state = self.state.write();
        if !state.can_begin_operating() {
            return Err(RefactoringError::new(ErrorCode::WorkspaceBusy, format!("workspace is {state:?}, not Ready")));
        }
        *state = WorkspaceState::Operating;
        debug!("workspace entered Operating");
        Ok(())
    }

    /// Return to `Ready` after a successful commit.
    pub fn end_operating_success(&self) -> Result<()> {
        *self.state.write() = WorkspaceState::Ready;
        debug!("workspace returned to Ready");
        Ok(())
    }

    /// Transition to `Error` after a failed commit.
    pub fn end_operating_failure(&self, message: impl Into<String>) -> Result<()> {
        *self.state.write() = WorkspaceState::Error;
        warn!(message = %message.into(), "workspace entered Error after a failed commit");
        Ok(())
    }

    /// Recover from `Error` back to `Ready` without reloading, for callers
    /// that have independently confirmed the snapshot is sound (e.g. after
    /// inspecting a commit failure's `details.path`).
    pub fn recover_to_ready(&self) -> Result<()> {
        let mut state = self.state.write();
        if matches!(*state, WorkspaceState::Error) {
            *state = WorkspaceState::Ready;
        }
        Ok(())
    }

    /// Wait up to `timeout` for any in-flight operation to leave
    /// `Operating`, then mark the workspace `Disposed` regardless.
    pub fn dispose(&self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if !matches!(*self.state.read(), WorkspaceState::Operating) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        *self.state.write() = WorkspaceState::Disposed;
        info!("workspace disposed");
    }

    /// Allocate a fresh `DocumentId`, unique within this workspace's
    /// lifetime (survives across snapshots, including newly created
    /// documents from a `Create` edit).
    pub fn mint_document_id(&self) -> DocumentId {
        DocumentId(self.next_document_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Apply `edit_set` to `base`, producing the successor `Solution` that a
    /// preview returns or a commit materializes to disk.
    ///
    /// `Create` changes join the project `based_on` belongs to, or the
    /// solution's first project if `based_on` is `None` or unresolved;
    /// `Delete` changes drop the document from its project's list.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidSelection` from `apply_text_edits`, or
    /// `SourceNotInWorkspace` if a `Modify`/`Delete` names an unknown
    /// document.
    pub fn compute_new_solution(&self, base: &Solution, edit_set: &EditSet) -> Result<Arc<Solution>> {
        let mut documents: BTreeMap<DocumentId, Arc<Document>> = base.documents().map(|d| (d.id, d.clone())).collect();
        let mut projects = base.projects.clone();

        for change in &edit_set.changes {
            match change {
                DocumentChange::Modify { document, edits } => {
                    let existing = documents.get(document).ok_or_else(|| not_in_workspace(*document))?;
                    let new_text = apply_text_edits(&existing.text, edits)?;
                    documents.insert(*document, Arc::new(Document::new(*document, existing.path.clone(), new_text)));
                }
                DocumentChange::Delete { document } => {
                    documents.remove(document);
                    for project in &mut projects {
                        project.documents.retain(|d| d != document);
                    }
                }
                DocumentChange::Create { path, text, based_on } => {
                    let id = self.mint_document_id();
                    documents.insert(id, Arc::new(Document::new(id, path.clone(), text.clone())));
                    let target_project = based_on
                        .and_then(|base_id| projects.iter().position(|p| p.contains(base_id)))
                        .or_else(|| if projects.is_empty() { None } else { Some(0) });
                    if let Some(idx) = target_project {
                        projects[idx].documents.push(id);
                    }
                }
            }
        }

        Ok(Arc::new(Solution::new(base.language().clone(), projects, documents)))
    }
}

fn not_in_workspace(document: DocumentId) -> RefactoringError {
    RefactoringError::new(ErrorCode::SourceNotInWorkspace, format!("document {document:?} is not part of the base snapshot"))
}
