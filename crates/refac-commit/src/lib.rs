//! The Commit Layer (spec §4.4, component C6).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use refac_error::{ErrorCode, RefactoringError, Result};
use refac_semantic::DocumentId;
use refac_workspace::{DocumentChange, EditSet, Solution, Workspace};
use tracing::{debug, info, warn};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Files touched by a successful commit, for the tool-call response.
#[derive(Debug, Clone, Default)]
pub struct CommitStats {
    /// Paths whose content changed.
    pub files_modified: Vec<PathBuf>,
    /// Paths newly created.
    pub files_created: Vec<PathBuf>,
    /// Paths removed.
    pub files_deleted: Vec<PathBuf>,
}

/// Serializes the swap-and-rename window across operations (spec §4.4:
/// "A single global lock around the swap+rename window serializes commits").
#[derive(Default)]
pub struct CommitLayer {
    lock: Mutex<()>,
}

enum Completed {
    Created(PathBuf),
    Modified(PathBuf, Arc<str>),
    Deleted(PathBuf, Arc<str>),
}

impl CommitLayer {
    /// Construct a fresh, unlocked commit layer.
    pub fn new() -> Self {
        Self { lock: Mutex::new(()) }
    }

    /// Materialize `edit_set` (already reflected in `new_solution`) against
    /// `base` to disk, then swap `workspace`'s snapshot pointer.
    ///
    /// All-or-nothing: on any failure, no file differs from its pre-call
    /// content and the snapshot pointer is left untouched.
    ///
    /// # Errors
    ///
    /// `SourceNotInWorkspace` if `edit_set` names a document missing from
    /// `base`; `FilesystemError` (carrying the offending `path` in
    /// `details`) if any temp write, rename, or delete fails.
    pub fn commit(&self, workspace: &Workspace, base: &Solution, new_solution: Arc<Solution>, edit_set: &EditSet) -> Result<CommitStats> {
        let _guard = self.lock.lock();

        let mut creates: Vec<PathBuf> = Vec::new();
        let mut modifies: Vec<(PathBuf, Arc<str>)> = Vec::new();
        let mut deletes: Vec<(PathBuf, Arc<str>)> = Vec::new();

        for change in &edit_set.changes {
            match change {
                DocumentChange::Create { path, .. } => creates.push(path.clone()),
                DocumentChange::Modify { document, .. } => {
                    let doc = base.document(*document).ok_or_else(|| not_in_workspace(*document))?;
                    modifies.push((doc.path.clone(), doc.text.clone()));
                }
                DocumentChange::Delete { document } => {
                    let doc = base.document(*document).ok_or_else(|| not_in_workspace(*document))?;
                    deletes.push((doc.path.clone(), doc.text.clone()));
                }
            }
        }

        if creates.is_empty() && modifies.is_empty() && deletes.is_empty() {
            workspace.update_solution(new_solution)?;
            return Ok(CommitStats::default());
        }

        // Phase 1: write every created/modified document's new content to a
        // sibling temp file and fsync it. Nothing under its final path is
        // touched yet, so a failure here leaves every file untouched.
        let create_set: HashSet<&PathBuf> = creates.iter().collect();
        let mut temps: Vec<(PathBuf, PathBuf)> = Vec::new();
        for path in creates.iter().chain(modifies.iter().map(|(p, _)| p)) {
            let content = match new_solution.document_by_path(path) {
                Some(doc) => doc.text.to_string(),
                None => {
                    cleanup_temps(&temps);
                    return Err(fs_error(path, "no computed content for this path"));
                }
            };
            let tmp = sibling_temp_path(path);
            if let Err(err) = write_and_fsync(&tmp, &content) {
                let _ = std::fs::remove_file(&tmp);
                cleanup_temps(&temps);
                warn!(path = %path.display(), %err, "commit write-temp phase failed");
                return Err(fs_error(path, err));
            }
            temps.push((tmp, path.clone()));
        }

        // Phase 2: rename into place — creates, then modifies, then deletes —
        // recording enough to invert every step that does succeed.
        let mut completed: Vec<Completed> = Vec::new();
        let rename_result = (|| -> Result<()> {
            for (tmp, final_path) in temps.iter().filter(|(_, p)| create_set.contains(p)) {
                std::fs::rename(tmp, final_path).map_err(|err| fs_error(final_path, err))?;
                completed.push(Completed::Created(final_path.clone()));
            }
            for (tmp, final_path) in temps.iter().filter(|(_, p)| !create_set.contains(p)) {
                let original = modifies
                    .iter()
                    .find(|(p, _)| p == final_path)
                    .map(|(_, text)| text.clone())
                    .unwrap_or_else(|| Arc::from(""));
                std::fs::rename(tmp, final_path).map_err(|err| fs_error(final_path, err))?;
                completed.push(Completed::Modified(final_path.clone(), original));
            }
            for (path, original) in &deletes {
                std::fs::remove_file(path).map_err(|err| fs_error(path, err))?;
                completed.push(Completed::Deleted(path.clone(), original.clone()));
            }
            Ok(())
        })();

        if let Err(err) = rename_result {
            for (tmp, _) in &temps {
                let _ = std::fs::remove_file(tmp);
            }
            for action in completed.into_iter().rev() {
                match action {
                    Completed::Created(path) => {
                        let _ = std::fs::remove_file(&path);
                    }
                    Completed::Modified(path, original) | Completed::Deleted(path, original) => {
                        let _ = write_plain(&path, &original);
                    }
                }
            }
            warn!(%err, "commit rolled back");
            return Err(err);
        }

        workspace.update_solution(new_solution)?;
        info!(
            created = creates.len(),
            modified = modifies.len(),
            deleted = deletes.len(),
            "commit succeeded"
        );
        Ok(CommitStats {
            files_modified: modifies.into_iter().map(|(p, _)| p).collect(),
            files_created: creates,
            files_deleted: deletes.into_iter().map(|(p, _)| p).collect(),
        })
    }
}

fn cleanup_temps(temps: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in temps {
        let _ = std::fs::remove_file(tmp);
    }
}

fn sibling_temp_path(path: &Path) -> PathBuf {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("tmp");
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{file_name}.refac-tmp-{}-{n}", std::process::id()))
}

fn write_and_fsync(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn write_plain(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

fn fs_error(path: &Path, err: impl std::fmt::Display) -> RefactoringError {
    debug!(path = %path.display(), %err, "filesystem error");
    RefactoringError::new(ErrorCode::FilesystemError, format!("filesystem operation failed for {}: {err}", path.display()))
        .with_detail("path", path.display().to_string())
}

fn not_in_workspace(document: DocumentId) -> RefactoringError {
    RefactoringError::new(ErrorCode::SourceNotInWorkspace, format!("document {document:?} is not part of the base snapshot"))
}
