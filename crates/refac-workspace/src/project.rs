//! A single project within a `Solution`.

use std::path::PathBuf;

use refac_semantic::DocumentId;

/// One loaded project: a display name, its file path, the documents it
/// owns (in declaration order), and the other projects it references.
#[derive(Debug, Clone)]
pub struct Project {
    /// Display name.
    pub name: String,
    /// Absolute path to the project file.
    pub path: PathBuf,
    /// Documents belonging to this project, in declaration order.
    pub documents: Vec<DocumentId>,
    /// Paths of other projects this project references.
    pub project_references: Vec<PathBuf>,
    /// Target language/runtime tag (e.g. file extension), for diagnostics.
    pub language_tag: String,
}

impl Project {
    /// `true` if `document` belongs to this project.
    pub fn contains(&self, document: DocumentId) -> bool {
        self.documents.contains(&document)
    }
}
