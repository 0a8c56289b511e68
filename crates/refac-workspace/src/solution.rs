//! The immutable `Solution` snapshot: an ordered set of `Project`s sharing a
//! `BTreeMap` of `Document`s, plus a lazily-derived whole-solution semantic
//! model.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use refac_semantic::{DocumentId, Language, SemanticModel};

use crate::document::Document;
use crate::project::Project;

/// An immutable snapshot of an entire solution.
///
/// Replacing a snapshot is a single `Arc` swap (see `Workspace::update_solution`);
/// readers holding an older `Arc<Solution>` keep a fully consistent view of
/// it, since nothing here is ever mutated in place.
pub struct Solution {
    language: Arc<dyn Language>,
    /// Projects, in load order.
    pub projects: Vec<Project>,
    documents: BTreeMap<DocumentId, Arc<Document>>,
    by_path: BTreeMap<PathBuf, DocumentId>,
    semantic_model: OnceLock<Arc<dyn SemanticModel>>,
}

impl Solution {
    /// Construct a solution from its projects and documents. `by_path` is
    /// derived from `documents`.
    pub fn new(language: Arc<dyn Language>, projects: Vec<Project>, documents: BTreeMap<DocumentId, Arc<Document>>) -> Self {
        let by_path = documents.iter().map(|(id, doc)| (doc.path.clone(), *id)).collect();
        Self { language, projects, documents, by_path, semantic_model: OnceLock::new() }
    }

    /// The `Language` this solution was loaded and parsed with.
    pub fn language(&self) -> &Arc<dyn Language> {
        &self.language
    }

    /// Look up a document by its stable id.
    pub fn document(&self, id: DocumentId) -> Option<&Arc<Document>> {
        self.documents.get(&id)
    }

    /// Look up a document by its absolute path.
    pub fn document_by_path(&self, path: &Path) -> Option<&Arc<Document>> {
        self.by_path.get(path).and_then(|id| self.documents.get(id))
    }

    /// All documents, in id order.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.values()
    }

    /// The total number of documents in this snapshot.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The project that owns `document`, if any.
    pub fn project_of(&self, document: DocumentId) -> Option<&Project> {
        self.projects.iter().find(|p| p.contains(document))
    }

    /// Build (once) and return the whole-solution semantic model, parsing
    /// every document's syntax tree the first time this is called.
    pub fn semantic_model(&self) -> Arc<dyn SemanticModel> {
        self.semantic_model
            .get_or_init(|| {
                let trees: Vec<_> = self
                    .documents
                    .values()
                    .map(|doc| (doc.id, doc.path.clone(), doc.syntax_tree(self.language.as_ref())))
                    .collect();
                self.language.analyze(&trees)
            })
            .clone()
    }
}

impl std::fmt::Debug for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solution")
            .field("projects", &self.projects.len())
            .field("documents", &self.documents.len())
            .finish_non_exhaustive()
    }
}
