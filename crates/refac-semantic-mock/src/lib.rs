//! A toy C#-shaped [`Language`] implementation backed by a regex scanner,
//! used only by this workspace's own test suites (see the crate README).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod model;
mod scanner;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use refac_semantic::{DocumentId, Language, LoadDiagnostics, RawProject, SemanticModel, SyntaxTree};

pub use model::MockSemanticModel;
pub use scanner::MockTree;

/// A `Language` whose "solution" format is a plain-text list of project
/// directories, one per line, relative to the solution file, and whose
/// projects are every `*.cs` file directly inside that directory.
///
/// Exists only to give this workspace's own tests something concrete to run
/// `refac-workspace` through `refac-engine` against.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockLanguage;

impl Language for MockLanguage {
    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn load_solution(&self, solution_path: &Path) -> Result<BTreeMap<PathBuf, RawProject>, LoadDiagnostics> {
        let listing = std::fs::read_to_string(solution_path).map_err(|err| LoadDiagnostics {
            messages: vec![format!("failed to read solution file {}: {err}", solution_path.display())],
        })?;
        let base = solution_path.parent().unwrap_or_else(|| Path::new("."));

        let mut projects = BTreeMap::new();
        let mut diagnostics = LoadDiagnostics::default();

        for line in listing.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let project_dir = base.join(line);
            if !project_dir.is_dir() {
                diagnostics.messages.push(format!("project directory not found: {}", project_dir.display()));
                continue;
            }

            let name = project_dir.file_name().and_then(|n| n.to_str()).unwrap_or("project").to_string();
            let project_file = project_dir.join(format!("{name}.csproj"));

            let mut documents = Vec::new();
            let entries = match std::fs::read_dir(&project_dir) {
                Ok(entries) => entries,
                Err(err) => {
                    diagnostics.messages.push(format!("failed to read {}: {err}", project_dir.display()));
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("cs") {
                    continue;
                }
                match std::fs::read_to_string(&path) {
                    Ok(source) => documents.push((path, source)),
                    Err(err) => diagnostics.messages.push(format!("failed to read {}: {err}", path.display())),
                }
            }
            documents.sort_by(|a, b| a.0.cmp(&b.0));

            projects.insert(
                project_file.clone(),
                RawProject { name, path: project_file, documents, project_references: Vec::new() },
            );
        }

        if diagnostics.is_fatal() {
            return Err(diagnostics);
        }
        Ok(projects)
    }

    fn parse(&self, text: &str) -> Arc<dyn SyntaxTree> {
        Arc::new(scanner::parse(text))
    }

    fn analyze(&self, documents: &[(DocumentId, PathBuf, Arc<dyn SyntaxTree>)]) -> Arc<dyn SemanticModel> {
        Arc::new(MockSemanticModel::build(documents.to_vec()))
    }
}
