//! LSP method handlers
//!
//! Individual handler modules for each LSP method category.
//! These will be populated as we extract handlers from lsp_server.rs.

// Handler modules will be added here as we extract them:
// pub mod initialize;
// pub mod text_sync;
// pub mod completion;
// pub mod hover;
// pub mod definition;
// pub mod references;
// pub mod diagnostics;
// pub mod formatting;
// pub mod code_action;
// pub mod semantic_tokens;
// pub mod workspace_symbols;
// etc.
