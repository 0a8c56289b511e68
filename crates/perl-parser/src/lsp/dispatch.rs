//! Request dispatch and lifecycle management
//!
//! This module handles:
//! - Method routing from `handle_request()`
//! - Lifecycle state (initialized, shutdown)
//! - Cancellation integration
//!
//! The actual dispatch logic will be extracted from lsp_server.rs
//! as part of the modularization effort.

// Placeholder - dispatch logic will be moved here from lsp_server.rs
// The handle_request() method's match arms will be organized here.
