//! A cheap cooperative cancellation signal.
//!
//! Grounded on `perl-lsp::cancellation`'s atomic-flag token, stripped of its
//! request registry and cleanup-callback machinery: this engine has no RPC
//! transport to key a registry by request id, so a bare cloneable flag is
//! all `refac-operation`'s stage boundaries need to poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag any number of clones can observe or trip.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once `cancel` has been called on this token or any clone of it.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Trip the flag. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
