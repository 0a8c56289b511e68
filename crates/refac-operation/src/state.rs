//! `OperationState`: the per-call lifecycle spec §4.5 describes.

/// The state machine every refactoring/query call runs through:
/// `Pending → Validating → Resolving → Computing → (Previewing ∣ Applying) →
/// Committing → Completed ∣ Failed ∣ Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationState {
    /// The call has been accepted but no stage has run yet.
    Pending,
    /// Running the operation's synchronous input checks.
    Validating,
    /// Looking up the target symbol/references against the loaded snapshot.
    Resolving,
    /// Computing the edit set the operation would apply.
    Computing,
    /// Terminal for this call: the edit set was returned without mutating
    /// the workspace.
    Previewing,
    /// Splicing the edit set into a successor `Solution` (non-cancellable).
    Applying,
    /// Materializing the successor `Solution` to disk (non-cancellable).
    Committing,
    /// The call finished and (if mutating) its commit succeeded.
    Completed,
    /// The call finished with an error.
    Failed,
    /// The call was cancelled before reaching a non-cancellable stage.
    Cancelled,
}

impl OperationState {
    /// `true` once the operation has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, OperationState::Completed | OperationState::Failed | OperationState::Cancelled)
    }

    /// `true` if a cancel signal observed while in this state is honored.
    /// `Applying`/`Committing` are critical sections (spec §4.5).
    pub fn is_cancellable(self) -> bool {
        !self.is_terminal() && !matches!(self, OperationState::Applying | OperationState::Committing)
    }
}
