//! `WorkspaceState`: the lifecycle spec §3/§4.1 describes.

/// The Workspace's coarse lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkspaceState {
    /// No solution has been loaded yet.
    Unloaded,
    /// `load` is in progress.
    Loading,
    /// A solution is loaded and no mutating operation is in flight.
    Ready,
    /// A mutating operation is between Apply and Commit.
    Operating,
    /// The last `load` or `commit` failed.
    Error,
    /// The workspace has been disposed; no further operations are accepted.
    Disposed,
}

impl WorkspaceState {
    /// `true` if a new mutating operation may begin (`Ready` only — see
    /// invariant 1 in spec §3: at most one operation Applying/Committing at
    /// a time).
    pub fn can_begin_operating(self) -> bool {
        matches!(self, WorkspaceState::Ready)
    }

    /// `true` if diagnostic queries may run (every non-`Disposed` state, per
    /// spec §4.1: "Diagnose works in every non-Disposed state").
    pub fn accepts_queries(self) -> bool {
        !matches!(self, WorkspaceState::Disposed)
    }
}
