/// Whether the cached mesh matches the current view and expression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshState {
    Clean,
    /// Initial state, so the first tick always builds.
    #[default]
    Dirty,
}

/// Dirty-flag gate in front of the mesh generator.
///
/// View changes, resizes and newly installed expressions mark it dirty; the
/// tick loop takes the flag once per frame and rebuilds only when it was set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildScheduler {
    state: MeshState,
}

impl RebuildScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MeshState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == MeshState::Dirty
    }

    /// Request a rebuild on the next tick. Idempotent.
    pub fn mark_dirty(&mut self) {
        self.state = MeshState::Dirty;
    }

    /// Read and clear the flag. Returns true if a rebuild is due.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.state, MeshState::Clean) == MeshState::Dirty
    }
}
