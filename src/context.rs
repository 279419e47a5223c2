//! Shared setup context
//!
//! The setup phase runs exactly once before load generation begins and
//! publishes its result here. Publication is write-once: every virtual user
//! reads the same immutable snapshot for the whole run, with no further
//! synchronization.

use std::sync::OnceLock;

/// Immutable result of the setup phase, shared identically by every
/// virtual-user iteration.
#[derive(Debug, Clone)]
pub struct SetupContext {
    pub token: String,
}

/// Write-once cell holding a [`SetupContext`].
pub struct ContextCell(OnceLock<SetupContext>);

impl ContextCell {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Publishes the setup context. Returns `false` if a context was already
    /// published; the original value is kept in that case.
    pub fn store(&self, context: SetupContext) -> bool {
        self.0.set(context).is_ok()
    }

    pub fn get(&self) -> Option<&SetupContext> {
        self.0.get()
    }

    /// Bearer token for iteration requests. `None` when the setup phase
    /// never ran or produced an empty token; iterations must treat that as
    /// a soft-skip, not an error.
    pub fn bearer_token(&self) -> Option<&str> {
        match self.0.get() {
            Some(context) if !context.token.is_empty() => Some(&context.token),
            _ => None,
        }
    }
}

impl Default for ContextCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide context instance used by the scenario binaries
pub static SHARED: ContextCell = ContextCell::new();
