//! Runtime context for profile visibility
//!
//! Classification predicates need to know whether advanced mode is enabled.
//! Instead of consulting process-wide state, callers build a
//! [`ProfileContext`] once from the startup arguments and pass it by
//! reference wherever visibility matters.

/// Startup configuration consulted by visibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileContext {
    /// Whether `--advanced` was given on the command line.
    pub advanced: bool,
}

impl ProfileContext {
    /// Context with advanced mode enabled.
    pub fn advanced() -> Self {
        Self { advanced: true }
    }

    /// Build a context from the advanced flag.
    pub fn from_flag(advanced: bool) -> Self {
        Self { advanced }
    }

    /// Check whether something gated as `advanced` should be visible.
    pub fn allows(&self, advanced: bool) -> bool {
        !advanced || self.advanced
    }
}
