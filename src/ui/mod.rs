//! User interface module - log lines for terminals and CI runners.
//!
//! - `formatter` - Pure formatting functions and their printing wrappers
//! - This module - Environment detection

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_generated, display_status, display_success,
    display_warning,
};

/// Environment variable GitHub sets on every Actions runner
pub const GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";

/// Whether output goes to a GitHub Actions log
pub fn is_github_actions() -> bool {
    std::env::var(GITHUB_ACTIONS).is_ok_and(|v| v == "true")
}
