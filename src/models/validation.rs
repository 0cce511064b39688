//! Entity validation
//!
//! Structural rules for submitted entities are checked before anything
//! touches the store. Each failure names the offending field and the reason;
//! the rendered message is what callers see.

/// A structural or semantic defect in submitted data, detected before
/// persistence.
///
/// `Display` renders as `"{field} {reason}"`, e.g.
/// `"username must be at least 3 characters"` or `"title is required"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    /// Name of the field that failed
    pub field: &'static str,
    /// Why it failed
    pub reason: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}
