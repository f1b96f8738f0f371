//! Localizable labels consumed by row rendering.

/// The user-facing strings a datagrid row needs.
///
/// The row core never formats or looks up text itself; it hands these to the
/// rendering layer for accessibility labels and control captions. Replace the
/// defaults with translated strings at grid construction time.
#[derive(Debug, Clone)]
pub struct CommonStrings {
    /// Label for the per-row selection control (checkbox or radio).
    pub select: String,
    /// Caption for the caret while the row is collapsed.
    pub expand: String,
    /// Caption for the caret while the row is expanded.
    pub collapse: String,
    /// Label announced while expanded detail content is being fetched.
    pub loading: String,
}

impl Default for CommonStrings {
    fn default() -> Self {
        Self {
            select: "Select".into(),
            expand: "Expand".into(),
            collapse: "Collapse".into(),
            loading: "Loading".into(),
        }
    }
}
