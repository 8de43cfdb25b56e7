//! Hosting-view controllers
//!
//! A view owns the raw data and the query or selection state, recomputes the
//! derived result through the pure core on demand, and talks to the external
//! collaborators.

pub mod assignment;
pub mod list;

pub use assignment::AssignmentView;
pub use list::ListView;

/// Loading state of a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last collaborator call failed with this message
    Failed(String),
}

impl ViewStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ViewStatus::Failed(_))
    }
}
