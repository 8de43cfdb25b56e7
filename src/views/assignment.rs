//! Assignment view controller: menu/role selection plus submission

use crate::core::error::SourceError;
use crate::core::selection::{GroupStatus, HierarchicalSelectionModel, SelectionState};
use crate::core::service::MutationSink;
use crate::views::ViewStatus;
use serde_json::json;

/// State behind a grouped checkbox tree (menu permissions, position roles)
pub struct AssignmentView {
    model: HierarchicalSelectionModel,
    state: SelectionState,
    status: ViewStatus,
}

impl AssignmentView {
    pub fn new(model: HierarchicalSelectionModel) -> Self {
        Self {
            model,
            state: SelectionState::new(),
            status: ViewStatus::Idle,
        }
    }

    /// Start from an existing assignment, dropping ids the tree no longer has
    pub fn with_selection(model: HierarchicalSelectionModel, state: &SelectionState) -> Self {
        let state = model.sanitize(state);
        Self {
            model,
            state,
            status: ViewStatus::Ready,
        }
    }

    pub fn model(&self) -> &HierarchicalSelectionModel {
        &self.model
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn toggle_item(&mut self, item_id: &str) {
        self.state = self.model.toggle_item(&self.state, item_id);
    }

    pub fn toggle_group(&mut self, group_id: &str) {
        self.state = self.model.toggle_group_by_id(&self.state, group_id);
    }

    pub fn select_all(&mut self) {
        self.state = self.model.select_all();
    }

    pub fn clear_all(&mut self) {
        self.state = self.model.clear_all();
    }

    pub fn group_status(&self, group_id: &str) -> Option<GroupStatus> {
        self.model.status(&self.state, group_id)
    }

    /// Send the current selection for `entity_id`
    ///
    /// The selection is kept whether or not the submission succeeds.
    pub async fn submit(&mut self, sink: &dyn MutationSink, entity_id: &str) -> Result<(), SourceError> {
        let payload = json!({
            "entity_id": entity_id,
            "item_ids": self.state.to_vec(),
        });

        self.status = ViewStatus::Loading;
        match sink.submit(entity_id, payload).await {
            Ok(()) => {
                tracing::info!(entity_id, selected = self.state.len(), "assignment submitted");
                self.status = ViewStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(entity_id, error = %e, "assignment submission failed");
                self.status = ViewStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::{MenuGroup, MenuItem, TriState};

    fn model() -> HierarchicalSelectionModel {
        HierarchicalSelectionModel::new(vec![
            MenuGroup::new(
                "crm",
                "CRM",
                vec![
                    MenuItem::new("customers", "Customers", "/crm/customers"),
                    MenuItem::new("leads", "Leads", "/crm/leads"),
                ],
            ),
            MenuGroup::new(
                "finance",
                "Finance",
                vec![MenuItem::new("cash_flow", "Cash flow", "/finance/cash-flow")],
            ),
        ])
    }

    #[test]
    fn test_group_toggle_through_view() {
        let mut view = AssignmentView::new(model());
        view.toggle_item("customers");
        assert_eq!(
            view.group_status("crm").map(|s| s.tristate),
            Some(TriState::Some)
        );
        view.toggle_group("crm");
        assert_eq!(
            view.group_status("crm").map(|s| s.tristate),
            Some(TriState::All)
        );
        view.toggle_group("crm");
        assert!(view.selection().is_empty());
    }

    #[test]
    fn test_with_selection_drops_stale_ids() {
        let stale = SelectionState::from_ids(["leads", "old_menu"]);
        let view = AssignmentView::with_selection(model(), &stale);
        assert_eq!(view.selection(), &SelectionState::from_ids(["leads"]));
    }
}
