//! Hierarchical multi-select over a two-level group -> item tree
//!
//! Used for assigning menus or roles: each [`MenuGroup`] holds leaf
//! [`MenuItem`]s and the selection is a set of leaf ids. All transitions are
//! pure functions that return a new [`SelectionState`]; callers own the state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A selectable leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A group of selectable leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuGroup {
    pub fn new(id: impl Into<String>, label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items,
        }
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }
}

/// The set of selected leaf ids
///
/// Serializes as a sorted array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState(BTreeSet<String>);

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

/// Tri-state of a group checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    All,
    Some,
    None,
}

/// Selection summary for one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStatus {
    pub selected_count: usize,
    pub total: usize,
    pub tristate: TriState,
}

/// Flip membership of `item_id`; ids absent from every group are ignored
pub fn toggle_item(state: &SelectionState, groups: &[MenuGroup], item_id: &str) -> SelectionState {
    if !groups.iter().any(|group| group.contains(item_id)) {
        tracing::debug!(item_id, "ignoring toggle for unknown item");
        return state.clone();
    }

    let mut next = state.0.clone();
    if !next.remove(item_id) {
        next.insert(item_id.to_string());
    }
    SelectionState(next)
}

/// Clear the group when it is fully selected, otherwise select all of it
///
/// A partially selected group always moves to fully selected.
pub fn toggle_group(state: &SelectionState, group: &MenuGroup) -> SelectionState {
    let mut next = state.0.clone();
    if group_status(state, group).tristate == TriState::All {
        for id in group.item_ids() {
            next.remove(id);
        }
    } else {
        next.extend(group.item_ids().map(str::to_string));
    }
    SelectionState(next)
}

/// Every item id across all groups
pub fn select_all(groups: &[MenuGroup]) -> SelectionState {
    groups
        .iter()
        .flat_map(MenuGroup::item_ids)
        .collect::<SelectionState>()
}

/// The empty selection
pub fn clear_all() -> SelectionState {
    SelectionState::new()
}

/// Selected count and tri-state for one group
///
/// An empty group reports `None`, never `All`.
pub fn group_status(state: &SelectionState, group: &MenuGroup) -> GroupStatus {
    let total = group.items.len();
    let selected_count = group.item_ids().filter(|id| state.contains(id)).count();
    let tristate = if selected_count == 0 {
        TriState::None
    } else if selected_count == total {
        TriState::All
    } else {
        TriState::Some
    };

    GroupStatus {
        selected_count,
        total,
        tristate,
    }
}

/// A selection model bound to an immutable group tree
///
/// # Example
/// ```rust,ignore
/// let model = HierarchicalSelectionModel::new(config.menu_groups.clone());
/// let state = model.toggle_group_by_id(&SelectionState::new(), "sales");
/// assert_eq!(model.status(&state, "sales").map(|s| s.tristate), Some(TriState::All));
/// ```
#[derive(Debug, Clone)]
pub struct HierarchicalSelectionModel {
    groups: Arc<[MenuGroup]>,
}

impl HierarchicalSelectionModel {
    pub fn new(groups: impl Into<Arc<[MenuGroup]>>) -> Self {
        Self {
            groups: groups.into(),
        }
    }

    pub fn groups(&self) -> &[MenuGroup] {
        &self.groups
    }

    pub fn find_group(&self, group_id: &str) -> Option<&MenuGroup> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn toggle_item(&self, state: &SelectionState, item_id: &str) -> SelectionState {
        toggle_item(state, &self.groups, item_id)
    }

    pub fn toggle_group(&self, state: &SelectionState, group: &MenuGroup) -> SelectionState {
        toggle_group(state, group)
    }

    /// Toggle a group by id; unknown groups leave the state unchanged
    pub fn toggle_group_by_id(&self, state: &SelectionState, group_id: &str) -> SelectionState {
        match self.find_group(group_id) {
            Some(group) => toggle_group(state, group),
            None => {
                tracing::debug!(group_id, "ignoring toggle for unknown group");
                state.clone()
            }
        }
    }

    pub fn select_all(&self) -> SelectionState {
        select_all(&self.groups)
    }

    pub fn clear_all(&self) -> SelectionState {
        clear_all()
    }

    pub fn status(&self, state: &SelectionState, group_id: &str) -> Option<GroupStatus> {
        self.find_group(group_id).map(|group| group_status(state, group))
    }

    /// Status of every group, in group order
    pub fn statuses<'a>(&'a self, state: &SelectionState) -> Vec<(&'a MenuGroup, GroupStatus)> {
        self.groups
            .iter()
            .map(|group| (group, group_status(state, group)))
            .collect()
    }

    /// Number of selected ids that exist in the tree
    pub fn total_selected(&self, state: &SelectionState) -> usize {
        state.iter().filter(|id| self.knows(id)).count()
    }

    /// Drop selected ids that no group contains any more
    pub fn sanitize(&self, state: &SelectionState) -> SelectionState {
        state.iter().filter(|id| self.knows(id)).collect()
    }

    fn knows(&self, item_id: &str) -> bool {
        self.groups.iter().any(|group| group.contains(item_id))
    }
}
