//! Tests for the list and assignment views against in-memory collaborators

use serde_json::{Value, json};
use tabula::prelude::*;

/// A data source whose backend is down
struct OfflineSource;

#[async_trait]
impl DataSource for OfflineSource {
    async fn list(&self, _collection: &str, _params: &QueryParams) -> Result<Listing, SourceError> {
        Err(SourceError::Unavailable {
            message: "connection refused".to_string(),
        })
    }
}

fn ticket_view() -> ListView<Value> {
    ListView::new(
        FieldConfig::from_record()
            .searchable(["subject", "customer.name"])
            .rank_table("priority", RankTable::from_pairs([("low", 1), ("high", 2)])),
        ListQuery::new().with_page_size(2),
    )
}

fn ticket_source() -> InMemoryDataSource {
    let source = InMemoryDataSource::new();
    source
        .insert_collection(
            "tickets",
            vec![
                json!({"id": 1, "subject": "Printer jam", "priority": "low", "customer": {"name": "Acme"}}),
                json!({"id": 2, "subject": "VPN down", "priority": "high", "customer": {"name": "Globex"}}),
                json!({"id": 3, "subject": "New laptop", "priority": "high", "customer": {"name": "Acme"}}),
            ],
        )
        .unwrap();
    source
}

fn page_ids(view: &ListView<Value>) -> Vec<i64> {
    view.page().items.iter().filter_map(|r| r["id"].as_i64()).collect()
}

fn menu_model() -> HierarchicalSelectionModel {
    HierarchicalSelectionModel::new(vec![
        MenuGroup::new(
            "crm",
            "CRM",
            vec![
                MenuItem::new("customers", "Customers", "/crm/customers"),
                MenuItem::new("leads", "Leads", "/crm/leads"),
            ],
        ),
        MenuGroup::new("kpi", "KPI", vec![MenuItem::new("kpi_values", "Values", "/kpi/values")]),
    ])
}

mod list_view_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_then_query() {
        let mut view = ticket_view();
        assert_eq!(view.status(), &ViewStatus::Idle);

        view.load(&ticket_source(), "tickets").await.unwrap();
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.records().len(), 3);
        assert_eq!(page_ids(&view), vec![1, 2]);

        view.set_search("acme");
        assert_eq!(page_ids(&view), vec![1, 3]);

        view.toggle_sort("priority");
        view.toggle_sort("priority");
        assert_eq!(view.query().sort_direction, SortDirection::Desc);
        assert_eq!(page_ids(&view), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_load_unknown_collection() {
        let mut view = ticket_view();
        let err = view.load(&ticket_source(), "orders").await.unwrap_err();
        assert_eq!(err.error_code(), "COLLECTION_NOT_FOUND");
        assert!(view.status().is_failed());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_records() {
        let mut view = ticket_view();
        view.load(&ticket_source(), "tickets").await.unwrap();

        let err = view.load(&OfflineSource, "tickets").await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
        assert_eq!(
            view.status(),
            &ViewStatus::Failed("Data source unavailable: connection refused".to_string())
        );
        assert_eq!(view.records().len(), 3);
    }

    #[tokio::test]
    async fn test_page_past_end_after_filter() {
        let mut view = ticket_view();
        view.load(&ticket_source(), "tickets").await.unwrap();
        view.set_page(2);
        assert_eq!(page_ids(&view), vec![3]);

        view.set_page(9);
        let page = view.page();
        assert!(page.items.is_empty());
        assert!(page.is_past_end());

        view.set_filter("priority", "high");
        assert_eq!(view.query().page, 1);
        assert_eq!(page_ids(&view), vec![2, 3]);

        view.clear_filters();
        assert_eq!(view.page().total_count, 3);
    }

    #[tokio::test]
    async fn test_set_page_size_resets_page() {
        let mut view = ticket_view();
        view.load(&ticket_source(), "tickets").await.unwrap();
        view.set_page(2);
        view.set_page_size(10);
        assert_eq!(view.query().page, 1);
        assert_eq!(view.page().page_count, 1);
    }
}

mod assignment_view_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_selection() {
        let sink = InMemoryMutationSink::new();
        let mut view = AssignmentView::new(menu_model());
        view.toggle_group("crm");
        view.toggle_item("kpi_values");

        view.submit(&sink, "role-7").await.unwrap();
        assert_eq!(view.status(), &ViewStatus::Ready);

        let submissions = sink.submissions().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].entity_id, "role-7");
        assert_eq!(
            submissions[0].payload,
            json!({
                "entity_id": "role-7",
                "item_ids": ["customers", "kpi_values", "leads"],
            })
        );
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_selection() {
        let sink = InMemoryMutationSink::new();
        sink.fail_with(Some("role is locked")).unwrap();

        let mut view = AssignmentView::new(menu_model());
        view.select_all();
        let before = view.selection().clone();

        let err = view.submit(&sink, "role-1").await.unwrap_err();
        assert_eq!(err.error_code(), "SUBMISSION_REJECTED");
        assert!(view.status().is_failed());
        assert_eq!(view.selection(), &before);
        assert!(sink.submissions().unwrap().is_empty());

        // retry after the backend recovers
        sink.fail_with(None).unwrap();
        view.submit(&sink, "role-1").await.unwrap();
        assert_eq!(sink.submissions().unwrap().len(), 1);
    }

    #[test]
    fn test_group_status_through_view() {
        let mut view = AssignmentView::new(menu_model());
        view.toggle_item("leads");
        let status = view.group_status("crm").unwrap();
        assert_eq!(status.selected_count, 1);
        assert_eq!(status.total, 2);
        assert_eq!(status.tristate, TriState::Some);

        view.clear_all();
        assert_eq!(view.group_status("crm").unwrap().tristate, TriState::None);
        assert!(view.group_status("missing").is_none());
    }
}
