// Pagination envelopes over label summaries.

use larder_core::label::DEFAULT_LABEL_COLOR;
use larder_core::{
    LabelPagination, LabelRecord, LabelSummary, PaginationConfig, PaginationQuery,
    ValidationError,
};
use serde_json::json;
use uuid::Uuid;

fn summary(name: &str) -> LabelSummary {
    LabelSummary {
        name: name.to_string(),
        color: DEFAULT_LABEL_COLOR.to_string(),
        group_id: Uuid::new_v4(),
        id: Uuid::new_v4(),
    }
}

struct StoredLabel {
    id: Uuid,
    group_id: Uuid,
    name: &'static str,
}

impl LabelRecord for StoredLabel {
    fn id(&self) -> Uuid {
        self.id
    }

    fn group_id(&self) -> Uuid {
        self.group_id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn color(&self) -> &str {
        DEFAULT_LABEL_COLOR
    }
}

#[test]
fn three_summaries_keep_order() {
    let items = vec![summary("Vegan"), summary("Keto"), summary("Paleo")];
    let page = LabelPagination::new(items.clone(), 1, 10, 3);

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items, items);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 10);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn from_records_projects_in_order() {
    let group_id = Uuid::new_v4();
    let records: Vec<StoredLabel> = ["Soup", "Salad", "Stew"]
        .into_iter()
        .map(|name| StoredLabel {
            id: Uuid::new_v4(),
            group_id,
            name,
        })
        .collect();

    let page = LabelPagination::from_records(&records, 2, 3, 9).unwrap();
    let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Soup", "Salad", "Stew"]);
    assert_eq!(page.total_pages, 3);
    assert!(page.items.iter().all(|s| s.group_id == group_id));
}

#[test]
fn from_records_rejects_non_v4_ids() {
    let records = [StoredLabel {
        id: Uuid::nil(),
        group_id: Uuid::new_v4(),
        name: "Broken",
    }];
    assert!(matches!(
        LabelPagination::from_records(&records, 1, 10, 1),
        Err(ValidationError::WrongUuidVersion { field: "id", .. })
    ));
}

#[test]
fn guides_follow_client_query() {
    let query: PaginationQuery =
        serde_json::from_value(json!({"page": 2, "perPage": 1, "orderBy": "name"})).unwrap();
    query.validate().unwrap();

    let mut page = LabelPagination::from_query(vec![summary("Keto")], &query, 3);
    page.set_pagination_guides(
        "/api/groups/labels",
        &[("per_page", "1"), ("order_by", "name")],
    )
    .unwrap();

    assert_eq!(
        page.next.as_deref(),
        Some("/api/groups/labels?perPage=1&orderBy=name&page=3")
    );
    assert_eq!(
        page.previous.as_deref(),
        Some("/api/groups/labels?perPage=1&orderBy=name&page=1")
    );
}

#[test]
fn last_page_has_no_next() {
    let mut page = LabelPagination::new(vec![summary("Stew")], 3, 1, 3);
    page.set_pagination_guides("/api/groups/labels", &[]).unwrap();
    assert!(page.next.is_none());
    assert_eq!(page.previous.as_deref(), Some("/api/groups/labels?page=2"));
}

#[test]
fn configured_query_feeds_envelope() {
    let config = PaginationConfig {
        default_per_page: 2,
        max_per_page: Some(5),
    };
    let query = config.query(None, None);
    let page = LabelPagination::from_query(vec![summary("A"), summary("B")], &query, 5);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn envelope_decodes_with_defaults() {
    let page: LabelPagination = serde_json::from_value(json!({ "items": [] })).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 10);
    assert_eq!(page.total, 0);
    assert!(page.next.is_none());
}

#[test]
fn envelope_rejects_items_with_nil_id() {
    let err = serde_json::from_value::<LabelPagination>(json!({
        "page": 1,
        "per_page": 10,
        "total": 1,
        "total_pages": 1,
        "items": [{
            "name": "Vegan",
            "color": "#E0E0E0",
            "group_id": Uuid::new_v4(),
            "id": Uuid::nil()
        }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("id"), "{err}");
}

#[test]
fn huge_totals_do_not_overflow() {
    let page = LabelPagination::new(vec![], 1, 2, i64::MAX);
    assert_eq!(page.total_pages, i64::MAX / 2 + 1);
}
