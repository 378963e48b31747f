use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::executor::block_on;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::infra::http::lookup_client::{candidates_from_response, HttpLookupClient};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::ui::controls::chrome::FilterControl;
use crate::ui::controls::{DateFilter, LookupFilter, NumericFilter, SearchBox, TextFilter};
use crate::ui::dismiss::{DismissRegistry, NodeId, OverlayToken};
use crate::ui::format::{format_cell_value, format_short_date, LayoutMode};
use crate::ui::gauge::GaugeTween;
use crate::usecase::services::column_state::ColumnState;
use crate::usecase::services::pagination::Pager;
use crate::usecase::services::query_state::QueryState;
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("admin-table-{prefix}-{nanos}"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn text(field: &str, value: &str) -> FilterDescriptor {
    FilterDescriptor::new(field, FilterType::Text, [FilterValue::from(value)])
}

fn numeric(field: &str, op: NumericOp, values: &[f64]) -> FilterDescriptor {
    FilterDescriptor::new(
        field,
        FilterType::Numeric(op),
        values.iter().copied().map(FilterValue::Number),
    )
}

fn sample_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("article", "Article", ColumnKind::String, "article"),
        ColumnConfig::new("name", "Name", ColumnKind::String, "name"),
        ColumnConfig::new("price", "Price", ColumnKind::Number, "price"),
    ]
}

fn bottom(scroll_top: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        viewport_height: 500.0,
        content_height: 1000.0,
    }
}

struct FakeClient {
    calls: Cell<usize>,
    response: RefCell<Result<Vec<LookupCandidate>, LookupError>>,
}

impl FakeClient {
    fn returning(candidates: Vec<LookupCandidate>) -> Rc<Self> {
        Rc::new(Self {
            calls: Cell::new(0),
            response: RefCell::new(Ok(candidates)),
        })
    }

    fn failing(endpoint: &str) -> Rc<Self> {
        Rc::new(Self {
            calls: Cell::new(0),
            response: RefCell::new(Err(LookupError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
            })),
        })
    }
}

#[async_trait(?Send)]
impl LookupClient for FakeClient {
    async fn fetch(&self, _source: &LookupSource) -> Result<Vec<LookupCandidate>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.response.borrow().clone()
    }
}

fn users() -> Vec<LookupCandidate> {
    vec![
        LookupCandidate::new("u1", "Ada Lovelace"),
        LookupCandidate::new("u2", "Alan Turing"),
    ]
}

#[test]
fn empty_filter_event_removes_slot() {
    let mut state = QueryState::new();
    state.apply_filter(text("name", "bolt"));
    state.apply_filter(numeric("price", NumericOp::Equal, &[10.0]));

    let query = state.apply_filter(FilterDescriptor::cleared("name", FilterType::Text));

    assert_eq!(query.filters, vec![numeric("price", NumericOp::Equal, &[10.0])]);
}

#[test]
fn blank_string_value_counts_as_clear() {
    let mut state = QueryState::new();
    state.apply_filter(text("name", "bolt"));

    let query = state.apply_filter(text("name", ""));

    assert!(query.filters.is_empty(), "[\"\"] should clear: {query:?}");
}

#[test]
fn clear_event_matches_family_not_exact_type() {
    let mut state = QueryState::new();
    state.apply_filter(numeric("price", NumericOp::Between, &[1.0, 5.0]));

    let query = state.apply_filter(FilterDescriptor::cleared(
        "price",
        FilterType::Numeric(NumericOp::Equal),
    ));

    assert!(query.filters.is_empty());
}

#[test]
fn same_type_updates_values_in_place() {
    let mut state = QueryState::new();
    state.apply_filter(text("name", "bolt"));
    state.apply_filter(numeric("price", NumericOp::LessThan, &[10.0]));

    let query = state.apply_filter(text("name", "nut"));

    assert_eq!(
        query.filters,
        vec![text("name", "nut"), numeric("price", NumericOp::LessThan, &[10.0])]
    );
}

#[test]
fn switching_type_within_family_replaces_and_appends() {
    let mut state = QueryState::new();
    state.apply_filter(numeric("price", NumericOp::Equal, &[10.0]));
    state.apply_filter(text("name", "bolt"));

    let query = state.apply_filter(numeric("price", NumericOp::Between, &[1.0, 5.0]));

    assert_eq!(
        query.filters,
        vec![text("name", "bolt"), numeric("price", NumericOp::Between, &[1.0, 5.0])]
    );
}

#[test]
fn one_filter_per_field_and_family() {
    let mut state = QueryState::new();
    state.apply_filter(text("created", "2024"));
    state.apply_filter(FilterDescriptor::new(
        "created",
        FilterType::Date(DateOp::After),
        [FilterValue::Date(date(2024, 1, 1))],
    ));
    state.apply_filter(FilterDescriptor::new(
        "created",
        FilterType::Date(DateOp::Before),
        [FilterValue::Date(date(2024, 6, 1))],
    ));

    let filters = state.filters();
    assert_eq!(filters.len(), 2, "text and date slots coexist: {filters:?}");
    assert!(state.filter_for("created", FilterFamily::Text).is_some());
    assert_eq!(
        state
            .filter_for("created", FilterFamily::Date)
            .map(|filter| filter.filter_type),
        Some(FilterType::Date(DateOp::Before))
    );
}

#[test]
fn date_range_and_numeric_threshold_reach_the_backend() {
    let mut table = TableController::new(
        sample_columns(),
        &IndexMap::new(),
        &Settings::default(),
        RecordedEvents::default(),
    );
    let mut created = DateFilter::new("created");
    created.select_mode(DateOp::Between);
    assert_eq!(created.set_range_start("2024-01-01"), None);
    let range = created.set_range_end("2024-01-31").expect("complete range commits");
    table.apply_filter(range);

    let mut price = NumericFilter::new("price");
    price.select_mode(NumericOp::GreaterThan);
    let threshold = price.set_value("100").expect("valid number commits");
    table.apply_filter(threshold);

    let last = table.events().queries.last().cloned().expect("query reported");
    assert_eq!(last.filters.len(), 2);
    assert_eq!(
        serde_json::to_value(&last.filters).expect("filters should serialize"),
        json!([
            { "field": "created", "values": ["2024-01-01", "2024-01-31"], "type": 9 },
            { "field": "price", "values": [100.0], "type": 4 }
        ])
    );
}

#[test]
fn clearing_an_absent_slot_changes_nothing() {
    let mut state = QueryState::new();
    state.apply_filter(text("name", "bolt"));

    let query = state.apply_filter(FilterDescriptor::cleared(
        "price",
        FilterType::Numeric(NumericOp::Equal),
    ));

    assert_eq!(query.filters, vec![text("name", "bolt")]);
}

#[test]
fn between_then_equal_keeps_one_numeric_slot() {
    let mut state = QueryState::new();
    state.apply_filter(numeric("price", NumericOp::Between, &[10.0, 20.0]));

    let query = state.apply_filter(numeric("price", NumericOp::Equal, &[15.0]));

    assert_eq!(query.filters, vec![numeric("price", NumericOp::Equal, &[15.0])]);
}

#[test]
fn sorts_are_added_or_updated_never_removed() {
    let mut state = QueryState::new();
    state.apply_sort(SortDescriptor::new("name", SortDirection::Descending));
    state.apply_sort(SortDescriptor::new("price", SortDirection::Ascending));

    let query = state.apply_sort(SortDescriptor::new("name", SortDirection::Ascending));

    assert_eq!(
        query.sorts,
        vec![
            SortDescriptor::new("name", SortDirection::Ascending),
            SortDescriptor::new("price", SortDirection::Ascending),
        ]
    );
}

#[test]
fn filter_types_serialize_to_backend_codes() {
    let codes: Vec<u8> = [
        FilterType::Text,
        FilterType::Identifier,
        FilterType::Numeric(NumericOp::Equal),
        FilterType::Numeric(NumericOp::LessThan),
        FilterType::Numeric(NumericOp::GreaterThan),
        FilterType::Numeric(NumericOp::Between),
        FilterType::Date(DateOp::Equal),
        FilterType::Date(DateOp::Before),
        FilterType::Date(DateOp::After),
        FilterType::Date(DateOp::Between),
    ]
    .iter()
    .map(FilterType::code)
    .collect();

    assert_eq!(codes, (0..=9).collect::<Vec<u8>>());
    assert!(serde_json::from_value::<FilterType>(json!(10)).is_err());
}

#[test]
fn query_descriptor_wire_shape() {
    let query = QueryDescriptor {
        filters: vec![
            numeric("price", NumericOp::Between, &[10.0, 20.5]),
            FilterDescriptor::new(
                "created",
                FilterType::Date(DateOp::After),
                [FilterValue::Date(date(2024, 3, 1))],
            ),
            FilterDescriptor::new("owner", FilterType::Identifier, [FilterValue::from("u1")]),
        ],
        sorts: vec![SortDescriptor::new("name", SortDirection::Descending)],
    };

    let value = serde_json::to_value(&query).expect("query should serialize");

    assert_eq!(
        value,
        json!({
            "filters": [
                { "field": "price", "values": [10.0, 20.5], "type": 5 },
                { "field": "created", "values": ["2024-03-01"], "type": 8 },
                { "field": "owner", "values": ["u1"], "type": 1 }
            ],
            "sorts": [{ "field": "name", "sortType": 1 }]
        })
    );

    let decoded: QueryDescriptor = serde_json::from_value(value).expect("query should decode");
    assert_eq!(decoded, query);
}

#[test]
fn filter_values_decode_by_filter_type() {
    let decoded: Vec<FilterDescriptor> = serde_json::from_value(json!([
        { "field": "name", "values": ["2024-01-01"], "type": 0 },
        { "field": "ownerId", "values": ["2024-01-01", 42], "type": 1 },
        { "field": "price", "values": ["12.5"], "type": 2 },
        { "field": "created", "values": ["2024-01-01"], "type": 6 },
        { "field": "created", "values": [""], "type": 7 }
    ]))
    .expect("filters should decode");

    assert_eq!(
        decoded,
        vec![
            text("name", "2024-01-01"),
            FilterDescriptor::new(
                "ownerId",
                FilterType::Identifier,
                [FilterValue::from("2024-01-01"), FilterValue::from("42")],
            ),
            numeric("price", NumericOp::Equal, &[12.5]),
            FilterDescriptor::new(
                "created",
                FilterType::Date(DateOp::Equal),
                [FilterValue::Date(date(2024, 1, 1))],
            ),
            FilterDescriptor::new("created", FilterType::Date(DateOp::Before), [FilterValue::from("")]),
        ]
    );
    assert!(decoded[4].is_empty());

    let err = serde_json::from_value::<FilterDescriptor>(
        json!({ "field": "created", "values": ["yesterday"], "type": 6 }),
    )
    .expect_err("non-ISO date is rejected");
    assert!(err.to_string().contains("expects a YYYY-MM-DD date"), "{err}");
    assert!(serde_json::from_value::<FilterDescriptor>(
        json!({ "field": "price", "values": [true], "type": 3 })
    )
    .is_err());
}

#[test]
fn column_config_accepts_host_json() {
    let column: ColumnConfig = serde_json::from_value(json!({
        "key": "owner",
        "label": "Owner",
        "type": "uuid",
        "isFilter": true,
        "endpoint": "/users/list",
        "field": "ownerId",
        "labelFields": "firstName, lastName"
    }))
    .expect("column should decode");

    assert_eq!(column.kind, ColumnKind::Identifier);
    assert!(column.filterable);
    assert_eq!(column.kind.filter_family(), FilterFamily::Identifier);
    assert_eq!(
        LookupSource::from_column(&column),
        Some(
            LookupSource::new("/users/list")
                .with_label_fields(vec!["firstName".to_string(), "lastName".to_string()])
        )
    );
}

#[test]
fn text_filter_commits_every_keystroke() {
    let mut control = TextFilter::new("name");

    assert_eq!(control.set_term("bo"), text("name", "bo"));
    assert_eq!(
        control.set_term(""),
        FilterDescriptor::cleared("name", FilterType::Text)
    );

    control.set_term("bolt");
    let cleared = control.reset();
    assert!(cleared.is_empty());
    assert_eq!(control.term(), "");
}

#[test]
fn first_sort_toggle_is_descending() {
    let mut control = TextFilter::new("name");

    assert_eq!(
        control.toggle_sort(),
        SortDescriptor::new("name", SortDirection::Descending)
    );
    assert_eq!(
        control.toggle_sort(),
        SortDescriptor::new("name", SortDirection::Ascending)
    );
}

#[test]
fn numeric_mode_switch_does_not_commit_and_resets_drafts() {
    let mut control = NumericFilter::new("price");
    control.select_mode(NumericOp::GreaterThan);
    control.set_value("12");

    control.select_mode(NumericOp::LessThan);

    assert_eq!(control.mode(), Some(NumericOp::LessThan));
    assert_eq!(control.value(), None);
    assert!(control.inputs_shown());
}

#[test]
fn numeric_value_entry() {
    let mut control = NumericFilter::new("price");
    control.select_mode(NumericOp::GreaterThan);

    assert_eq!(
        control.set_value("12,5"),
        Some(numeric("price", NumericOp::GreaterThan, &[12.5]))
    );
    assert_eq!(control.set_value("abc"), None, "invalid input is dropped");
    assert_eq!(control.value(), Some(&12.5));
    assert_eq!(
        control.set_value(" "),
        Some(FilterDescriptor::cleared(
            "price",
            FilterType::Numeric(NumericOp::GreaterThan)
        ))
    );
    assert_eq!(control.value(), None);
}

#[test]
fn numeric_between_needs_both_ends() {
    let mut control = NumericFilter::new("price");
    control.select_mode(NumericOp::Between);

    assert_eq!(control.set_value("3"), None);
    assert_eq!(control.set_range_start("1"), None);
    assert_eq!(
        control.set_range_end("5"),
        Some(numeric("price", NumericOp::Between, &[1.0, 5.0]))
    );
    assert_eq!(control.display(), "1 - 5");

    assert_eq!(control.set_range_end("x"), None);
    assert_eq!(
        control.set_range_end(""),
        Some(FilterDescriptor::cleared(
            "price",
            FilterType::Numeric(NumericOp::Between)
        ))
    );
    assert_eq!(control.set_range_start(""), None, "already incomplete");
}

#[test]
fn numeric_reset_hides_inputs_and_clears() {
    let mut control = NumericFilter::new("price");
    control.select_mode(NumericOp::Between);
    control.set_range_start("1");
    control.set_range_end("5");

    let cleared = control.reset();

    assert_eq!(
        cleared,
        FilterDescriptor::cleared("price", FilterType::Numeric(NumericOp::Between))
    );
    assert_eq!(control.mode(), None);
    assert!(!control.inputs_shown());
    assert_eq!(control.display(), "");
}

#[test]
fn date_filter_parses_iso_dates() {
    let mut control = DateFilter::new("createdAt");
    control.select_mode(DateOp::Before);

    assert_eq!(
        control.set_value("2024-03-01"),
        Some(FilterDescriptor::new(
            "createdAt",
            FilterType::Date(DateOp::Before),
            [FilterValue::Date(date(2024, 3, 1))],
        ))
    );
    assert_eq!(control.set_value("01.03.2024"), None);

    control.select_mode(DateOp::Between);
    control.set_range_start("2024-01-01");
    let range = control.set_range_end("2024-01-31").expect("complete range commits");
    assert_eq!(range.filter_type.code(), 9);
    assert_eq!(control.display(), "2024-01-01 - 2024-01-31");
}

#[test]
fn search_box_collapses_after_delay() {
    let mut search = SearchBox::new(200, Duration::from_millis(200));
    let t0 = Instant::now();
    assert_eq!(search.width(), 30);

    search.focus();
    assert_eq!(search.width(), 200);

    search.blur(t0);
    assert!(search.collapse_pending());
    assert!(!search.tick(t0 + Duration::from_millis(100)));
    assert!(search.is_expanded());
    assert!(search.tick(t0 + Duration::from_millis(200)));
    assert!(!search.is_expanded());
}

#[test]
fn refocus_cancels_pending_collapse() {
    let mut search = SearchBox::default();
    let t0 = Instant::now();
    search.focus();
    search.blur(t0);

    search.focus();

    assert!(!search.tick(t0 + Duration::from_secs(1)));
    assert!(search.is_expanded());
}

#[test]
fn timer_driven_collapse_honours_the_latest_blur() {
    let mut search = SearchBox::default();
    assert_eq!(search.schedule_collapse(), None, "collapsed box has nothing to collapse");

    search.focus();
    let stale = search.schedule_collapse().expect("expanded box schedules");
    search.focus();
    assert!(!search.collapse_pending());
    let current = search.schedule_collapse().expect("expanded box schedules");

    assert!(!search.expire(stale), "refocus made the first wait stale");
    assert!(search.is_expanded());
    assert!(search.expire(current));
    assert!(!search.is_expanded());
    assert!(!search.expire(current), "a ticket fires once");
}

#[test]
fn numeric_search_box_is_narrower() {
    let settings = Settings::default();
    let mut search = settings.numeric_search_box();
    search.focus();
    assert_eq!(search.width(), 150);
    assert_eq!(NumericFilter::new("price").search_box().collapse_delay(), settings.collapse_delay());
}

#[test]
fn outside_click_closes_menu_and_collapses_search() {
    let mut registry = DismissRegistry::new();
    let mut control = TextFilter::new("name");
    control.toggle_menu(&mut registry);
    control.focus_search(&mut registry);
    assert!(registry.is_open(control.token()));

    let closed = registry.dispatch(&[NodeId::from("body")]);

    assert_eq!(closed, vec![control.token()]);
    assert!(control.dismiss_if_closed(&closed));
    assert!(!control.menu_open());
    assert!(!control.search_box().is_expanded());
    assert!(!registry.is_open(control.token()));
}

#[test]
fn closing_the_menu_releases_the_overlay() {
    let mut registry = DismissRegistry::new();
    let mut control = NumericFilter::new("price");

    control.toggle_menu(&mut registry);
    assert!(registry.is_open(control.token()));
    control.toggle_menu(&mut registry);

    assert!(!control.menu_open());
    assert!(!registry.is_open(control.token()));
    assert!(registry.dispatch(&[]).is_empty(), "nothing left to dismiss");
}

#[test]
fn open_search_keeps_the_overlay_until_it_collapses() {
    let mut registry = DismissRegistry::new();
    let mut control = TextFilter::new("name");
    control.focus_search(&mut registry);
    control.toggle_menu(&mut registry);
    control.toggle_menu(&mut registry);
    assert!(registry.is_open(control.token()), "search box is still expanded");

    let ticket = control.schedule_collapse().expect("expanded search schedules");
    assert!(control.expire_collapse(ticket, &mut registry));

    assert!(!control.search_box().is_expanded());
    assert!(!registry.is_open(control.token()));
}

#[test]
fn one_page_click_dismisses_every_table() {
    let mut registry = DismissRegistry::new();
    let mut orders_name = TextFilter::new("name");
    let mut users_owner = LookupFilter::with_candidates("ownerId", users());
    let users_column_menu = OverlayToken::next();
    let mut users_columns = ColumnState::new(sample_columns(), &IndexMap::new());
    orders_name.toggle_menu(&mut registry);
    users_owner.toggle_menu(&mut registry);
    users_columns.toggle_menu();
    registry.open(users_column_menu);

    // Row action button in another table: nothing claims the click.
    let closed = registry.dispatch(&[]);

    assert_eq!(
        closed,
        vec![orders_name.token(), users_owner.token(), users_column_menu]
    );
    assert!(orders_name.dismiss_if_closed(&closed));
    assert!(users_owner.dismiss_if_closed(&closed));
    assert!(closed.contains(&users_column_menu) && users_columns.close_menu());
    assert!(!orders_name.menu_open());
    assert!(!users_owner.menu_open());
    assert!(!users_columns.menu_open());
    assert!(!users_columns.close_menu(), "already closed");
}

#[test]
fn click_inside_boundary_keeps_overlay_open() {
    let mut registry = DismissRegistry::new();
    let token = OverlayToken::next();
    registry.attach(token, token.dom_id().as_str());
    registry.attach(token, "portal-menu");
    registry.open(token);

    assert!(registry.dispatch(&[NodeId::from("row-1"), NodeId::new(token.dom_id())]).is_empty());
    assert!(registry.dispatch(&[NodeId::from("portal-menu")]).is_empty());

    registry.detach(token, &NodeId::from("portal-menu"));
    assert_eq!(registry.dispatch(&[NodeId::from("portal-menu")]), vec![token]);
}

#[test]
fn claim_protects_only_the_current_event() {
    let mut registry = DismissRegistry::new();
    let token = OverlayToken::next();
    let other = OverlayToken::next();
    registry.open(token);
    registry.open(other);

    registry.claim(token);
    assert_eq!(registry.dispatch(&[]), vec![other]);
    assert!(registry.is_open(token));

    assert_eq!(registry.dispatch(&[]), vec![token]);
}

#[test]
fn lookup_service_caches_per_source() {
    let client = FakeClient::returning(users());
    let service = LookupService::new(client.clone());
    let source = LookupSource::new("/users/list");

    let first = block_on(service.candidates(&source)).expect("fetch should succeed");
    let second = block_on(service.candidates(&source)).expect("cache should answer");

    assert_eq!(first, second);
    assert_eq!(client.calls.get(), 1);
    assert!(service.cache().contains("/users/list"));

    assert!(service.evict("/users/list"));
    block_on(service.candidates(&source)).expect("refetch should succeed");
    assert_eq!(client.calls.get(), 2);
}

#[test]
fn shared_cache_serves_other_services() {
    let cache = Rc::new(LookupCache::new());
    let first_client = FakeClient::returning(users());
    let second_client = FakeClient::returning(Vec::new());
    let first = LookupService::with_cache(first_client.clone(), cache.clone());
    let second = LookupService::with_cache(second_client.clone(), cache.clone());
    let source = LookupSource::new("/users/list");

    block_on(first.candidates(&source)).expect("fetch should succeed");
    let cached = block_on(second.candidates(&source)).expect("cache should answer");

    assert_eq!(cached, users());
    assert_eq!(second_client.calls.get(), 0);
    second.evict_all();
    assert!(cache.is_empty());
}

#[test]
fn lookup_filter_loads_once() {
    let client = FakeClient::returning(users());
    let service = LookupService::new(client.clone());
    let mut control = LookupFilter::with_source("ownerId", LookupSource::new("/users/list"));
    assert!(control.needs_load());

    assert!(block_on(control.load(&service)));
    assert!(control.is_loaded());
    assert_eq!(control.candidates(), users().as_slice());

    assert!(!block_on(control.load(&service)));
    assert_eq!(client.calls.get(), 1);
}

#[test]
fn static_candidates_never_fetch() {
    let mut control = LookupFilter::with_candidates("status", users());

    assert!(!control.needs_load());
    assert_eq!(control.begin_load(), None);
}

#[test]
fn response_after_teardown_is_ignored() {
    let mut control = LookupFilter::with_source("ownerId", LookupSource::new("/users/list"));
    let ticket = control.begin_load().expect("first load hands out a ticket");
    assert!(control.is_loading());
    assert_eq!(control.begin_load(), None, "no second request while loading");

    control.teardown();

    assert!(!control.finish_load(ticket, Ok(users())));
    assert!(control.candidates().is_empty());
    assert!(!control.needs_load());
}

#[test]
fn failed_lookup_keeps_previous_candidates() {
    let service = LookupService::new(FakeClient::failing("/users/list"));
    let mut control = LookupFilter::with_source("ownerId", LookupSource::new("/users/list"));

    assert!(block_on(control.load(&service)));

    assert!(control.candidates().is_empty());
    assert!(!control.is_loading());
    assert!(!control.is_loaded());
    assert_eq!(
        control.last_error(),
        Some(&LookupError::Status {
            endpoint: "/users/list".to_string(),
            status: 503
        })
    );
    assert!(control.needs_load(), "a later open may retry");
}

#[test]
fn lookup_toggle_builds_identifier_filter() {
    let mut control = LookupFilter::with_candidates("ownerId", users());

    control.toggle_id("u1");
    let both = control.toggle_id("u2");
    assert_eq!(
        both,
        FilterDescriptor::new(
            "ownerId",
            FilterType::Identifier,
            [FilterValue::from("u1"), FilterValue::from("u2")]
        )
    );
    assert_eq!(control.display(), "Ada Lovelace, Alan Turing");

    let one = control.toggle_id("u1");
    assert_eq!(one.values, vec![FilterValue::from("u2")]);
    assert!(control.toggle_id("u2").is_empty());

    control.toggle_id("u1");
    assert_eq!(
        control.reset(),
        FilterDescriptor::cleared("ownerId", FilterType::Identifier)
    );
    assert!(control.selected().is_empty());
}

#[test]
fn lookup_search_targets_search_field() {
    let mut control =
        LookupFilter::with_candidates("ownerId", users()).with_search_field("ownerName");
    assert_eq!(control.set_search_term("ada"), text("ownerName", "ada"));

    let mut fallback = LookupFilter::with_candidates("ownerId", users()).with_search_field("");
    assert_eq!(fallback.set_search_term("ada"), text("ownerId", "ada"));
}

#[test]
fn pager_guards_duplicate_requests() {
    let mut pager = Pager::new(DEFAULT_PAGE_SIZE);

    assert_eq!(
        pager.request_next_page(),
        Some(PageRequest {
            page: 0,
            page_size: 30
        })
    );
    assert_eq!(pager.request_next_page(), None);

    pager.page_loaded();
    assert_eq!(pager.page(), 1);
    assert!(!pager.is_loading());

    assert_eq!(pager.request_next_page().map(|request| request.page), Some(1));
    pager.page_failed();
    assert_eq!(pager.page(), 1);
    assert!(!pager.is_loading());

    pager.set_loading(true);
    assert_eq!(pager.request_next_page(), None);
    pager.reset();
    assert_eq!(pager.page(), 0);
    assert!(!pager.is_loading());
}

#[test]
fn pager_requests_only_at_bottom() {
    let mut pager = Pager::new(10);
    assert_eq!(pager.on_scroll(bottom(100.0)), None);
    assert!(pager.on_scroll(bottom(500.0)).is_some());
    assert_eq!(pager.on_scroll(bottom(500.0)), None, "still loading");

    let mut early = Pager::new(10).with_bottom_threshold(50.0);
    assert!(early.on_scroll(bottom(450.0)).is_some());
}

#[test]
fn column_state_orders_by_configuration() {
    let mut initial = IndexMap::new();
    initial.insert("extra".to_string(), true);
    initial.insert("price".to_string(), false);

    let mut columns = ColumnState::new(sample_columns(), &initial).with_pinned("article");

    assert_eq!(
        columns.visibility().keys().cloned().collect::<Vec<_>>(),
        vec!["article", "name", "price", "extra"]
    );
    assert_eq!(columns.selected_columns(), ["article", "name", "extra"]);
    assert_eq!(columns.body_columns(), vec!["name", "extra"]);

    columns.toggle_visible("price", true);
    assert_eq!(columns.selected_columns(), ["article", "name", "price", "extra"]);

    columns.remove_column("name");
    assert!(!columns.is_visible("name"));
    assert_eq!(columns.column_label("price"), "Price");
    assert_eq!(columns.column_label("extra"), "extra");

    columns.hide_all();
    assert!(columns.selected_columns().is_empty());
    columns.show_all();
    assert_eq!(columns.selected_columns().len(), 4);

    assert!(!columns.menu_open());
    columns.toggle_menu();
    assert!(columns.menu_open());
}

#[test]
fn controller_reports_to_collaborator() {
    let mut table = TableController::new(
        sample_columns(),
        &IndexMap::new(),
        &Settings::default(),
        RecordedEvents::default(),
    );

    table.apply_filter(text("name", "bolt"));
    table.commit(None);
    table.apply_sort(SortDescriptor::new("price", SortDirection::Descending));

    let events = table.events();
    assert_eq!(events.queries.len(), 2);
    assert_eq!(events.queries[1], table.query().clone());
    assert_eq!(table.columns().body_columns(), vec!["name", "price"]);

    assert!(table.on_scroll(bottom(500.0)).is_some());
    assert_eq!(table.on_scroll(bottom(500.0)), None);
    table.page_loaded();
    assert_eq!(table.request_next_page().map(|request| request.page), Some(1));

    table.edit_row("7");
    table.delete_row("8");
    let events = table.events();
    assert_eq!(
        events.pages,
        vec![
            PageRequest {
                page: 0,
                page_size: 30
            },
            PageRequest {
                page: 1,
                page_size: 30
            }
        ]
    );
    assert_eq!(events.edits, vec!["7"]);
    assert_eq!(events.deletes, vec!["8"]);
}

#[test]
fn settings_defaults_and_overrides() {
    let defaults = Settings::from_toml_str("").expect("empty config is valid");
    assert_eq!(defaults, Settings::default());
    assert_eq!(defaults.page_size, 30);
    assert_eq!(defaults.collapse_delay(), Duration::from_millis(200));
    assert_eq!(defaults.pinned_column.as_deref(), Some("article"));

    let settings = Settings::from_toml_str(
        r#"
        page_size = 50
        bottom_threshold_px = 40.0

        [lookup]
        base_url = "https://api.example.com"
        token = "secret"
        "#,
    )
    .expect("config should parse");
    assert_eq!(settings.page_size, 50);
    assert_eq!(settings.bottom_threshold_px, 40.0);
    assert_eq!(settings.lookup.base_url, "https://api.example.com");
    assert_eq!(settings.lookup.token.as_deref(), Some("secret"));
}

#[test]
fn settings_reject_bad_values() {
    assert!(matches!(
        Settings::from_toml_str("page_size = 0"),
        Err(SettingsError::Invalid(_))
    ));
    assert!(matches!(
        Settings::from_toml_str("page_size = \"many\""),
        Err(SettingsError::Parse(_))
    ));
}

#[test]
fn lookup_response_maps_to_candidates() {
    let source = LookupSource::new("/users/list")
        .with_label_fields(vec!["firstName".to_string(), "lastName".to_string()]);
    let body = json!({
        "data": [
            { "id": "u1", "firstName": "Ada", "lastName": "Lovelace" },
            { "id": 7 }
        ]
    });

    let candidates = candidates_from_response(&body, &source).expect("body should decode");

    assert_eq!(
        candidates,
        vec![
            LookupCandidate::new("u1", "Ada Lovelace"),
            LookupCandidate::new("7", "7")
        ]
    );
    assert!(matches!(
        candidates_from_response(&json!({ "items": [] }), &source),
        Err(LookupError::Decode { .. })
    ));
    assert!(matches!(
        candidates_from_response(&json!({ "data": [{ "name": "x" }] }), &source),
        Err(LookupError::Decode { .. })
    ));
}

#[test]
fn http_client_joins_base_url_and_endpoint() {
    let client = HttpLookupClient::new("https://api.example.com", None);
    assert_eq!(
        client.url_for("/users/list"),
        "https://api.example.com/users/list"
    );
}

#[test]
fn column_visibility_round_trips_through_sqlite() {
    let temp_dir = unique_test_dir("column-visibility");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let repo = SqliteRepo::new(temp_dir.join("settings.sqlite"));
    repo.init().expect("init should succeed");

    let mut visibility = IndexMap::new();
    visibility.insert("price".to_string(), false);
    visibility.insert("article".to_string(), true);
    repo.save_column_visibility("articles", &visibility)
        .expect("should store column visibility");

    let loaded = repo
        .load_column_visibility("articles")
        .expect("should load column visibility");
    assert_eq!(
        loaded.into_iter().collect::<Vec<_>>(),
        vec![("price".to_string(), false), ("article".to_string(), true)]
    );
    assert!(repo
        .load_column_visibility("orders")
        .expect("other table should load")
        .is_empty());

    let mut replaced = IndexMap::new();
    replaced.insert("name".to_string(), true);
    repo.save_column_visibility("articles", &replaced)
        .expect("should replace column visibility");
    assert_eq!(
        repo.load_column_visibility("articles").expect("should reload"),
        replaced
    );

    repo.clear_column_visibility("articles")
        .expect("should clear column visibility");
    let mut defaults = IndexMap::new();
    defaults.insert("article".to_string(), true);
    assert_eq!(restore_visibility(&repo, "articles", &defaults), defaults);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn controller_saves_visibility() {
    let temp_dir = unique_test_dir("controller-save");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let repo = SqliteRepo::new(temp_dir.join("settings.sqlite"));
    repo.init().expect("init should succeed");

    let mut table = TableController::new(
        sample_columns(),
        &IndexMap::new(),
        &Settings::default(),
        RecordedEvents::default(),
    );
    table.toggle_visible("price", false);
    table.save_columns(&repo, "articles").expect("save should succeed");

    let restored = restore_visibility(&repo, "articles", &IndexMap::new());
    assert_eq!(restored.get("price"), Some(&false));
    assert_eq!(restored.get("name"), Some(&true));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn store_error_keeps_context_chain() {
    let err = anyhow::anyhow!("disk full").context("failed to commit column visibility updates");
    assert_eq!(
        StoreError::from(err),
        StoreError::Message("failed to commit column visibility updates: disk full".to_string())
    );
}

#[test]
fn short_dates_use_dotted_day_first_format() {
    assert_eq!(format_short_date("2024-03-05"), "05.03.2024");
    assert_eq!(format_short_date("2024-03-05T10:20:30Z"), "05.03.2024");
    assert_eq!(format_short_date("2024-03-05T10:20:30.123"), "05.03.2024");
    assert_eq!(format_short_date("n/a"), "n/a");
    assert_eq!(format_cell_value(ColumnKind::Date, "2024-12-31"), "31.12.2024");
    assert_eq!(format_cell_value(ColumnKind::String, "2024-12-31"), "2024-12-31");
}

#[test]
fn layout_switches_at_breakpoint() {
    assert_eq!(LayoutMode::from_width(1100.0, 1100.0), LayoutMode::Desktop);
    assert_eq!(LayoutMode::from_width(1099.0, 1100.0), LayoutMode::Mobile);
}

#[test]
fn gauge_eases_toward_target() {
    let mut gauge = GaugeTween::new(0.0, 100.0, true);
    assert!(gauge.set_target(100.0), "first target starts the frame loop");

    assert!(gauge.step());
    assert_eq!(gauge.displayed(), 10.0);

    let mut frames = 1;
    while gauge.step() {
        frames += 1;
        assert!(frames < 200, "tween should settle");
    }
    assert!(gauge.is_settled());
    assert_eq!(gauge.percent(), 100);
    assert_eq!(gauge.dash_offset(120.0, 10.0), 0.0);
}

#[test]
fn retargeting_mid_ease_reuses_the_running_loop() {
    let mut gauge = GaugeTween::new(0.0, 100.0, true);
    assert!(gauge.set_target(100.0));
    for _ in 0..5 {
        assert!(gauge.step());
    }
    let midway = gauge.displayed();
    assert!(midway > 0.0 && midway < 100.0);

    assert!(!gauge.set_target(20.0), "loop already running");
    assert!(gauge.is_running());
    assert_eq!(gauge.displayed(), midway, "eases on from the displayed value");

    let mut frames = 0;
    while gauge.step() {
        frames += 1;
        assert!(frames < 200, "tween should settle");
    }
    assert_eq!(gauge.displayed(), 20.0);
    assert!(!gauge.is_running());
    assert!(gauge.set_target(60.0), "settled gauge needs a new loop");
    assert!(!gauge.set_target(60.0));
}

#[test]
fn gauge_without_animation_jumps() {
    let mut gauge = GaugeTween::new(0.0, 200.0, false);
    assert!(!gauge.set_target(50.0));

    assert_eq!(gauge.displayed(), 50.0);
    assert_eq!(gauge.percent(), 25);
    assert!(!gauge.step());
}
