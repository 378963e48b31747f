use dioxus::prelude::*;

use crate::domain::entities::column::ColumnConfig;
use crate::domain::entities::filter::QueryDescriptor;
use crate::domain::entities::page::{PageRequest, ScrollMetrics, TableRow};
use crate::ui::components::column_menu::ColumnMenu;
use crate::ui::components::filter_header::FilterHeader;
use crate::ui::format::{column_alignment, format_cell_value, LayoutMode};
use crate::ui::state::table_state::TableState;

fn table_header_cell_style(align: &str) -> String {
    format!(
        "position: sticky; top: 0; background: #f7f7f7; border-bottom: 1px solid #ddd; padding: 6px 8px; text-align: {align}; z-index: 1;"
    )
}

fn table_cell_style(align: &str) -> String {
    format!("border-bottom: 1px solid #eee; padding: 6px 8px; text-align: {align};")
}

/// The data table: filterable headers, scroll-driven paging, desktop table
/// or mobile cards depending on the measured width.
///
/// Rows are owned by the host. Every filter or sort change is reported
/// through `on_query_changed`; the host refetches, hands back new rows and
/// resets paging with [`TableState::reset_pages`]. Page requests arrive
/// through `on_request_page` and are answered with
/// [`TableState::page_loaded`] or [`TableState::page_failed`].
///
/// Mount a [`DismissRoot`](crate::ui::components::dismiss_root::DismissRoot)
/// above the table so clicks outside it also close its menus.
#[component]
pub fn DataTable(
    state: TableState,
    rows: Vec<TableRow>,
    on_query_changed: EventHandler<QueryDescriptor>,
    on_request_page: EventHandler<PageRequest>,
    on_edit_requested: Option<EventHandler<String>>,
    on_delete_requested: Option<EventHandler<String>>,
) -> Element {
    let layout = *state.layout.read();
    let loading = state.pager.read().is_loading();
    let (pinned, body): (Option<ColumnConfig>, Vec<ColumnConfig>) = {
        let columns = state.columns.read();
        let pinned = columns
            .pinned()
            .filter(|key| columns.is_visible(key))
            .and_then(|key| columns.column(key))
            .cloned();
        let body = columns
            .body_columns()
            .iter()
            .filter_map(|key| columns.column(key).cloned())
            .collect();
        (pinned, body)
    };
    let has_actions = on_edit_requested.is_some() || on_delete_requested.is_some();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100%; min-height: 0;",
            onclick: move |_| state.table_clicked(),
            onresize: move |event| {
                if let Ok(size) = event.get_border_box_size() {
                    state.update_layout(size.width);
                }
            },
            div {
                style: "display: flex; justify-content: flex-end; padding: 6px 0;",
                ColumnMenu { state }
            }
            div {
                style: "flex: 1; min-height: 0; overflow: auto;",
                onscroll: move |event| {
                    let metrics = ScrollMetrics {
                        scroll_top: event.scroll_top(),
                        viewport_height: f64::from(event.client_height()),
                        content_height: f64::from(event.scroll_height()),
                    };
                    if let Some(request) = state.on_scroll(metrics) {
                        on_request_page.call(request);
                    }
                },
                {match layout {
                    LayoutMode::Desktop => rsx! {
                        table {
                            style: "width: 100%; border-collapse: collapse;",
                            thead {
                                tr {
                                    if let Some(column) = pinned.clone() {
                                        th { style: table_header_cell_style("left"),
                                            FilterHeader { state, column, on_query_changed }
                                        }
                                    }
                                    for column in body.iter().cloned() {
                                        th {
                                            key: "{column.key}",
                                            style: table_header_cell_style(column_alignment(column.kind)),
                                            FilterHeader { state, column: column.clone(), on_query_changed }
                                        }
                                    }
                                    if has_actions {
                                        th { style: table_header_cell_style("right") }
                                    }
                                }
                            }
                            tbody {
                                for row in rows.iter().cloned() {
                                    tr { key: "{row.id}",
                                        if let Some(column) = pinned.as_ref() {
                                            td { style: table_cell_style("left"),
                                                strong { {format_cell_value(column.kind, row.cell(&column.key))} }
                                            }
                                        }
                                        for column in body.iter() {
                                            td {
                                                style: table_cell_style(column_alignment(column.kind)),
                                                {format_cell_value(column.kind, row.cell(&column.key))}
                                            }
                                        }
                                        if has_actions {
                                            td { style: table_cell_style("right"),
                                                RowActions { row_id: row.id.clone(), on_edit_requested, on_delete_requested }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    LayoutMode::Mobile => rsx! {
                        for row in rows.iter().cloned() {
                            div {
                                key: "{row.id}",
                                style: "border: 1px solid #ddd; border-radius: 8px; margin: 6px 0; padding: 8px;",
                                if let Some(column) = pinned.as_ref() {
                                    div { style: "font-weight: 600; margin-bottom: 4px;",
                                        {format_cell_value(column.kind, row.cell(&column.key))}
                                    }
                                }
                                for column in body.iter() {
                                    div { style: "display: flex; justify-content: space-between; gap: 8px;",
                                        span { style: "color: #666;", "{column.label}" }
                                        span { {format_cell_value(column.kind, row.cell(&column.key))} }
                                    }
                                }
                                if has_actions {
                                    RowActions { row_id: row.id.clone(), on_edit_requested, on_delete_requested }
                                }
                            }
                        }
                    },
                }}
                if loading {
                    div { style: "padding: 8px; text-align: center; color: #888;", "Loading…" }
                }
            }
        }
    }
}

#[component]
fn RowActions(
    row_id: String,
    #[props(!optional)] on_edit_requested: Option<EventHandler<String>>,
    #[props(!optional)] on_delete_requested: Option<EventHandler<String>>,
) -> Element {
    let edit_id = row_id.clone();
    rsx! {
        div { style: "display: inline-flex; gap: 4px;",
            if let Some(on_edit) = on_edit_requested {
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 2px 8px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| on_edit.call(edit_id.clone()),
                    "Edit"
                }
            }
            if let Some(on_delete) = on_delete_requested {
                button {
                    style: "border: 1px solid #e0b4b4; background: #fff; color: #c0392b; padding: 2px 8px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| on_delete.call(row_id.clone()),
                    "Delete"
                }
            }
        }
    }
}
