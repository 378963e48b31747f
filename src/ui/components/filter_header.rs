use dioxus::prelude::*;

use crate::domain::entities::column::ColumnConfig;
use crate::domain::entities::filter::{FilterDescriptor, FilterFamily, QueryDescriptor, SortDirection};
use crate::ui::components::LookupHandle;
use crate::ui::controls::chrome::FilterControl;
use crate::ui::controls::range_filter::{DateKind, NumericKind, RangeFilter, RangeKind};
use crate::ui::controls::{LookupFilter, SearchBox, TextFilter};
use crate::ui::state::table_state::TableState;
use crate::ui::timer;
use crate::usecase::ports::lookup::LookupSource;

const HEADER_STYLE: &str =
    "position: relative; display: flex; align-items: center; gap: 4px; white-space: nowrap;";
const MENU_STYLE: &str = "position: absolute; top: 100%; left: 0; min-width: 200px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;";
const ICON_BUTTON_STYLE: &str =
    "border: none; background: transparent; padding: 2px 4px; cursor: pointer;";

/// Header cell of a column: the label plus the filter control matching the
/// column's kind.
#[component]
pub fn FilterHeader(
    state: TableState,
    column: ColumnConfig,
    on_query_changed: EventHandler<QueryDescriptor>,
) -> Element {
    if !column.filterable {
        return rsx! {
            span { "{column.label}" }
        };
    }
    match column.kind.filter_family() {
        FilterFamily::Text => rsx! {
            TextFilterHeader { state, column, on_query_changed }
        },
        FilterFamily::Numeric => rsx! {
            NumericFilterHeader { state, column, on_query_changed }
        },
        FilterFamily::Date => rsx! {
            DateFilterHeader { state, column, on_query_changed }
        },
        FilterFamily::Identifier => rsx! {
            LookupFilterHeader { state, column, on_query_changed }
        },
    }
}

fn commit(state: TableState, on_query_changed: EventHandler<QueryDescriptor>, event: Option<FilterDescriptor>) {
    if let Some(event) = event {
        on_query_changed.call(state.apply_filter(event));
    }
}

fn toggle_sort<C: FilterControl + 'static>(
    mut control: Signal<C>,
    state: TableState,
    on_query_changed: EventHandler<QueryDescriptor>,
) {
    let sort = control.write().toggle_sort();
    on_query_changed.call(state.apply_sort(sort));
}

fn toggle_menu<C: FilterControl + 'static>(mut control: Signal<C>, state: TableState) {
    let mut registry = state.dismiss.registry;
    control.write().toggle_menu(&mut registry.write());
}

fn focus_search<C: FilterControl + 'static>(mut control: Signal<C>, state: TableState) {
    let mut registry = state.dismiss.registry;
    control.write().focus_search(&mut registry.write());
}

/// Schedules the delayed collapse; a focus or another blur in between makes
/// the wait stale.
fn blur_search<C: FilterControl + 'static>(mut control: Signal<C>, state: TableState) {
    let Some(ticket) = control.write().schedule_collapse() else {
        return;
    };
    let delay = control.peek().search_box().collapse_delay();
    spawn(async move {
        timer::sleep(delay).await;
        let mut registry = state.dismiss.registry;
        control.write().expire_collapse(ticket, &mut registry.write());
    });
}

/// Hooks the control into outside-dismiss for the lifetime of the header.
fn use_overlay<C: FilterControl + 'static>(mut control: Signal<C>, state: TableState) {
    let token = control.peek().token();
    use_hook(move || {
        let mut registry = state.dismiss.registry;
        registry.write().attach(token, token.dom_id().as_str());
    });
    use_effect(move || {
        let closed = state.dismiss.dismissed.read();
        control.write().dismiss_if_closed(&closed);
    });
    use_drop(move || {
        let mut registry = state.dismiss.registry;
        if let Ok(mut registry) = registry.try_write() {
            registry.unregister(token);
        };
    });
}

fn sort_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    }
}

#[component]
fn TextFilterHeader(
    state: TableState,
    column: ColumnConfig,
    on_query_changed: EventHandler<QueryDescriptor>,
) -> Element {
    let field = column.field.clone();
    let search = state.settings.peek().search_box();
    let control = use_signal(move || TextFilter::with_search_box(field, search));
    use_overlay(control, state);

    let token = control.read().token();
    let term = control.read().term().to_string();
    let search_style = control.read().search_box().style();
    let arrow = sort_arrow(control.read().chrome().sort_direction());

    rsx! {
        div {
            id: token.dom_id(),
            style: HEADER_STYLE,
            onclick: move |_| state.dismiss.claim(token),
            span { "{column.label}" }
            input {
                style: "{search_style}",
                value: "{term}",
                placeholder: "Search",
                onfocus: move |_| focus_search(control, state),
                onblur: move |_| blur_search(control, state),
                oninput: move |event| {
                    let mut control = control;
                    let descriptor = control.write().set_term(event.value());
                    commit(state, on_query_changed, Some(descriptor));
                },
            }
            button {
                style: ICON_BUTTON_STYLE,
                onclick: move |_| toggle_sort(control, state, on_query_changed),
                "{arrow}"
            }
            if !term.is_empty() {
                button {
                    style: ICON_BUTTON_STYLE,
                    onclick: move |_| {
                        let mut control = control;
                        let descriptor = control.write().reset();
                        commit(state, on_query_changed, Some(descriptor));
                    },
                    "✕"
                }
            }
        }
    }
}

#[component]
fn NumericFilterHeader(
    state: TableState,
    column: ColumnConfig,
    on_query_changed: EventHandler<QueryDescriptor>,
) -> Element {
    let field = column.field.clone();
    let search = state.settings.peek().numeric_search_box();
    let control = use_signal(move || RangeFilter::<NumericKind>::with_search_box(field, search));
    use_overlay(control, state);
    range_header(state, column.label, control, on_query_changed)
}

#[component]
fn DateFilterHeader(
    state: TableState,
    column: ColumnConfig,
    on_query_changed: EventHandler<QueryDescriptor>,
) -> Element {
    let field = column.field.clone();
    let search = state.settings.peek().search_box();
    let control = use_signal(move || RangeFilter::<DateKind>::with_search_box(field, search));
    use_overlay(control, state);
    range_header(state, column.label, control, on_query_changed)
}

fn range_header<K: RangeKind + 'static>(
    state: TableState,
    label: String,
    control: Signal<RangeFilter<K>>,
    on_query_changed: EventHandler<QueryDescriptor>,
) -> Element {
    let token = control.read().token();
    let menu_open = control.read().menu_open();
    let inputs_shown = control.read().inputs_shown();
    let is_range = control.read().mode().is_some_and(K::is_range);
    let mode_label = control.read().mode().map(K::op_label).unwrap_or("Filter");
    let display = control.read().display();
    let search_style = control.read().search_box().style();
    let arrow = sort_arrow(control.read().chrome().sort_direction());
    let input_type = K::INPUT_TYPE;

    rsx! {
        div {
            id: token.dom_id(),
            style: HEADER_STYLE,
            onclick: move |_| state.dismiss.claim(token),
            span { "{label}" }
            button {
                style: ICON_BUTTON_STYLE,
                onclick: move |_| toggle_menu(control, state),
                "{mode_label}"
            }
            if inputs_shown {
                if is_range {
                    input {
                        r#type: input_type,
                        style: "{search_style}",
                        placeholder: "From",
                        onfocus: move |_| focus_search(control, state),
                        onblur: move |_| blur_search(control, state),
                        onchange: move |event| {
                            let mut control = control;
                            let descriptor = control.write().set_range_start(&event.value());
                            commit(state, on_query_changed, descriptor);
                        },
                    }
                    input {
                        r#type: input_type,
                        style: "{search_style}",
                        placeholder: "To",
                        onfocus: move |_| focus_search(control, state),
                        onblur: move |_| blur_search(control, state),
                        onchange: move |event| {
                            let mut control = control;
                            let descriptor = control.write().set_range_end(&event.value());
                            commit(state, on_query_changed, descriptor);
                        },
                    }
                } else {
                    input {
                        r#type: input_type,
                        style: "{search_style}",
                        onfocus: move |_| focus_search(control, state),
                        onblur: move |_| blur_search(control, state),
                        onchange: move |event| {
                            let mut control = control;
                            let descriptor = control.write().set_value(&event.value());
                            commit(state, on_query_changed, descriptor);
                        },
                    }
                }
            } else if !display.is_empty() {
                span { "{display}" }
            }
            button {
                style: ICON_BUTTON_STYLE,
                onclick: move |_| toggle_sort(control, state, on_query_changed),
                "{arrow}"
            }
            if menu_open {
                div { style: MENU_STYLE,
                    for op in K::ops().iter().copied() {
                        div {
                            style: "padding: 6px 4px; cursor: pointer;",
                            onclick: move |_| {
                                let mut control = control;
                                control.write().select_mode(op);
                                toggle_menu(control, state);
                            },
                            {K::op_label(op)}
                        }
                    }
                    div {
                        style: "padding: 6px 4px; cursor: pointer; border-top: 1px solid #eee;",
                        onclick: move |_| {
                            let mut control = control;
                            let descriptor = control.write().reset();
                            toggle_menu(control, state);
                            commit(state, on_query_changed, Some(descriptor));
                        },
                        "Reset"
                    }
                }
            }
        }
    }
}

fn lookup_control(column: &ColumnConfig, search: SearchBox) -> LookupFilter {
    let control = match (&column.options, LookupSource::from_column(column)) {
        (Some(options), _) => LookupFilter::with_candidates(column.field.clone(), options.clone()),
        (None, Some(source)) => LookupFilter::with_source(column.field.clone(), source),
        (None, None) => LookupFilter::with_candidates(column.field.clone(), Vec::new()),
    };
    let control = match &column.search_field {
        Some(search_field) => control.with_search_field(search_field.clone()),
        None => control,
    };
    control.with_search_box(search)
}

#[component]
fn LookupFilterHeader(
    state: TableState,
    column: ColumnConfig,
    on_query_changed: EventHandler<QueryDescriptor>,
) -> Element {
    let search = state.settings.peek().search_box();
    let initial = lookup_control(&column, search);
    let mut control = use_signal(move || initial);
    use_overlay(control, state);

    let lookup = try_use_context::<LookupHandle>();
    use_drop(move || {
        if let Ok(mut control) = control.try_write() {
            control.teardown();
        }
    });
    use_hook(move || {
        let Some(LookupHandle(service)) = lookup else {
            return;
        };
        let Some(ticket) = control.write().begin_load() else {
            return;
        };
        spawn(async move {
            let result = service.candidates(&ticket.source).await;
            control.write().finish_load(ticket, result);
        });
    });

    let token = control.read().token();
    let menu_open = control.read().menu_open();
    let loading = control.read().is_loading();
    let failed = control.read().last_error().map(|err| err.to_string());
    let display = control.read().display();
    let search_term = control.read().search_term().to_string();
    let search_style = control.read().search_box().style();
    let arrow = sort_arrow(control.read().chrome().sort_direction());
    let candidates: Vec<(String, String, bool)> = control
        .read()
        .candidates()
        .iter()
        .map(|candidate| {
            (
                candidate.id.clone(),
                candidate.label.clone(),
                control.read().is_selected(&candidate.id),
            )
        })
        .collect();

    rsx! {
        div {
            id: token.dom_id(),
            style: HEADER_STYLE,
            onclick: move |_| state.dismiss.claim(token),
            span { "{column.label}" }
            input {
                style: "{search_style}",
                value: "{search_term}",
                placeholder: "Search",
                onfocus: move |_| focus_search(control, state),
                onblur: move |_| blur_search(control, state),
                oninput: move |event| {
                    let descriptor = control.write().set_search_term(event.value());
                    commit(state, on_query_changed, Some(descriptor));
                },
            }
            button {
                style: ICON_BUTTON_STYLE,
                onclick: move |_| toggle_menu(control, state),
                if display.is_empty() { "☰" } else { "{display}" }
            }
            button {
                style: ICON_BUTTON_STYLE,
                onclick: move |_| toggle_sort(control, state, on_query_changed),
                "{arrow}"
            }
            if menu_open {
                div { style: "{MENU_STYLE} max-height: 320px; overflow-y: auto;",
                    if loading {
                        div { style: "padding: 6px 4px; color: #888;", "Loading…" }
                    }
                    if let Some(message) = failed {
                        div { style: "padding: 6px 4px; color: #c0392b;", "{message}" }
                    }
                    for (id, name, checked) in candidates {
                        label {
                            key: "{id}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: {
                                    let id = id.clone();
                                    move |_| {
                                        let descriptor = control.write().toggle_id(id.clone());
                                        commit(state, on_query_changed, Some(descriptor));
                                    }
                                },
                            }
                            span { "{name}" }
                        }
                    }
                    div {
                        style: "padding: 6px 4px; cursor: pointer; border-top: 1px solid #eee;",
                        onclick: move |_| {
                            let descriptor = control.write().reset();
                            commit(state, on_query_changed, Some(descriptor));
                        },
                        "Reset"
                    }
                }
            }
        }
    }
}
