use dioxus::prelude::*;

use crate::ui::components::VisibilityStore;
use crate::ui::state::table_state::TableState;

/// "Choose columns" button with its checkbox list.
#[component]
pub fn ColumnMenu(state: TableState) -> Element {
    let store = try_use_context::<VisibilityStore>();
    let token = state.column_menu;
    use_effect(move || {
        if state.dismiss.dismissed.read().contains(&token) {
            let mut columns = state.columns;
            columns.write().close_menu();
        }
    });
    use_drop(move || {
        let mut registry = state.dismiss.registry;
        if let Ok(mut registry) = registry.try_write() {
            registry.unregister(token);
        };
    });
    let is_open = state.columns.read().menu_open();
    let entries: Vec<(String, String, bool)> = {
        let columns = state.columns.read();
        columns
            .options()
            .iter()
            .map(|column| {
                (
                    column.key.clone(),
                    column.label.clone(),
                    columns.is_visible(&column.key),
                )
            })
            .collect()
    };

    rsx! {
        div {
            id: token.dom_id(),
            style: "position: relative; display: inline-flex; align-items: center;",
            onclick: move |_| state.dismiss.claim(token),
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |_| {
                    let mut columns = state.columns;
                    columns.write().toggle_menu();
                    if columns.peek().menu_open() {
                        state.dismiss.open(token);
                    } else {
                        state.dismiss.close(token);
                    }
                },
                "Columns"
            }
            if is_open {
                div {
                    style: "position: absolute; top: 100%; right: 0; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                    for (key, title, checked) in entries {
                        label {
                            key: "{key}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: {
                                    let key = key.clone();
                                    let store = store.clone();
                                    move |_| {
                                        let mut columns = state.columns;
                                        columns.write().toggle_visible(&key, !checked);
                                        if let Some(store) = &store {
                                            save_visibility(store, state);
                                        }
                                    }
                                },
                            }
                            span { "{title}" }
                        }
                    }
                }
            }
        }
    }
}

fn save_visibility(store: &VisibilityStore, state: TableState) {
    let columns = state.columns.peek();
    if let Err(err) = store
        .repo
        .save_column_visibility(&store.table_key, columns.visibility())
    {
        tracing::warn!(table_key = %store.table_key, error = %err, "failed to save column visibility");
    }
}
