use std::path::{Path, PathBuf};
use std::rc::Rc;

use admin_table::infra::http::lookup_client::HttpLookupClient;
use admin_table::infra::sqlite::repo::SqliteRepo;
use admin_table::ui::components::data_table::DataTable;
use admin_table::ui::components::dismiss_root::DismissRoot;
use admin_table::ui::components::{LookupHandle, VisibilityStore};
use admin_table::ui::state::table_state::TableState;
use admin_table::{
    default_db_path, restore_visibility, ColumnConfig, ColumnKind, ColumnVisibilityRepository,
    LookupCandidate, LookupService, PageRequest, QueryDescriptor, Settings, TableRow,
};
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use dioxus::prelude::*;
use indexmap::IndexMap;

const TABLE_KEY: &str = "demo-articles";
const SETTINGS_FILE: &str = "admin-table.toml";

fn main() {
    let webview_data_dir = match default_webview_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Admin table"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "admin-table")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn load_settings() -> Result<Settings> {
    match std::fs::read_to_string(SETTINGS_FILE) {
        Ok(text) => Settings::from_toml_str(&text)
            .with_context(|| format!("failed to read {SETTINGS_FILE}")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err).with_context(|| format!("failed to open {SETTINGS_FILE}")),
    }
}

fn demo_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("article", "Article", ColumnKind::String, "article"),
        ColumnConfig::new("name", "Name", ColumnKind::String, "name"),
        ColumnConfig::new("price", "Price", ColumnKind::Number, "price"),
        ColumnConfig::new("created", "Created", ColumnKind::Date, "createdAt"),
        ColumnConfig::new("status", "Status", ColumnKind::Enumerated, "status").with_options(vec![
            LookupCandidate::new("active", "Active"),
            LookupCandidate::new("archived", "Archived"),
        ]),
    ]
}

fn demo_page(request: PageRequest) -> Vec<TableRow> {
    let first = request.page * request.page_size;
    (first..first + request.page_size)
        .map(|idx| {
            TableRow::new(idx.to_string())
                .with_cell("article", format!("A-{idx:05}"))
                .with_cell("name", format!("Item {idx}"))
                .with_cell("price", format!("{:.2}", f64::from(idx) * 1.5))
                .with_cell("created", format!("2024-01-{:02}", idx % 28 + 1))
                .with_cell("status", if idx % 3 == 0 { "archived" } else { "active" })
        })
        .collect()
}

#[component]
fn App() -> Element {
    rsx! {
        DismissRoot { ArticlesPage {} }
    }
}

#[component]
fn ArticlesPage() -> Element {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            return rsx! {
                div { p { "Cannot load settings: {err}" } }
            };
        }
    };
    let db_path = match default_db_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div { p { "Cannot resolve the database path: {err}" } }
            };
        }
    };

    let repo = use_hook(|| -> Rc<dyn ColumnVisibilityRepository> { Rc::new(SqliteRepo::new(db_path)) });
    let visibility = use_hook({
        let repo = repo.clone();
        move || {
            if let Err(err) = repo.init() {
                tracing::warn!(error = %err, "failed to initialize column settings store");
            }
            restore_visibility(repo.as_ref(), TABLE_KEY, &IndexMap::new())
        }
    });
    use_context_provider({
        let repo = repo.clone();
        move || VisibilityStore::new(repo, TABLE_KEY)
    });
    let lookup = settings.lookup.clone();
    use_context_provider(move || {
        let client = Rc::new(HttpLookupClient::from_settings(&lookup));
        LookupHandle(Rc::new(LookupService::new(client)))
    });

    let state = TableState::new(demo_columns(), visibility, settings);
    let mut rows = use_signal(Vec::<TableRow>::new);
    use_effect(move || {
        if let Some(request) = state.request_next_page() {
            rows.write().extend(demo_page(request));
            state.page_loaded();
        }
    });

    rsx! {
        div { style: "height: 100vh; padding: 12px; box-sizing: border-box; font-family: sans-serif;",
            DataTable {
                state,
                rows: rows(),
                on_query_changed: move |query: QueryDescriptor| {
                    tracing::info!(filters = query.filters.len(), sorts = query.sorts.len(), "query changed");
                    rows.write().clear();
                    state.reset_pages();
                    if let Some(request) = state.request_next_page() {
                        rows.write().extend(demo_page(request));
                        state.page_loaded();
                    }
                },
                on_request_page: move |request: PageRequest| {
                    rows.write().extend(demo_page(request));
                    state.page_loaded();
                },
                on_edit_requested: move |row_id: String| tracing::info!(%row_id, "edit requested"),
                on_delete_requested: move |row_id: String| {
                    rows.write().retain(|row| row.id != row_id);
                },
            }
        }
    }
}
