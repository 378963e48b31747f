use indexmap::IndexMap;

use crate::domain::entities::column::ColumnConfig;

/// Which of the configured columns are shown.
///
/// Visibility is seeded once from the host's map (missing keys default to
/// visible) and afterwards only changes through explicit show/hide calls.
/// Filters and sorts are never touched from here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnState {
    options: Vec<ColumnConfig>,
    visibility: IndexMap<String, bool>,
    selected: Vec<String>,
    pinned: Option<String>,
    menu_open: bool,
}

impl ColumnState {
    pub fn new(options: Vec<ColumnConfig>, initial: &IndexMap<String, bool>) -> Self {
        let mut visibility: IndexMap<String, bool> = options
            .iter()
            .map(|column| {
                let visible = initial.get(&column.key).copied().unwrap_or(true);
                (column.key.clone(), visible)
            })
            .collect();
        for (key, visible) in initial {
            visibility.entry(key.clone()).or_insert(*visible);
        }

        let mut state = Self {
            options,
            visibility,
            selected: Vec::new(),
            pinned: None,
            menu_open: false,
        };
        state.recompute();
        state
    }

    /// Marks a column that the renderer draws on its own (e.g. the leading
    /// article cell) so it is left out of [`ColumnState::body_columns`].
    pub fn with_pinned(mut self, key: impl Into<String>) -> Self {
        self.pinned = Some(key.into());
        self
    }

    fn recompute(&mut self) {
        self.selected = self
            .visibility
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(key, _)| key.clone())
            .collect();
    }

    pub fn toggle_visible(&mut self, key: &str, value: bool) {
        match self.visibility.get_mut(key) {
            Some(visible) => *visible = value,
            None => {
                self.visibility.insert(key.to_string(), value);
            }
        }
        self.recompute();
        tracing::debug!(column = key, visible = value, "column visibility changed");
    }

    pub fn remove_column(&mut self, key: &str) {
        self.toggle_visible(key, false);
    }

    pub fn show_all(&mut self) {
        self.visibility.values_mut().for_each(|visible| *visible = true);
        self.recompute();
    }

    pub fn hide_all(&mut self) {
        self.visibility.values_mut().for_each(|visible| *visible = false);
        self.recompute();
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visibility.get(key).copied().unwrap_or(false)
    }

    /// Visible keys in configuration order.
    pub fn selected_columns(&self) -> &[String] {
        &self.selected
    }

    pub fn body_columns(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter(|key| Some(key.as_str()) != self.pinned.as_deref())
            .cloned()
            .collect()
    }

    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn visibility(&self) -> &IndexMap<String, bool> {
        &self.visibility
    }

    pub fn options(&self) -> &[ColumnConfig] {
        &self.options
    }

    pub fn column(&self, key: &str) -> Option<&ColumnConfig> {
        self.options.iter().find(|column| column.key == key)
    }

    pub fn column_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.column(key)
            .map(|column| column.label.as_str())
            .unwrap_or(key)
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Returns `true` if the menu was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }
}
