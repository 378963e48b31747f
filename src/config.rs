use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::ui::controls::range_filter::NUMERIC_EXPANDED_WIDTH_PX;
use crate::ui::controls::search_box::{SearchBox, DEFAULT_EXPANDED_WIDTH_PX};
use crate::ui::format::DEFAULT_DESKTOP_BREAKPOINT_PX;

pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const DEFAULT_PINNED_COLUMN: &str = "article";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Knobs of the data table, usually read from the host's TOML config.
///
/// ```toml
/// page_size = 50
/// desktop_breakpoint_px = 1100
///
/// [lookup]
/// base_url = "https://api.example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: u32,
    pub desktop_breakpoint_px: f64,
    pub bottom_threshold_px: f64,
    pub collapse_delay_ms: u64,
    pub search_width_px: u32,
    pub numeric_search_width_px: u32,
    pub pinned_column: Option<String>,
    pub lookup: LookupSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            desktop_breakpoint_px: DEFAULT_DESKTOP_BREAKPOINT_PX,
            bottom_threshold_px: 0.0,
            collapse_delay_ms: 200,
            search_width_px: DEFAULT_EXPANDED_WIDTH_PX,
            numeric_search_width_px: NUMERIC_EXPANDED_WIDTH_PX,
            pinned_column: Some(DEFAULT_PINNED_COLUMN.to_string()),
            lookup: LookupSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub base_url: String,
    pub token: Option<String>,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.page_size == 0 {
            return Err(SettingsError::Invalid("page_size must be positive".to_string()));
        }
        if self.bottom_threshold_px < 0.0 {
            return Err(SettingsError::Invalid(
                "bottom_threshold_px must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn collapse_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_delay_ms)
    }

    pub fn search_box(&self) -> SearchBox {
        SearchBox::new(self.search_width_px, self.collapse_delay())
    }

    pub fn numeric_search_box(&self) -> SearchBox {
        SearchBox::new(self.numeric_search_width_px, self.collapse_delay())
    }
}

/// Where the column visibility database lives by default.
pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "admin-table")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("table_settings.sqlite"))
}
