use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::entities::column::ColumnKind;

pub const DEFAULT_DESKTOP_BREAKPOINT_PX: f64 = 1100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full table with header filters.
    Desktop,
    /// One card per row.
    Mobile,
}

impl LayoutMode {
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            LayoutMode::Desktop
        } else {
            LayoutMode::Mobile
        }
    }
}

/// `DD.MM.YYYY` for ISO dates and timestamps; anything unparsable is shown
/// as is.
pub fn format_short_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|value| value.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|value| value.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_cell_value(kind: ColumnKind, raw: &str) -> String {
    match kind {
        ColumnKind::Date if !raw.is_empty() => format_short_date(raw),
        _ => raw.to_string(),
    }
}

pub fn column_alignment(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Number => "right",
        _ => "left",
    }
}
