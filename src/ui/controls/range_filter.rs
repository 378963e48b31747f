use std::fmt::Debug;

use chrono::NaiveDate;

use crate::domain::entities::filter::{
    DateOp, FilterDescriptor, FilterFamily, FilterType, FilterValue, NumericOp,
};
use crate::ui::controls::chrome::{ControlChrome, FilterControl};
use crate::ui::controls::search_box::SearchBox;

pub const NUMERIC_EXPANDED_WIDTH_PX: u32 = 150;

/// What distinguishes the numeric and the date comparison controls.
pub trait RangeKind {
    type Op: Copy + Default + PartialEq + Debug + 'static;
    type Value: Clone + PartialEq + Debug + 'static;

    const FAMILY: FilterFamily;
    /// `type` attribute of the HTML inputs drafting a value.
    const INPUT_TYPE: &'static str;

    fn ops() -> &'static [Self::Op];
    fn op_label(op: Self::Op) -> &'static str;
    fn filter_type(op: Self::Op) -> FilterType;
    fn is_range(op: Self::Op) -> bool;
    fn parse(input: &str) -> Option<Self::Value>;
    fn to_filter_value(value: &Self::Value) -> FilterValue;
    fn display(value: &Self::Value) -> String;
    fn default_search_box() -> SearchBox {
        SearchBox::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericKind;

impl RangeKind for NumericKind {
    type Op = NumericOp;
    type Value = f64;

    const FAMILY: FilterFamily = FilterFamily::Numeric;
    const INPUT_TYPE: &'static str = "number";

    fn ops() -> &'static [NumericOp] {
        NumericOp::all()
    }

    fn op_label(op: NumericOp) -> &'static str {
        op.label()
    }

    fn filter_type(op: NumericOp) -> FilterType {
        FilterType::Numeric(op)
    }

    fn is_range(op: NumericOp) -> bool {
        op.is_range()
    }

    fn parse(input: &str) -> Option<f64> {
        input
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn to_filter_value(value: &f64) -> FilterValue {
        FilterValue::Number(*value)
    }

    fn display(value: &f64) -> String {
        value.to_string()
    }

    fn default_search_box() -> SearchBox {
        SearchBox::new(
            NUMERIC_EXPANDED_WIDTH_PX,
            crate::ui::controls::search_box::DEFAULT_COLLAPSE_DELAY,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateKind;

impl RangeKind for DateKind {
    type Op = DateOp;
    type Value = NaiveDate;

    const FAMILY: FilterFamily = FilterFamily::Date;
    const INPUT_TYPE: &'static str = "date";

    fn ops() -> &'static [DateOp] {
        DateOp::all()
    }

    fn op_label(op: DateOp) -> &'static str {
        op.label()
    }

    fn filter_type(op: DateOp) -> FilterType {
        FilterType::Date(op)
    }

    fn is_range(op: DateOp) -> bool {
        op.is_range()
    }

    fn parse(input: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
    }

    fn to_filter_value(value: &NaiveDate) -> FilterValue {
        FilterValue::Date(*value)
    }

    fn display(value: &NaiveDate) -> String {
        value.format("%Y-%m-%d").to_string()
    }
}

pub type NumericFilter = RangeFilter<NumericKind>;
pub type DateFilter = RangeFilter<DateKind>;

enum Entry<T> {
    Blank,
    Value(T),
    Invalid,
}

/// Comparison filter with a closed mode menu (equal / less / greater /
/// between for numbers, equal / before / after / between for dates).
///
/// Picking a mode resets the drafts and commits nothing. Entries commit once
/// they are complete: a single value for the simple modes, both ends for a
/// range. A blank entry commits a clear; an unparsable one is dropped and
/// the committed state stays as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter<K: RangeKind> {
    field: String,
    mode: Option<K::Op>,
    value: Option<K::Value>,
    start: Option<K::Value>,
    end: Option<K::Value>,
    inputs_shown: bool,
    chrome: ControlChrome,
}

impl<K: RangeKind> RangeFilter<K> {
    pub fn new(field: impl Into<String>) -> Self {
        Self::with_search_box(field, K::default_search_box())
    }

    pub fn with_search_box(field: impl Into<String>, search: SearchBox) -> Self {
        Self {
            field: field.into(),
            mode: None,
            value: None,
            start: None,
            end: None,
            inputs_shown: false,
            chrome: ControlChrome::new(search),
        }
    }

    pub fn mode(&self) -> Option<K::Op> {
        self.mode
    }

    fn current_op(&self) -> K::Op {
        self.mode.unwrap_or_default()
    }

    pub fn inputs_shown(&self) -> bool {
        self.inputs_shown
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }

    pub fn range(&self) -> (Option<&K::Value>, Option<&K::Value>) {
        (self.start.as_ref(), self.end.as_ref())
    }

    fn clear_drafts(&mut self) {
        self.value = None;
        self.start = None;
        self.end = None;
    }

    pub fn select_mode(&mut self, op: K::Op) {
        self.mode = Some(op);
        self.clear_drafts();
        self.inputs_shown = true;
    }

    fn parse_entry(&self, input: &str) -> Entry<K::Value> {
        if input.trim().is_empty() {
            return Entry::Blank;
        }
        match K::parse(input) {
            Some(value) => Entry::Value(value),
            None => {
                tracing::debug!(field = %self.field, input, "rejected filter entry");
                Entry::Invalid
            }
        }
    }

    fn cleared(&self) -> FilterDescriptor {
        FilterDescriptor::cleared(self.field.clone(), K::filter_type(self.current_op()))
    }

    /// Entry for the equal / less / greater (before / after) modes.
    pub fn set_value(&mut self, input: &str) -> Option<FilterDescriptor> {
        if K::is_range(self.current_op()) {
            return None;
        }
        match self.parse_entry(input) {
            Entry::Invalid => None,
            Entry::Blank => {
                self.value = None;
                Some(self.cleared())
            }
            Entry::Value(value) => {
                let descriptor = FilterDescriptor::new(
                    self.field.clone(),
                    K::filter_type(self.current_op()),
                    [K::to_filter_value(&value)],
                );
                self.value = Some(value);
                Some(descriptor)
            }
        }
    }

    pub fn set_range_start(&mut self, input: &str) -> Option<FilterDescriptor> {
        self.set_range_end_point(input, true)
    }

    pub fn set_range_end(&mut self, input: &str) -> Option<FilterDescriptor> {
        self.set_range_end_point(input, false)
    }

    fn set_range_end_point(&mut self, input: &str, is_start: bool) -> Option<FilterDescriptor> {
        if !K::is_range(self.current_op()) {
            return None;
        }
        let parsed = match self.parse_entry(input) {
            Entry::Invalid => return None,
            Entry::Blank => None,
            Entry::Value(value) => Some(value),
        };
        let was_complete = self.start.is_some() && self.end.is_some();
        if is_start {
            self.start = parsed;
        } else {
            self.end = parsed;
        }

        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Some(FilterDescriptor::new(
                self.field.clone(),
                K::filter_type(self.current_op()),
                [K::to_filter_value(start), K::to_filter_value(end)],
            )),
            // An incomplete range is no constraint; only announce it when a
            // complete one was active before.
            _ if was_complete => Some(self.cleared()),
            _ => None,
        }
    }

    /// Text shown in the collapsed header, e.g. `10 - 20`.
    pub fn display(&self) -> String {
        if K::is_range(self.current_op()) {
            match (&self.start, &self.end) {
                (Some(start), Some(end)) => format!("{} - {}", K::display(start), K::display(end)),
                _ => String::new(),
            }
        } else {
            self.value.as_ref().map(K::display).unwrap_or_default()
        }
    }
}

impl<K: RangeKind> FilterControl for RangeFilter<K> {
    fn field(&self) -> &str {
        &self.field
    }

    fn family(&self) -> FilterFamily {
        K::FAMILY
    }

    fn chrome(&self) -> &ControlChrome {
        &self.chrome
    }

    fn chrome_mut(&mut self) -> &mut ControlChrome {
        &mut self.chrome
    }

    fn reset(&mut self) -> FilterDescriptor {
        let descriptor = self.cleared();
        self.mode = None;
        self.clear_drafts();
        self.inputs_shown = false;
        descriptor
    }
}
