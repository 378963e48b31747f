use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mutually exclusive groups of filter types. At most one filter per
/// `(field, family)` is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFamily {
    Text,
    Numeric,
    Date,
    Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumericOp {
    #[default]
    Equal,
    LessThan,
    GreaterThan,
    Between,
}

impl NumericOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::LessThan => "Less than",
            Self::GreaterThan => "Greater than",
            Self::Between => "Between",
        }
    }

    pub fn all() -> &'static [NumericOp] {
        &[Self::Equal, Self::LessThan, Self::GreaterThan, Self::Between]
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Between)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateOp {
    #[default]
    Equal,
    Before,
    After,
    Between,
}

impl DateOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::Before => "Before",
            Self::After => "After",
            Self::Between => "Between dates",
        }
    }

    pub fn all() -> &'static [DateOp] {
        &[Self::Equal, Self::Before, Self::After, Self::Between]
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Between)
    }
}

/// Comparison applied by a filter.
///
/// On the wire this is the integer code the backend expects:
///
/// | type                 | code    |
/// |----------------------|---------|
/// | `Text`               | 0       |
/// | `Identifier`         | 1       |
/// | `Numeric(..)`        | 2 ..= 5 |
/// | `Date(..)`           | 6 ..= 9 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FilterType {
    Text,
    Identifier,
    Numeric(NumericOp),
    Date(DateOp),
}

impl FilterType {
    pub fn family(&self) -> FilterFamily {
        match self {
            Self::Text => FilterFamily::Text,
            Self::Identifier => FilterFamily::Identifier,
            Self::Numeric(_) => FilterFamily::Numeric,
            Self::Date(_) => FilterFamily::Date,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Text => 0,
            Self::Identifier => 1,
            Self::Numeric(NumericOp::Equal) => 2,
            Self::Numeric(NumericOp::LessThan) => 3,
            Self::Numeric(NumericOp::GreaterThan) => 4,
            Self::Numeric(NumericOp::Between) => 5,
            Self::Date(DateOp::Equal) => 6,
            Self::Date(DateOp::Before) => 7,
            Self::Date(DateOp::After) => 8,
            Self::Date(DateOp::Between) => 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter type code: {0}")]
pub struct UnknownFilterCode(pub u8);

impl TryFrom<u8> for FilterType {
    type Error = UnknownFilterCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        let filter_type = match code {
            0 => Self::Text,
            1 => Self::Identifier,
            2 => Self::Numeric(NumericOp::Equal),
            3 => Self::Numeric(NumericOp::LessThan),
            4 => Self::Numeric(NumericOp::GreaterThan),
            5 => Self::Numeric(NumericOp::Between),
            6 => Self::Date(DateOp::Equal),
            7 => Self::Date(DateOp::Before),
            8 => Self::Date(DateOp::After),
            9 => Self::Date(DateOp::Between),
            other => return Err(UnknownFilterCode(other)),
        };
        Ok(filter_type)
    }
}

impl From<FilterType> for u8 {
    fn from(value: FilterType) -> Self {
        value.code()
    }
}

/// A single filter operand. Serialized untagged so the backend sees plain
/// JSON strings and numbers.
///
/// Plain JSON cannot tell a date from text, so values are only decoded as
/// part of a [`FilterDescriptor`], where the filter type picks the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterValueError {
    #[error("filter on {field} expects a number, got {value}")]
    NotANumber { field: String, value: String },
    #[error("filter on {field} expects a YYYY-MM-DD date, got {value}")]
    NotADate { field: String, value: String },
    #[error("filter on {field} expects a string, got {value}")]
    NotAString { field: String, value: String },
}

impl FilterValue {
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Reads one wire operand of a filter in `family`. An empty string is
    /// kept as blank text in every family since it means "clear".
    pub fn from_wire(
        field: &str,
        family: FilterFamily,
        value: serde_json::Value,
    ) -> Result<Self, FilterValueError> {
        use serde_json::Value;

        let mismatch = |value: &Value| (field.to_string(), value.to_string());
        match (family, value) {
            (_, Value::String(text)) if text.is_empty() => Ok(Self::Text(text)),
            (FilterFamily::Text | FilterFamily::Identifier, Value::String(text)) => Ok(Self::Text(text)),
            (FilterFamily::Text | FilterFamily::Identifier, Value::Number(number)) => {
                Ok(Self::Text(number.to_string()))
            }
            (FilterFamily::Numeric, Value::Number(number)) => match number.as_f64() {
                Some(number) => Ok(Self::Number(number)),
                None => {
                    let (field, value) = mismatch(&Value::Number(number));
                    Err(FilterValueError::NotANumber { field, value })
                }
            },
            (FilterFamily::Numeric, Value::String(text)) => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => Ok(Self::Number(number)),
                _ => {
                    let (field, value) = mismatch(&Value::String(text));
                    Err(FilterValueError::NotANumber { field, value })
                }
            },
            (FilterFamily::Date, Value::String(text)) => {
                match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
                    Ok(date) => Ok(Self::Date(date)),
                    Err(_) => {
                        let (field, value) = mismatch(&Value::String(text));
                        Err(FilterValueError::NotADate { field, value })
                    }
                }
            }
            (FilterFamily::Numeric, other) => {
                let (field, value) = mismatch(&other);
                Err(FilterValueError::NotANumber { field, value })
            }
            (FilterFamily::Date, other) => {
                let (field, value) = mismatch(&other);
                Err(FilterValueError::NotADate { field, value })
            }
            (FilterFamily::Text | FilterFamily::Identifier, other) => {
                let (field, value) = mismatch(&other);
                Err(FilterValueError::NotAString { field, value })
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireFilter")]
pub struct FilterDescriptor {
    pub field: String,
    pub values: Vec<FilterValue>,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
}

impl FilterDescriptor {
    pub fn new(
        field: impl Into<String>,
        filter_type: FilterType,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            values: values.into_iter().collect(),
            filter_type,
        }
    }

    /// An explicit "no constraint" event for `field` within the family of
    /// `filter_type`.
    pub fn cleared(field: impl Into<String>, filter_type: FilterType) -> Self {
        Self::new(field, filter_type, Vec::new())
    }

    pub fn family(&self) -> FilterFamily {
        self.filter_type.family()
    }

    /// Empty means absent: no values, or a leading empty string.
    pub fn is_empty(&self) -> bool {
        self.values.first().map_or(true, FilterValue::is_blank)
    }

    pub fn same_slot(&self, field: &str, family: FilterFamily) -> bool {
        self.field == field && self.family() == family
    }
}

#[derive(Deserialize)]
struct WireFilter {
    field: String,
    #[serde(default)]
    values: Vec<serde_json::Value>,
    #[serde(rename = "type")]
    filter_type: FilterType,
}

impl TryFrom<WireFilter> for FilterDescriptor {
    type Error = FilterValueError;

    fn try_from(wire: WireFilter) -> Result<Self, Self::Error> {
        let family = wire.filter_type.family();
        let values = wire
            .values
            .into_iter()
            .map(|value| FilterValue::from_wire(&wire.field, family, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            field: wire.field,
            values,
            filter_type: wire.filter_type,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort type code: {0}")]
pub struct UnknownSortCode(pub u8);

impl TryFrom<u8> for SortDirection {
    type Error = UnknownSortCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Ascending),
            1 => Ok(Self::Descending),
            other => Err(UnknownSortCode(other)),
        }
    }
}

impl From<SortDirection> for u8 {
    fn from(value: SortDirection) -> Self {
        match value {
            SortDirection::Ascending => 0,
            SortDirection::Descending => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    #[serde(rename = "sortType")]
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Combined filters and sorts handed to the data-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub filters: Vec<FilterDescriptor>,
    pub sorts: Vec<SortDescriptor>,
}
