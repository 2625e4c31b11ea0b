//! Filter fields and the immutable filter state snapshot.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::search_const::{
    DRIVE_TYPES, FUEL_TYPES, MILEAGE_DISPLAY_MAX, MILEAGE_DISPLAY_MIN, MULTI_VALUE_SEPARATOR,
    NEW_USED, PRICE_DISPLAY_MAX, PRICE_DISPLAY_MIN, SELLER_TYPES, TITLE_TYPES, TRANSMISSIONS,
    YEAR_DISPLAY_MIN,
};

/// Single-valued filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarField {
    Keyword,
    ListingTitle,
    Year,
    Miles,
    NewUsed,
    Location,
    Vin,
    BodyType,
    Fuel,
    Transmission,
    SellerType,
    TitleType,
    Drive,
}

impl ScalarField {
    pub const ALL: [ScalarField; 13] = [
        Self::Keyword,
        Self::ListingTitle,
        Self::Year,
        Self::Miles,
        Self::NewUsed,
        Self::Location,
        Self::Vin,
        Self::BodyType,
        Self::Fuel,
        Self::Transmission,
        Self::SellerType,
        Self::TitleType,
        Self::Drive,
    ];

    pub fn param_name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::ListingTitle => "listing_title",
            Self::Year => "year",
            Self::Miles => "miles",
            Self::NewUsed => "newUsed",
            Self::Location => "location",
            Self::Vin => "vin",
            Self::BodyType => "body_type",
            Self::Fuel => "fuel",
            Self::Transmission => "transmission",
            Self::SellerType => "sellerType",
            Self::TitleType => "titleType",
            Self::Drive => "drive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Keyword => "Keyword",
            Self::ListingTitle => "Listing Title",
            Self::Year => "Year",
            Self::Miles => "Miles",
            Self::NewUsed => "New or Used",
            Self::Location => "Location",
            Self::Vin => "VIN",
            Self::BodyType => "Body Type",
            Self::Fuel => "Fuel Type",
            Self::Transmission => "Transmission",
            Self::SellerType => "Seller Type",
            Self::TitleType => "Title Type",
            Self::Drive => "Drive",
        }
    }

    /// Values the backend accepts for categorical fields; `None` for free text.
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Self::SellerType => Some(&SELLER_TYPES),
            Self::NewUsed => Some(&NEW_USED),
            Self::Transmission => Some(&TRANSMISSIONS),
            Self::Fuel => Some(&FUEL_TYPES),
            Self::Drive => Some(&DRIVE_TYPES),
            Self::TitleType => Some(&TITLE_TYPES),
            _ => None,
        }
    }
}

/// Cascading multi-select fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MultiField {
    Make,
    Model,
    Trim,
}

impl MultiField {
    pub const ALL: [MultiField; 3] = [Self::Make, Self::Model, Self::Trim];

    pub fn param_name(self) -> &'static str {
        match self {
            Self::Make => "make",
            Self::Model => "model",
            Self::Trim => "trim",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Model => "Model",
            Self::Trim => "Trim",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RangeField {
    Year,
    Price,
    Mileage,
}

impl RangeField {
    pub const ALL: [RangeField; 3] = [Self::Year, Self::Price, Self::Mileage];

    pub fn param_name(self, bound: Bound) -> &'static str {
        match (self, bound) {
            (Self::Year, Bound::From) => "yearFrom",
            (Self::Year, Bound::To) => "yearTo",
            (Self::Price, Bound::From) => "priceFrom",
            (Self::Price, Bound::To) => "priceTo",
            (Self::Mileage, Bound::From) => "mileageFrom",
            (Self::Mileage, Bound::To) => "mileageTo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Price => "Price",
            Self::Mileage => "Mileage",
        }
    }

    /// Slider extent shown when a bound is unset. Never used for serialization.
    pub fn display_domain(self, current_year: u64) -> (u64, u64) {
        match self {
            Self::Year => (YEAR_DISPLAY_MIN, current_year.max(YEAR_DISPLAY_MIN)),
            Self::Price => (PRICE_DISPLAY_MIN, PRICE_DISPLAY_MAX),
            Self::Mileage => (MILEAGE_DISPLAY_MIN, MILEAGE_DISPLAY_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bound {
    From,
    To,
}

/// Addresses one query parameter worth of filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterKey {
    Scalar(ScalarField),
    Multi(MultiField),
    Range(RangeField, Bound),
}

impl FilterKey {
    /// Every filter parameter, in the order the serializer emits them.
    pub const CANONICAL_ORDER: [FilterKey; 22] = [
        Self::Scalar(ScalarField::Keyword),
        Self::Scalar(ScalarField::ListingTitle),
        Self::Scalar(ScalarField::Year),
        Self::Multi(MultiField::Make),
        Self::Multi(MultiField::Model),
        Self::Multi(MultiField::Trim),
        Self::Range(RangeField::Price, Bound::From),
        Self::Range(RangeField::Price, Bound::To),
        Self::Scalar(ScalarField::Miles),
        Self::Scalar(ScalarField::NewUsed),
        Self::Scalar(ScalarField::Location),
        Self::Scalar(ScalarField::Vin),
        Self::Scalar(ScalarField::BodyType),
        Self::Scalar(ScalarField::Fuel),
        Self::Scalar(ScalarField::Transmission),
        Self::Scalar(ScalarField::SellerType),
        Self::Scalar(ScalarField::TitleType),
        Self::Range(RangeField::Mileage, Bound::From),
        Self::Range(RangeField::Mileage, Bound::To),
        Self::Scalar(ScalarField::Drive),
        Self::Range(RangeField::Year, Bound::From),
        Self::Range(RangeField::Year, Bound::To),
    ];

    pub fn param_name(self) -> &'static str {
        match self {
            Self::Scalar(field) => field.param_name(),
            Self::Multi(field) => field.param_name(),
            Self::Range(field, bound) => field.param_name(bound),
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::CANONICAL_ORDER.into_iter().find(|key| key.param_name() == name)
    }
}

impl FromStr for FilterKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_param(s).ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param_name())
    }
}

/// A value handed to [`FilterState::with_field`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Both bounds of a range filter. `None` is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RangeBounds {
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl RangeBounds {
    pub fn new(from: Option<u64>, to: Option<u64>) -> Self {
        Self { from, to }
    }

    pub fn get(&self, bound: Bound) -> Option<u64> {
        match bound {
            Bound::From => self.from,
            Bound::To => self.to,
        }
    }

    pub fn with(self, bound: Bound, value: Option<u64>) -> Self {
        match bound {
            Bound::From => Self { from: value, ..self },
            Bound::To => Self { to: value, ..self },
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownField(String),
    ShapeMismatch { field: &'static str, expected: &'static str },
    InvalidNumber { field: &'static str, value: String },
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "Unknown filter field: {}", name),
            Self::ShapeMismatch { field, expected } => write!(f, "Filter field {} expects {}", field, expected),
            Self::InvalidNumber { field, value } => write!(f, "Filter field {} is not a number: {:?}", field, value),
        }
    }
}

impl std::error::Error for FilterError {}

/// Every active filter criterion.
///
/// Values are never mutated in place: each `with_*` call returns a new
/// snapshot and leaves `self` untouched. Multi-select fields are always
/// sequences; "no filter" is the empty sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    scalars: BTreeMap<ScalarField, String>,
    make: Vec<String>,
    model: Vec<String>,
    trim: Vec<String>,
    ranges: BTreeMap<RangeField, RangeBounds>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
            && self.make.is_empty()
            && self.model.is_empty()
            && self.trim.is_empty()
            && self.ranges.is_empty()
    }

    /// Current value of a scalar field, `""` when unset.
    pub fn scalar(&self, field: ScalarField) -> &str {
        self.scalars.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn selection(&self, field: MultiField) -> &[String] {
        match field {
            MultiField::Make => &self.make,
            MultiField::Model => &self.model,
            MultiField::Trim => &self.trim,
        }
    }

    pub fn range(&self, field: RangeField) -> RangeBounds {
        self.ranges.get(&field).copied().unwrap_or_default()
    }

    /// The serialized value of one parameter, `None` when it would be omitted.
    pub fn param_value(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Scalar(field) => {
                let value = self.scalar(field);
                (!value.is_empty()).then(|| value.to_string())
            }
            FilterKey::Multi(field) => {
                let selection = self.selection(field);
                let separator = MULTI_VALUE_SEPARATOR.to_string();
                (!selection.is_empty()).then(|| selection.join(separator.as_str()))
            }
            FilterKey::Range(field, bound) => self.range(field).get(bound).map(|v| v.to_string()),
        }
    }

    pub fn with_scalar(&self, field: ScalarField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        if value.is_empty() {
            next.scalars.remove(&field);
        } else {
            next.scalars.insert(field, value);
        }
        next
    }

    pub fn with_selection<I, S>(&self, field: MultiField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.clone();
        *next.selection_mut(field) = normalize_selection(values);
        next
    }

    /// Adds `value` to the selection, or removes it when already selected.
    pub fn with_toggled(&self, field: MultiField, value: &str) -> Self {
        let current = self.selection(field);
        if current.iter().any(|v| v == value) {
            self.with_selection(field, current.iter().filter(|v| v.as_str() != value))
        } else {
            self.with_selection(field, current.iter().map(String::as_str).chain(std::iter::once(value)))
        }
    }

    pub fn with_range(&self, field: RangeField, bounds: RangeBounds) -> Self {
        let mut next = self.clone();
        if bounds.is_unbounded() {
            next.ranges.remove(&field);
        } else {
            next.ranges.insert(field, bounds);
        }
        next
    }

    /// Generic setter keyed by parameter name semantics.
    ///
    /// Text on a multi-select field is the legacy scalar form and is split on
    /// `;`. Text on a range bound must parse as an unsigned integer; empty
    /// text clears the bound.
    pub fn with_field(&self, key: FilterKey, value: FieldValue) -> Result<Self, FilterError> {
        match (key, value) {
            (FilterKey::Scalar(field), FieldValue::Text(text)) => Ok(self.with_scalar(field, text)),
            (FilterKey::Multi(field), FieldValue::List(values)) => Ok(self.with_selection(field, values)),
            (FilterKey::Multi(field), FieldValue::Text(text)) => Ok(self.with_selection(field, [text])),
            (FilterKey::Range(field, bound), FieldValue::Text(text)) => {
                let text = text.trim();
                let value = if text.is_empty() {
                    None
                } else {
                    let parsed = text.parse::<u64>().map_err(|_| FilterError::InvalidNumber {
                        field: key.param_name(),
                        value: text.to_string(),
                    })?;
                    Some(parsed)
                };
                Ok(self.with_range(field, self.range(field).with(bound, value)))
            }
            (FilterKey::Scalar(_), FieldValue::List(_)) => Err(FilterError::ShapeMismatch {
                field: key.param_name(),
                expected: "a single value",
            }),
            (FilterKey::Range(..), FieldValue::List(_)) => Err(FilterError::ShapeMismatch {
                field: key.param_name(),
                expected: "a number",
            }),
        }
    }

    fn selection_mut(&mut self, field: MultiField) -> &mut Vec<String> {
        match field {
            MultiField::Make => &mut self.make,
            MultiField::Model => &mut self.model,
            MultiField::Trim => &mut self.trim,
        }
    }
}

/// Splits entries on the multi-value separator, drops empty entries and
/// repeated entries while keeping first-selection order.
pub fn normalize_selection<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        for part in value.as_ref().split(MULTI_VALUE_SEPARATOR) {
            if !part.is_empty() && !out.iter().any(|v| v == part) {
                out.push(part.to_string());
            }
        }
    }
    out
}
