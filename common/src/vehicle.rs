//! Vehicle listing records returned by the search endpoint.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleRecord {
    pub listing_title: Option<String>,
    pub year: Option<u32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub price: Option<ListingPrice>,
    pub miles: Option<u64>,
    pub new_or_used: Option<String>,
    pub location: Option<String>,
    pub vin: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub link: Option<String>,
    pub seller_type: Option<String>,
    pub title_type: Option<String>,
    pub time_created_utc: Option<String>,
    pub unix_timestamp: Option<i64>,
}

impl VehicleRecord {
    /// The listing title, or "year make model trim" when the backend sent none.
    pub fn title(&self) -> String {
        if let Some(title) = self.listing_title.as_ref().filter(|t| !t.is_empty()) {
            return title.clone();
        }
        let year = self.year.map(|y| y.to_string());
        [year.as_deref(), self.make.as_deref(), self.model.as_deref(), self.trim.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Stable key for list rendering.
    pub fn listing_key(&self) -> String {
        self.link
            .clone()
            .or_else(|| self.vin.clone())
            .unwrap_or_else(|| format!("{}-{}", self.title(), self.unix_timestamp.unwrap_or_default()))
    }
}

/// Prices arrive either as numbers or as strings with an optional `$`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingPrice {
    Amount(f64),
    Text(String),
}

impl ListingPrice {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Text(text) => text.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        }
    }
}

impl Display for ListingPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.amount(), self) {
            (Some(amount), _) => write!(f, "${:.0}", amount),
            (None, Self::Text(text)) => write!(f, "{}", text),
            (None, Self::Amount(amount)) => write!(f, "{}", amount),
        }
    }
}
