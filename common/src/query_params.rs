//! Canonical query-parameter form of a filter state and page.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::filter_state::{FieldValue, FilterKey, FilterState};
use crate::pagination::Page;

pub const PAGE_PARAM: &str = "page";

/// Ordered `(name, value)` pairs as sent to the search endpoint.
///
/// Filter parameters follow [`FilterKey::CANONICAL_ORDER`]; `page` is
/// always present and always last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn from_filters(state: &FilterState, page: Page) -> Self {
        let mut pairs: Vec<(String, String)> = FilterKey::CANONICAL_ORDER
            .into_iter()
            .filter_map(|key| state.param_value(key).map(|value| (key.param_name().to_string(), value)))
            .collect();
        pairs.push((PAGE_PARAM.to_string(), page.to_string()));
        QueryParams(pairs)
    }

    /// Rebuilds a filter state and page. Unknown names and malformed numbers
    /// are skipped; a missing or invalid page is the first page.
    pub fn to_filters(&self) -> (FilterState, Page) {
        let mut state = FilterState::new();
        let mut page = Page::FIRST;
        for (name, value) in &self.0 {
            if name == PAGE_PARAM {
                page = Page::parse_param(value);
                continue;
            }
            let Some(key) = FilterKey::from_param(name) else { continue };
            if let Ok(next) = state.with_field(key, FieldValue::Text(value.clone())) {
                state = next;
            }
        }
        (state, page)
    }

    /// Parses `a=1&b=2`, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let name = decode_component(parts.next().unwrap_or(""));
                let value = decode_component(parts.next().unwrap_or(""));
                (name, value)
            })
            .collect();
        QueryParams(pairs)
    }

    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn page(&self) -> Page {
        self.get(PAGE_PARAM).map(Page::parse_param).unwrap_or_default()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

pub fn serialize(state: &FilterState, page: Page) -> QueryParams {
    QueryParams::from_filters(state, page)
}

pub fn deserialize(params: &QueryParams) -> (FilterState, Page) {
    params.to_filters()
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}
