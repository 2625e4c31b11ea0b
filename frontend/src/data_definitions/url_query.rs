//! Filter state in the address bar.
//!
//! The query string uses the same parameters as the search endpoint, so a
//! copied URL reproduces the search.

use common::{filter_state::FilterState, pagination::Page, query_params::QueryParams};
use dioxus::logger::tracing::warn;

/// Filters and page from `window.location.search`. An unreadable location
/// gives the empty state on the first page.
pub fn restore_from_location() -> (FilterState, Page) {
    match browser::read_location_query() {
        Ok(params) => params.to_filters(),
        Err(e) => {
            warn!("Could not read the address bar: {e:#}");
            (FilterState::new(), Page::FIRST)
        }
    }
}

/// The address bar query as it is now, for links that retry the same search.
pub fn location_query() -> QueryParams {
    browser::read_location_query().unwrap_or_default()
}

/// Replaces the current history entry so the address bar shows `params`.
pub fn sync_location(params: &QueryParams) {
    if let Err(e) = browser::replace_location_query(params) {
        warn!("Could not update the address bar: {e:#}");
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use anyhow::Context;
    use common::query_params::QueryParams;
    use wasm_bindgen::JsValue;

    fn js_error(err: JsValue) -> anyhow::Error {
        anyhow::anyhow!("{err:?}")
    }

    pub fn read_location_query() -> anyhow::Result<QueryParams> {
        let window = web_sys::window().context("no window")?;
        let search = window.location().search().map_err(js_error).context("reading location.search")?;
        Ok(QueryParams::parse(&search))
    }

    pub fn replace_location_query(params: &QueryParams) -> anyhow::Result<()> {
        let window = web_sys::window().context("no window")?;
        let location = window.location();
        let next = format!("?{}", params.to_query_string());
        if location.search().map_err(js_error)? == next {
            return Ok(());
        }
        let path = location.pathname().map_err(js_error).context("reading location.pathname")?;
        window
            .history()
            .map_err(js_error)?
            .replace_state_with_url(&JsValue::NULL, "", Some(&format!("{path}{next}")))
            .map_err(js_error)
            .context("history.replaceState")?;
        Ok(())
    }
}

// desktop builds have no address bar
#[cfg(not(target_arch = "wasm32"))]
mod browser {
    use common::query_params::QueryParams;

    pub fn read_location_query() -> anyhow::Result<QueryParams> {
        Ok(QueryParams::default())
    }

    pub fn replace_location_query(_params: &QueryParams) -> anyhow::Result<()> {
        Ok(())
    }
}
