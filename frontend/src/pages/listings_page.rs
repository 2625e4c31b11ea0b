//! The single listings page: search bar, filter panel and results.

use client::{ClientConfig, api::HttpListingsApi, state::ListingsController};
use dioxus::{logger::tracing::info, prelude::*};

use crate::{
    components::{
        error_boundary::ComponentErrorBoundary,
        filter_panel::FilterPanel,
        keyword_search_bar::KeywordSearchBar,
        result_list::{ResultList, ResultListControls},
    },
    data_definitions::url_query::restore_from_location,
    state::driver::ListingsContext,
};

#[component]
pub fn ListingsPage() -> Element {
    let (controller, api, armed) = use_hook(|| {
        let config = ClientConfig::from_env();
        let (filters, page) = restore_from_location();
        info!("Starting on page {} against {}", page, config.base_url);
        let mut controller = ListingsController::with_initial(&config, filters, page);
        controller.start();
        (Signal::new(controller), Signal::new(HttpListingsApi::new(config)), Signal::new(None))
    });
    let view = use_memo(move || controller.read().view());
    let context = use_context_provider(move || ListingsContext::new(controller, api, armed, view));
    use_effect(move || context.drive());

    rsx! {
        div {
            id: "x-listings-page-root",
            style: "
                height: 100vh;
                width: 100%;
                display: flex;
                flex-direction: column;
                font-family: Roboto, sans-serif;
            ",
            div {
                id: "x-listings-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F8FCFF;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    height: 76px;
                    width: 100%;
                ",
                KeywordSearchBar {}
            }
            div {
                id: "x-listings-bottom-space",
                style: "
                    width: 100%;
                    display: flex;
                    flex-direction: row;
                    flex-grow: 1;
                    min-height: 0;
                ",
                div {
                    id: "x-listings-filter-panel",
                    style: "
                        height: 100%;
                        width: 340px;
                        flex-shrink: 0;
                        overflow-y: auto;
                        background-color: #F8FCFF;
                        border-right: 1px solid rgb(164, 164, 164);
                    ",
                    ComponentErrorBoundary { FilterPanel {} }
                }
                div {
                    id: "x-listings-results",
                    style: "
                        height: 100%;
                        flex-grow: 1;
                        display: flex;
                        flex-direction: column;
                        background-color: #ECEEF2;
                        min-width: 0;
                    ",
                    ResultListControls {}
                    ComponentErrorBoundary { ResultList {} }
                }
            }
        }
    }
}
