//! Result list, its status line and the page controls.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowForward}};

use crate::{
    components::{error_boundary::ComponentErrorDisplay, vehicle_card::VehicleCard},
    state::driver::ListingsContext,
};

#[component]
pub fn ResultListControls() -> Element {
    rsx! {
        div {
            id: "x-results-title-row",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 6px;
                padding: 7px 16px;
                height: 56px;
                box-sizing: border-box;
                width: 100%;
                flex-shrink: 0;
            ",
            h1 {
                style: "font-size: 20px; font-weight: 300; color:rgb(75, 87, 112); border-bottom: 1px solid rgb(75, 87, 112);",
                ResultStatusString {}
            }
            div { style: "flex-grow: 1;" }
            PaginationControls {}
        }
    }
}

#[component]
fn ResultStatusString() -> Element {
    let view = use_context::<ListingsContext>().view;
    let view = view.read();
    if view.is_loading {
        return rsx! { "Searching..." };
    }
    match view.vehicles.len() {
        0 => rsx! { "No listings found" },
        1 => rsx! { "1 listing on this page" },
        n => rsx! { "{n} listings on this page" },
    }
}

/// Next is offered only while the last page had results; the controller
/// itself does not check.
#[component]
fn PaginationControls() -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let page = use_memo(move || view.read().page);
    let can_go_to_previous_page = use_memo(move || page().number() > 1);
    let can_go_to_next_page = use_memo(move || view.read().has_more_listings);

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                justify-content: center;
                gap: 16px;
            ",
            NavigationButton {
                icon: MdArrowBack,
                label: "Previous Page",
                disabled: !can_go_to_previous_page(),
                onclick: move |_| context.prev_page(),
            }
            div {
                style: "
                    font-size: 16px;
                    line-height: 21px;
                    font-weight: 400;
                    background-color: white;
                    border-radius: 2px;
                    padding: 4px 26px;
                ",
                "Page {page}"
            }
            NavigationButton {
                icon: MdArrowForward,
                label: "Next Page",
                disabled: !can_go_to_next_page(),
                onclick: move |_| context.next_page(),
            }
        }
    }
}

#[component]
pub fn NavigationButton<I: dioxus_free_icons::IconShape + Clone + PartialEq + 'static>(icon: I, label: String, disabled: ReadSignal<bool>, onclick: Callback<()>) -> Element {
    let btn_color = use_memo(move || if *disabled.read() { "rgba(0,0,0,0.3)" } else { "rgba(0,0,0,1)" });
    let btn_cursor = use_memo(move || if *disabled.read() { "not-allowed" } else { "pointer" });
    rsx! {
        button {
            disabled: *disabled.read(),
            title: "{label}",
            style: "
                width: 32px;
                height: 32px;
                background: white;
                border-radius: 8px;
                padding: 4px;
                box-shadow: 0 2px 4px 0 rgba(0, 0, 0, 0.16);
                cursor: {btn_cursor};
            ",
            onclick: move |_| {
                if !*disabled.read() {
                    onclick(());
                }
            },
            Icon { icon: icon, style: "width: 22px; height: 22px; color: {btn_color};" }
        }
    }
}

#[component]
pub fn ResultList() -> Element {
    let view = use_context::<ListingsContext>().view;
    let view = view.read();

    rsx! {
        div {
            id: "x-results-list",
            style: "flex-grow: 1; overflow-y: auto; min-height: 0;",
            if let Some(error) = view.error.as_ref() {
                ComponentErrorDisplay {
                    title: "Search failed".to_string(),
                    error_txt: error.to_string(),
                    if !view.vehicles.is_empty() {
                        p { style: "color: rgba(28, 33, 45, 0.7);", "Showing the previous results." }
                    }
                }
            }
            if view.vehicles.is_empty() && view.is_loading {
                LoadingIndicator {}
            }
            for (index, vehicle) in view.vehicles.iter().enumerate() {
                VehicleCard {
                    key: "{vehicle.listing_key()}-{index}",
                    vehicle: vehicle.clone(),
                    index_on_page: index,
                }
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            style: "color:black; font-size: 26px; border: 1px solid black; padding: 10px; border-radius: 5px; margin: 15px; width: fit-content;",
            "Loading..."
        }
    }
}
