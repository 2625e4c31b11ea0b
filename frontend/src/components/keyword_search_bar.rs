use common::filter_state::{FilterKey, ScalarField};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdSearch, md_maps_icons::MdDirectionsCar}};

use crate::state::driver::ListingsContext;

#[component]
pub fn KeywordSearchBar() -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let keyword = use_memo(move || view.read().draft.scalar(ScalarField::Keyword).to_string());
    let has_pending_edit = use_memo(move || {
        let view = view.read();
        view.draft != *view.filters
    });
    let search_button_color = use_memo(move || if has_pending_edit() { "blue" } else { "#6B7280" });

    let keyword_oninput = move |event: Event<FormData>| {
        context.edit(FilterKey::Scalar(ScalarField::Keyword), event.value().into());
    };
    let keyword_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            context.submit();
        }
    };
    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 10px; margin-left: 24px; width: 300px; flex-shrink: 0;",
            Icon { icon: MdDirectionsCar, style: "width: 32px; height: 32px; color: #1C212D;" }
            h1 {
                style: "font-size: 22px; font-weight: 400; color: #1C212D;",
                "Vehicle Listings"
            }
        }
        div {
            id: "x-keyword-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                width: 500px;
                margin-left: 16px;
                box-sizing: border-box;
            ",
            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                ",
                onclick: move |_| context.submit(),
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Search listings",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 20px;
                    font-weight: 400;
                    font-family: Roboto, sans-serif;
                ",
                value: "{keyword}",
                oninput: keyword_oninput,
                onkeydown: keyword_onkeydown,
            }
        }
    }
}
