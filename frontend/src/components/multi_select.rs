//! Dropdown checklist for make, model and trim.

use common::filter_state::MultiField;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_navigation_icons::MdArrowDropDown, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use crate::state::driver::ListingsContext;

#[component]
pub fn MultiSelectFilter(field: MultiField, options: Vec<String>, loading: bool) -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let mut is_expanded = use_signal(|| false);
    let selected = use_memo(move || view.read().draft.selection(field).to_vec());
    let is_filtered = use_memo(move || !selected.read().is_empty());
    let border_color = use_memo(move || if is_filtered() { "rgba(0,0,255,0.9)" } else { "rgba(0,0,0,0.5)" });
    let summary = use_memo(move || {
        let selected = selected.read();
        match selected.len() {
            0 => format!("Any {}", field.label().to_lowercase()),
            1 => selected[0].clone(),
            n => format!("{} selected", n),
        }
    });

    // selections the current option list no longer offers stay visible so
    // they can be unchecked
    let mut entries: Vec<(String, bool)> = options.iter().map(|option| (option.clone(), true)).collect();
    for value in selected.read().iter() {
        if !options.contains(value) {
            entries.push((value.clone(), false));
        }
    }

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; position: relative;",
            label {
                style: "font-size: 14px; font-weight: 500; color: rgb(75, 87, 112);",
                "{field.label()}"
            }
            button {
                onclick: move |_| is_expanded.set(!is_expanded()),
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    border: 2px solid {border_color()};
                    border-radius: 8px;
                    background-color: white;
                    padding: 6px 8px;
                    font-size: 16px;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    overflow: hidden;
                ",
                "{summary}"
                Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px; color:rgba(0,0,0,0.9);" }
            }
            if is_expanded() {
                ul {
                    style: "
                        list-style: none;
                        margin: 0;
                        padding: 6px;
                        max-height: 260px;
                        overflow-y: auto;
                        background: white;
                        border: 1px solid rgba(0,0,0,0.5);
                        border-radius: 8px;
                        box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                    ",
                    if loading {
                        li { style: "color: rgba(28, 33, 45, 0.7); padding: 4px;", "Loading..." }
                    }
                    if entries.is_empty() && !loading {
                        li { style: "color: rgba(28, 33, 45, 0.7); padding: 4px;", "No options" }
                    }
                    for (value, offered) in entries {
                        li {
                            key: "{value}",
                            OptionCheckbox { field, value, offered }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn OptionCheckbox(field: MultiField, value: String, offered: bool) -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let checked_value = value.clone();
    let is_checked = use_memo(move || view.read().draft.selection(field).contains(&checked_value));
    let display = if offered { value.clone() } else { format!("Missing: {}", value) };
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                align-items: center;
            ",
            onclick: move |_| context.toggle(field, value.clone()),
            if is_checked() {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                style: "
                    font-size: 16px;
                    line-height: 22px;
                    color: rgb(0, 0, 0);
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    min-width: 0;
                ",
                "{display}"
            }
        }
    }
}
