//! Left-hand panel with every filter field.

use common::filter_state::{FilterKey, MultiField, RangeField, ScalarField};
use dioxus::prelude::*;

use crate::{
    components::{multi_select::MultiSelectFilter, range_filter::RangeFilter},
    state::driver::ListingsContext,
};

/// Free-text fields, in form order. The keyword lives in the top bar.
const TEXT_FIELDS: [ScalarField; 6] = [
    ScalarField::ListingTitle,
    ScalarField::Year,
    ScalarField::Miles,
    ScalarField::Location,
    ScalarField::Vin,
    ScalarField::BodyType,
];

const SELECT_FIELDS: [ScalarField; 6] = [
    ScalarField::NewUsed,
    ScalarField::SellerType,
    ScalarField::Fuel,
    ScalarField::Transmission,
    ScalarField::Drive,
    ScalarField::TitleType,
];

#[component]
pub fn FilterPanel() -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let makes = use_memo(move || view.read().makes.clone());
    let models = use_memo(move || (view.read().models.clone(), view.read().models_loading));
    let trims = use_memo(move || (view.read().trims.clone(), view.read().trims_loading));

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 14px; padding: 16px;",

            MultiSelectFilter { field: MultiField::Make, options: makes(), loading: false }
            MultiSelectFilter { field: MultiField::Model, options: models().0, loading: models().1 }
            MultiSelectFilter { field: MultiField::Trim, options: trims().0, loading: trims().1 }

            for field in RangeField::ALL {
                RangeFilter { key: "{field:?}", field }
            }
            for field in SELECT_FIELDS {
                SelectFilter { key: "{field:?}", field }
            }
            for field in TEXT_FIELDS {
                TextFilter { key: "{field:?}", field }
            }

            button {
                style: "
                    cursor: pointer;
                    font-size: 18px;
                    color: white;
                    background-color: #1C212D;
                    border: none;
                    border-radius: 8px;
                    padding: 10px;
                ",
                onclick: move |_| context.submit(),
                "Apply Filters"
            }
        }
    }
}

#[component]
fn FieldLabel(text: String) -> Element {
    rsx! {
        label {
            style: "font-size: 14px; font-weight: 500; color: rgb(75, 87, 112);",
            "{text}"
        }
    }
}

#[component]
fn TextFilter(field: ScalarField) -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let value = use_memo(move || view.read().draft.scalar(field).to_string());
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            FieldLabel { text: field.label().to_string() }
            input {
                r#type: "text",
                style: "font-size: 16px; padding: 6px; border: 1px solid rgba(0,0,0,0.3); border-radius: 6px;",
                value: "{value}",
                oninput: move |event: Event<FormData>| {
                    context.edit(FilterKey::Scalar(field), event.value().into());
                },
            }
        }
    }
}

/// A categorical field. The empty choice clears the filter.
#[component]
fn SelectFilter(field: ScalarField) -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let value = use_memo(move || view.read().draft.scalar(field).to_string());
    let choices = field.choices().unwrap_or_default();
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            FieldLabel { text: field.label().to_string() }
            select {
                style: "font-size: 16px; padding: 6px; border: 1px solid rgba(0,0,0,0.3); border-radius: 6px;",
                value: "{value}",
                onchange: move |event: Event<FormData>| {
                    context.edit(FilterKey::Scalar(field), event.value().into());
                },
                option { value: "", selected: value().is_empty(), "Any" }
                for choice in choices.iter().copied() {
                    option { key: "{choice}", value: "{choice}", selected: value() == choice, "{choice}" }
                }
            }
        }
    }
}
