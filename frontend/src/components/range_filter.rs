//! Year, price and mileage ranges: a slider per bound plus typed inputs.

use common::filter_state::{Bound, FilterKey, RangeField};
use dioxus::prelude::*;

use crate::{data_definitions::clock::current_year, state::driver::ListingsContext};

#[component]
pub fn RangeFilter(field: RangeField) -> Element {
    let context = use_context::<ListingsContext>();
    let view = context.view;
    let (min, max) = use_hook(|| field.display_domain(current_year()));
    let bounds = use_memo(move || view.read().draft.range(field));

    // a slider pushed to the end of the domain means no bound on that side
    let on_slide = move |bound: Bound, raw: String| {
        let Ok(value) = raw.parse::<u64>() else { return };
        let value = match bound {
            Bound::From if value <= min => None,
            Bound::To if value >= max => None,
            _ => Some(value),
        };
        context.drag_range(field, bounds().with(bound, value));
    };

    let rows = [(Bound::From, min, "Min"), (Bound::To, max, "Max")].map(|(bound, edge, placeholder)| {
        let value = bounds().get(bound);
        (bound, value.unwrap_or(edge), value.map(|v| v.to_string()).unwrap_or_default(), placeholder)
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            label {
                style: "font-size: 14px; font-weight: 500; color: rgb(75, 87, 112);",
                "{field.label()}"
            }
            for (bound, slider_value, typed_value, placeholder) in rows {
                div {
                    key: "{bound:?}",
                    style: "display: flex; flex-direction: row; gap: 8px; align-items: center;",
                    input {
                        r#type: "range",
                        style: "flex: 1; min-width: 0;",
                        min: "{min}",
                        max: "{max}",
                        value: "{slider_value}",
                        oninput: move |event: Event<FormData>| on_slide(bound, event.value()),
                    }
                    input {
                        r#type: "number",
                        style: "width: 90px; font-size: 14px; padding: 4px; border: 1px solid rgba(0,0,0,0.3); border-radius: 6px;",
                        placeholder,
                        value: "{typed_value}",
                        oninput: move |event: Event<FormData>| {
                            context.edit(FilterKey::Range(field, bound), event.value().into());
                        },
                    }
                }
            }
        }
    }
}
