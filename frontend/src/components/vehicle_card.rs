//! One listing in the result list.

use common::vehicle::VehicleRecord;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdOpenInNew, md_maps_icons::MdDirectionsCar}};

#[component]
pub fn VehicleCard(vehicle: ReadSignal<VehicleRecord>, index_on_page: usize) -> Element {
    let VehicleRecord {
        price,
        miles,
        location,
        new_or_used,
        transmission,
        fuel_type,
        seller_type,
        link,
        ..
    } = vehicle.read().clone();
    let title = vehicle.read().title();
    let position = index_on_page + 1;
    let price = price.map(|p| p.to_string()).unwrap_or("Price not listed".to_string());
    let details = [
        miles.map(|m| format!("{m} mi")),
        new_or_used,
        transmission,
        fuel_type,
        location,
        seller_type,
    ]
    .into_iter()
    .flatten()
    .filter(|d| !d.is_empty())
    .collect::<Vec<_>>()
    .join(" · ");

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 7px;
                background: white;
                border: 3px solid #AAAAAA33;
                border-radius: 8px;
                padding: 12px 16px;
                margin: 8px 8px;
                width: calc(100% - 16px);
                box-sizing: border-box;
            ",
            // Row 1: INDEX - ICON - TITLE - SPACER - PRICE
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 12px; width: 100%;",
                span {
                    style: "font-size: 20px; font-weight: 200; color: rgba(0, 0, 0, 0.5);",
                    "{position}."
                }
                Icon { icon: MdDirectionsCar, style: "width: 24px; height: 24px; color: #367ED8; flex-shrink: 0;" }
                div {
                    style: "font-size: 20px; font-weight: 400; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; min-width: 0;",
                    "{title}"
                }
                div { style: "flex: 1 1 auto;" }
                div {
                    style: "font-size: 20px; font-weight: 500; color: rgb(28, 33, 45); flex-shrink: 0;",
                    "{price}"
                }
            }
            // Row 2: DETAILS - LINK
            div {
                style: "display: flex; flex-direction: row; align-items: center; justify-content: space-between; gap: 12px;",
                div {
                    style: "font-size: 15px; color: rgba(28, 33, 45, 0.7);",
                    "{details}"
                }
                if let Some(link) = link {
                    a {
                        href: "{link}",
                        target: "_blank",
                        title: "Open listing",
                        style: "display: flex; align-items: center; color: black;",
                        Icon { icon: MdOpenInNew, style: "width: 22px; height: 22px;" }
                    }
                }
            }
        }
    }
}
