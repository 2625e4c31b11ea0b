//! Error boundaries for rendering failures.

use common::{pagination::Page, query_params::QueryParams};
use dioxus::prelude::*;

use crate::data_definitions::url_query::location_query;

/// Last-resort fallback. Shows the filters that led here, read back from
/// the address bar, with links to retry or drop them.
#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                let params = location_query();
                let (filters, _) = params.to_filters();
                let page = params.page().number();
                let retry = format!("?{}", params.to_query_string());
                let first_page = format!("?{}", QueryParams::from_filters(&filters, Page::FIRST).to_query_string());
                let active: Vec<(String, String)> = params.iter()
                    .filter(|(name, _)| *name != "page")
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                rsx! {
                    h1 {
                        style: "color:red; font-size: 40px; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px;",
                        "The listings page failed"
                    }
                    p {
                        style: "color:darkred; font-size: 20px; margin: 15px;",
                        "Boundary: {boundary_name}, page {page}"
                    }
                    if active.is_empty() {
                        p { style: "margin: 15px;", "No filters were set." }
                    } else {
                        ul {
                            style: "margin: 15px; font-family: monospace;",
                            for (name, value) in active {
                                li { key: "{name}", "{name} = {value}" }
                            }
                        }
                    }
                    div {
                        display: "flex",
                        gap: "15px",
                        margin: "15px",
                        FallbackLink { href: retry, label: "Retry this search" }
                        FallbackLink { href: first_page, label: "Back to page 1" }
                        FallbackLink { href: "?".to_string(), label: "Clear all filters" }
                    }
                    pre {
                        style: "color:black; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px; text-wrap: auto;",
                        "{err:#?}"
                    }
                }
            },
            children
        }
    }
}

#[component]
fn FallbackLink(href: String, label: &'static str) -> Element {
    rsx! {
        a {
            href,
            style: "color:blue; font-size: 20px; border: 1px solid blue; padding: 8px; border-radius: 5px;",
            "{label}"
        }
    }
}

/// Keeps a failing panel from taking the whole page down.
#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(error) => format!("{:#?}", error.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        title: "Component Error".to_string(),
                        error_txt,
                        button {
                            style: "color:blue; font-size: 20px; border: 1px solid blue; padding: 8px; border-radius: 5px; margin: 15px;",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try Again"
                        }
                    }
                }
            },
            div {
                width: "100%",
                height: "100%",
                {children}
            }
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(title: ReadSignal<String>, error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            width: "100%",
            display: "flex",
            flex_direction: "column",
            align_items: "center",
            justify_content: "center",
            padding: "10px",
            box_sizing: "border-box",

            h1 {
                style: "color:red; font-size: 26px; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 5px;",
                "{title}",
            }

            pre {
                style: "color:darkred; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 5px; text-wrap: auto; max-width: 500px; max-height: 400px; overflow-y: auto;",
                "{error_txt}"
            }

            {children}
        }
    }
}
