use dioxus::prelude::*;

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::pages::listings_page::ListingsPage;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Vehicle Listings" }
        document::Link { rel: "preconnect", href: "https://fonts.googleapis.com" }
        document::Link { rel: "preconnect", href: "https://fonts.gstatic.com" }
        document::Link { rel: "stylesheet", href: "https://fonts.googleapis.com/css2?family=Roboto:ital,wght@0,100..900;1,100..900&display=swap" }

        GlobalErrorBoundary {
            boundary_name: "App".to_string(),
            ListingsPage {}
        }
    }
}
