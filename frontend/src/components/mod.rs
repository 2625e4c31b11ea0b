pub mod error_boundary;
pub mod keyword_search_bar;
pub mod filter_panel;
pub mod multi_select;
pub mod range_filter;
pub mod result_list;
pub mod vehicle_card;
