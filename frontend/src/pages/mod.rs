pub mod listings_page;
