pub mod url_query;
pub mod clock;
