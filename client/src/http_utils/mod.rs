pub mod request;
pub mod timer;
