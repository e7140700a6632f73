pub mod fill;
pub mod fixture;
pub mod get;
pub mod navigate;
pub mod page_object;
pub mod provider;
pub mod switch_to;
pub mod wait;
