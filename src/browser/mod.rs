pub mod driver;
pub mod select;
pub mod session;
