pub mod fake_dom;
pub mod generator;
