pub mod autofill;
pub mod extract;
pub mod field;
pub mod seed;
pub mod source;
pub mod wrapper;
