pub mod actions;
pub mod browser;
pub mod cli;
pub mod data;
pub mod error;
pub mod form;
pub mod locator;
pub mod trace;

pub use actions::fixture::Fixture;
pub use actions::provider::{ActionProvider, ClickMode};
pub use browser::driver::{By, Driver, ElementHandle};
pub use error::{FixtureError, Result};
pub use form::autofill::{FillPolicy, FillReport, ValueSource};
pub use form::extract::{FormData, FormValue};
pub use form::seed::{Seed, SeedValue};
