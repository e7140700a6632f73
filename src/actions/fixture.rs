use crate::actions::page_object::PageObject;
use crate::actions::provider::ActionProvider;
use crate::browser::driver::Driver;
use crate::cli::config::FixtureConfig;
use crate::data::generator::{DataGenerator, RandomDataGenerator};
use crate::trace::logger::ActionJournal;

/// A driver plus everything the fluent actions need around it.
pub struct Fixture<D: Driver> {
    driver: D,
    config: FixtureConfig,
    data: Box<dyn DataGenerator>,
    journal: ActionJournal,
}

impl<D: Driver> Fixture<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, FixtureConfig::default())
    }

    pub fn with_config(driver: D, config: FixtureConfig) -> Self {
        let data: Box<dyn DataGenerator> = match config.rng_seed {
            Some(seed) => Box::new(RandomDataGenerator::seeded(seed)),
            None => Box::new(RandomDataGenerator::new()),
        };

        let journal = match config.journal_path.as_deref() {
            Some(path) => ActionJournal::new(path),
            None => ActionJournal::disabled(),
        };

        Fixture {
            driver,
            config,
            data,
            journal,
        }
    }

    /// Replace the source of generated values.
    pub fn with_data_generator(mut self, data: Box<dyn DataGenerator>) -> Self {
        self.data = data;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    pub fn journal(&self) -> &ActionJournal {
        &self.journal
    }

    /// Entry point of the fluent action surface.
    pub fn i(&mut self) -> ActionProvider<'_, D> {
        ActionProvider::new(self)
    }

    /// Attach a page object to this fixture.
    pub fn page<'f, P: PageObject<'f, D>>(&'f mut self) -> P {
        P::attach(self.i())
    }

    /// Split borrow of the pieces a fill pass works with.
    pub(crate) fn parts(&mut self) -> (&mut dyn Driver, &mut dyn DataGenerator, Option<&ActionJournal>) {
        let journal = self.journal.is_enabled().then_some(&self.journal);
        (&mut self.driver, self.data.as_mut(), journal)
    }
}
