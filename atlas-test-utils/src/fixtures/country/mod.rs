use crate::TestContext;

pub mod data;
pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn country<'a>(&'a mut self) -> CountryFixtures<'a> {
        CountryFixtures { setup: self }
    }
}

pub struct CountryFixtures<'a> {
    pub setup: &'a mut TestContext,
}
