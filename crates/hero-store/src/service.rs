use crate::messages::MessageSink;
use crate::store::{HeroStore, HeroStoreError, HeroStoreResult};
use crate::types::{Hero, HeroId, HeroKey, NewHero};
use std::sync::Arc;

const LOG_SOURCE: &str = "HeroService";

/// Client over a [`HeroStore`] that reports every outcome to a [`MessageSink`].
///
/// Failures are logged (diagnostics via `tracing`, a short line via the sink) and then
/// returned. Callers wanting the old "keep going" behavior take
/// `result.unwrap_or_default()`.
#[derive(Clone)]
pub struct HeroService<S> {
    store: S,
    messages: Arc<dyn MessageSink>,
}

impl<S> HeroService<S> {
    pub fn new(store: S, messages: Arc<dyn MessageSink>) -> Self {
        Self { store, messages }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn log(&self, message: impl AsRef<str>) {
        self.messages
            .add(format!("{LOG_SOURCE}: {}", message.as_ref()));
    }

    fn handle_error(&self, operation: &str, error: HeroStoreError) -> HeroStoreError {
        tracing::error!(operation, error = ?error, "hero operation failed");
        self.log(format!("{operation} failed: {error}"));
        error
    }

    fn log_lookup(&self, id: HeroId, hero: &Option<Hero>) {
        let outcome = if hero.is_some() {
            "fetched"
        } else {
            "did not find"
        };
        self.log(format!("{outcome} hero id={id}"));
    }
}

impl<S: HeroStore> HeroService<S> {
    pub async fn heroes(&self) -> HeroStoreResult<Vec<Hero>> {
        match self.store.list_heroes().await {
            Ok(heroes) => {
                self.log("fetched heroes");
                Ok(heroes)
            }
            Err(error) => Err(self.handle_error("list_heroes", error)),
        }
    }

    /// Lookup through the id filter; zero matches is `Ok(None)`.
    pub async fn find_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        match self.store.find_hero(id).await {
            Ok(hero) => {
                self.log_lookup(id, &hero);
                Ok(hero)
            }
            Err(error) => Err(self.handle_error(&format!("find_hero id={id}"), error)),
        }
    }

    /// Lookup through the record path; a missing record is `Ok(None)`.
    pub async fn hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        match self.store.get_hero(id).await {
            Ok(hero) => {
                self.log_lookup(id, &hero);
                Ok(hero)
            }
            Err(error) => Err(self.handle_error(&format!("get_hero id={id}"), error)),
        }
    }

    /// Blank terms short-circuit to an empty result without touching the store.
    pub async fn search_heroes(&self, term: &str) -> HeroStoreResult<Vec<Hero>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        match self.store.search_heroes(term).await {
            Ok(heroes) => {
                self.log(format!("found heroes matching \"{term}\""));
                Ok(heroes)
            }
            Err(error) => Err(self.handle_error("search_heroes", error)),
        }
    }

    pub async fn add_hero(&self, hero: NewHero) -> HeroStoreResult<Hero> {
        match self.store.add_hero(hero).await {
            Ok(hero) => {
                self.log(format!("added hero w/ id={}", hero.id));
                Ok(hero)
            }
            Err(error) => Err(self.handle_error("add_hero", error)),
        }
    }

    pub async fn update_hero(&self, hero: &Hero) -> HeroStoreResult<()> {
        match self.store.update_hero(hero).await {
            Ok(()) => {
                self.log(format!("updated hero id={}", hero.id));
                Ok(())
            }
            Err(error) => Err(self.handle_error("update_hero", error)),
        }
    }

    pub async fn delete_hero(&self, hero: impl HeroKey) -> HeroStoreResult<()> {
        let id = hero.hero_id();
        match self.store.delete_hero(id).await {
            Ok(()) => {
                self.log(format!("deleted hero id={id}"));
                Ok(())
            }
            Err(error) => Err(self.handle_error("delete_hero", error)),
        }
    }
}
