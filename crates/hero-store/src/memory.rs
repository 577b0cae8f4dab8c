use crate::store::{HeroStore, HeroStoreError, HeroStoreResult};
use crate::types::{Hero, HeroId, NewHero, fixture_heroes, next_hero_id};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug, Default)]
pub struct MemoryHeroStore {
    inner: Arc<Mutex<BTreeMap<HeroId, Hero>>>,
}

impl MemoryHeroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heroes(heroes: impl IntoIterator<Item = Hero>) -> Self {
        let heroes = heroes.into_iter().map(|hero| (hero.id, hero)).collect();
        Self {
            inner: Arc::new(Mutex::new(heroes)),
        }
    }

    /// Store seeded with the ten tutorial heroes, ids 11 through 20.
    pub fn with_fixture() -> Self {
        Self::with_heroes(fixture_heroes())
    }

    pub fn snapshot(&self) -> HeroStoreResult<Vec<Hero>> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn lock(&self) -> HeroStoreResult<MutexGuard<'_, BTreeMap<HeroId, Hero>>> {
        self.inner
            .lock()
            .map_err(|_| HeroStoreError::Backend("memory hero store mutex poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl HeroStore for MemoryHeroStore {
    async fn list_heroes(&self) -> HeroStoreResult<Vec<Hero>> {
        self.snapshot()
    }

    async fn find_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        let heroes = self.lock()?;
        Ok(heroes.values().find(|hero| hero.id == id).cloned())
    }

    async fn get_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn search_heroes(&self, term: &str) -> HeroStoreResult<Vec<Hero>> {
        let heroes = self.lock()?;
        Ok(heroes
            .values()
            .filter(|hero| hero.name.contains(term))
            .cloned()
            .collect())
    }

    async fn add_hero(&self, hero: NewHero) -> HeroStoreResult<Hero> {
        let mut heroes = self.lock()?;
        let id = next_hero_id(heroes.values())
            .ok_or_else(|| HeroStoreError::Backend("hero ids exhausted".to_string()))?;
        let hero = Hero::new(id, hero.name);
        heroes.insert(id, hero.clone());
        Ok(hero)
    }

    async fn update_hero(&self, hero: &Hero) -> HeroStoreResult<()> {
        let mut heroes = self.lock()?;
        let Some(existing) = heroes.get_mut(&hero.id) else {
            return Err(HeroStoreError::hero_not_found(hero.id));
        };
        existing.name = hero.name.clone();
        Ok(())
    }

    async fn delete_hero(&self, id: HeroId) -> HeroStoreResult<()> {
        let mut heroes = self.lock()?;
        heroes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| HeroStoreError::hero_not_found(id))
    }
}
