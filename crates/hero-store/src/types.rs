use serde::{Deserialize, Serialize};

pub type HeroId = u64;

/// Id handed out by an empty collection.
pub const FIRST_HERO_ID: HeroId = 11;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
}

impl Hero {
    pub fn new(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Creation payload; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Anything that identifies a single hero: a raw id or the record itself.
pub trait HeroKey {
    fn hero_id(&self) -> HeroId;
}

impl HeroKey for HeroId {
    fn hero_id(&self) -> HeroId {
        *self
    }
}

impl HeroKey for Hero {
    fn hero_id(&self) -> HeroId {
        self.id
    }
}

impl<T: HeroKey + ?Sized> HeroKey for &T {
    fn hero_id(&self) -> HeroId {
        (**self).hero_id()
    }
}

pub fn fixture_heroes() -> Vec<Hero> {
    [
        (11, "Mr. Nice"),
        (12, "Narco"),
        (13, "Bombasto"),
        (14, "Celeritas"),
        (15, "Magneta"),
        (16, "RubberMan"),
        (17, "Dynama"),
        (18, "Dr IQ"),
        (19, "Magma"),
        (20, "Tornado"),
    ]
    .into_iter()
    .map(|(id, name)| Hero::new(id, name))
    .collect()
}

/// Next id for a collection: one past the largest id, or [`FIRST_HERO_ID`] when empty.
///
/// Returns `None` once the largest id is `HeroId::MAX`.
pub fn next_hero_id<'a>(heroes: impl IntoIterator<Item = &'a Hero>) -> Option<HeroId> {
    match heroes.into_iter().map(|hero| hero.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(FIRST_HERO_ID),
    }
}
